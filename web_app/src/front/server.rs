//! Handlers not linked to a specific url

use ntex::web;
use ntex_files::NamedFile;

use crate::front::errors;

/// Serve `favicon.ico`
#[web::get("/favicon.ico")]
async fn serve_favicon() -> Result<impl web::Responder, web::Error> {
    Ok(NamedFile::open("web/static/images/favicon.ico")?)
}

/// Return a [UrlNotFound](errors::UserError::UrlNotFound) error for urls not defined
pub async fn serve_not_found() -> Result<web::HttpResponse, web::Error> {
    Err(errors::UserError::UrlNotFound.into())
}
