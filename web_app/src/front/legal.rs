use ntex::web;
use pulldown_cmark::{Options, Parser};
use serde_json::json;
use std::sync::LazyLock;
use tera::Tera;

use crate::front::{errors, utils};

pub static LEGAL_CONTENT: LazyLock<Tera> = LazyLock::new(|| {
    Tera::new("web/content/*.md").unwrap_or_else(|e| {
        log::error!("legal content couldnt be loaded: {e}");
        Tera::default()
    })
});

fn markdown_to_html(markdown_input: &str) -> String {
    let mut html_output = String::new();
    pulldown_cmark::html::push_html(
        &mut html_output,
        Parser::new_ext(markdown_input, Options::ENABLE_TABLES),
    );

    html_output
}

/// Data treatment policy (Ley 1581 de 2012)
#[web::get("/politica-datos")]
async fn get_privacy_policy() -> Result<impl web::Responder, web::Error> {
    let markdown_input = LEGAL_CONTENT
        .render("politica-datos.md", &tera::Context::new())
        .map_err(|_| errors::UserError::UrlNotFound)?;

    let context = tera::Context::from_value(json!({
        "content": markdown_to_html(&markdown_input),
    }))
    .unwrap_or_default();

    Ok(web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(utils::render_template("politica_datos.html", &context)?))
}
