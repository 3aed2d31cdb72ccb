use super::templates;
use derive_more::{Display, Error};
use log::error;
use ntex::{http, web};
use ntex_session::UserSession;

use crate::{consts, front::middleware::csrf_token};

#[derive(Debug, Display, Error)]
pub enum UserError {
    UrlNotFound,
    InvalidVoucherCode,
    InvalidWebhookSignature,
}

impl web::error::WebResponseError for UserError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        let mut context = tera::Context::new();
        error!("{:#?}", self);

        let template_name = match self {
            UserError::UrlNotFound => {
                context.insert("msg_details", "recurso no encontrado");
                "errors/url_not_found.html"
            }
            UserError::InvalidVoucherCode => {
                context.insert("msg_details", "código de compra inválido");
                "errors/url_not_found.html"
            }
            UserError::InvalidWebhookSignature => {
                return web::HttpResponse::build(self.status_code()).finish();
            }
        };

        web::HttpResponse::build(self.status_code())
            .set_header("content-type", "text/html; charset=utf-8")
            .body(
                templates::WEB_TEMPLATES
                    .render(template_name, &context)
                    .unwrap_or(self.to_string()),
            )
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            UserError::UrlNotFound => http::StatusCode::NOT_FOUND,
            UserError::InvalidVoucherCode => http::StatusCode::BAD_REQUEST,
            UserError::InvalidWebhookSignature => http::StatusCode::UNAUTHORIZED,
        }
    }
}

#[derive(Debug, Display, Error)]
pub enum ServerError {
    TemplateError(#[error(not(source))] String),
    InternalServerError(#[error(not(source))] String),
    InvalidCsrfToken,
    PaymentNotConfigured,
}

impl ServerError {
    fn get_error_message(&self) -> String {
        match self {
            ServerError::TemplateError(msg) => format!("[TemplateError] {:#?}", msg),
            ServerError::InternalServerError(msg) => format!("[InternalServerError] {:#?}", msg),
            ServerError::InvalidCsrfToken => "[InvalidCsrfToken]".to_string(),
            ServerError::PaymentNotConfigured => "[PaymentNotConfigured]".to_string(),
        }
    }
}

impl web::error::WebResponseError for ServerError {
    fn error_response(&self, req: &web::HttpRequest) -> web::HttpResponse {
        error!("{}", self.get_error_message());

        let mut context = tera::Context::new();
        // the page offers going back to the store with a form
        if let Some(token) = csrf_token::form_token(&req.get_session()) {
            context.insert("csrf_token", &token);
        }
        if let ServerError::PaymentNotConfigured = self {
            context.insert("msg_details", consts::PAYMENT_NOT_CONFIGURED_MSG);
        }

        web::HttpResponse::build(self.status_code())
            .set_header("content-type", "text/html; charset=utf-8")
            .body(
                templates::WEB_TEMPLATES
                    .render("errors/internal_error.html", &context)
                    .unwrap_or(self.to_string()),
            )
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            ServerError::InvalidCsrfToken => http::StatusCode::FORBIDDEN,
            _ => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntex::web::error::WebResponseError;

    #[test]
    fn test_status_codes() {
        assert_eq!(UserError::UrlNotFound.status_code(), http::StatusCode::NOT_FOUND);
        assert_eq!(
            UserError::InvalidVoucherCode.status_code(),
            http::StatusCode::BAD_REQUEST
        );
        assert_eq!(
            UserError::InvalidWebhookSignature.status_code(),
            http::StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ServerError::InvalidCsrfToken.status_code(),
            http::StatusCode::FORBIDDEN
        );
        assert_eq!(
            ServerError::PaymentNotConfigured.status_code(),
            http::StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServerError::TemplateError("index.html".into()).status_code(),
            http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
