//! Trusted signer of the payment integrity hash

use ntex::{util::Bytes, web};

use crate::{
    api::integrity::{self, IntegrityHashError},
    config,
    models::bold,
};

fn error_json(status: ntex::http::StatusCode, msg: &str) -> web::HttpResponse {
    web::HttpResponse::build(status).json(&bold::ErrorResponse::new(msg))
}

/// `POST /api/bold/integrity-hash`
///
/// 400 when `orderId` or `amount` are missing, 500 when the secret is not
/// configured or the body is not valid json.
#[web::post("/bold/integrity-hash")]
async fn create_integrity_hash(body: Bytes) -> Result<impl web::Responder, web::Error> {
    let request: bold::IntegrityHashRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            logfire::error!(
                "integrity hash request couldnt be parsed: {error}",
                error = e.to_string()
            );
            return Ok(error_json(
                ntex::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Error interno del servidor",
            ));
        }
    };

    let secret = config::app_config().ok().and_then(|c| c.bold_secret());

    match integrity::sign_request(request, secret) {
        Ok(response) => Ok(web::HttpResponse::Ok().json(&response)),
        Err(e @ IntegrityHashError::MissingFields) => Ok(error_json(
            ntex::http::StatusCode::BAD_REQUEST,
            &e.to_string(),
        )),
        Err(e @ IntegrityHashError::NotConfigured) => {
            logfire::error!("BOLD_SECRET_KEY is not configured");
            Ok(error_json(
                ntex::http::StatusCode::INTERNAL_SERVER_ERROR,
                &e.to_string(),
            ))
        }
    }
}
