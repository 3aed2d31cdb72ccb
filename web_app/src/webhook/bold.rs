//! Bold webhook endpoint
//!
//! Notifications move an order out of `PENDIENTE_PAGO`. Updates are
//! conditional on the pending status, so Bold retrying a notification is
//! harmless.

use ntex::{util::Bytes, web};

use super::security;
use crate::{
    api, config, consts,
    front::{AppState, errors},
    models::bold::{BoldWebhookEvent, ErrorResponse},
    repo,
};

const SALE_APPROVED: &str = "SALE_APPROVED";
const SALE_REJECTED: &str = "SALE_REJECTED";

/// What a notification did to the order it refers to
#[derive(Debug, PartialEq, Eq)]
pub enum WebhookOutcome {
    Updated,
    AlreadyProcessed,
    UnknownOrder,
    Ignored,
}

/// Applies `event` to the referenced order
pub async fn process_event(
    repo: &repo::ImplAppRepo,
    event: &BoldWebhookEvent,
) -> anyhow::Result<WebhookOutcome> {
    let approved = match event.event_type.as_str() {
        SALE_APPROVED => true,
        SALE_REJECTED => false,
        other => {
            logfire::info!("ignored bold event {event_type}", event_type = other.to_string());
            return Ok(WebhookOutcome::Ignored);
        }
    };

    let Some(code) = event.order_reference() else {
        logfire::warn!("bold event without order reference");
        return Ok(WebhookOutcome::Ignored);
    };

    if api::order::record_payment_result(repo, code, approved).await? {
        logfire::info!(
            "order {code} payment {event_type}",
            code = code.to_string(),
            event_type = event.event_type.clone()
        );
        return Ok(WebhookOutcome::Updated);
    }

    match repo.get_order_by_code(code).await? {
        Some(order) => {
            logfire::info!(
                "order {code} already in status {status}",
                code = code.to_string(),
                status = order.status.to_string()
            );
            Ok(WebhookOutcome::AlreadyProcessed)
        }
        None => {
            logfire::warn!("bold event for unknown order {code}", code = code.to_string());
            Ok(WebhookOutcome::UnknownOrder)
        }
    }
}

/// Webhook receiver endpoint (POST)
///
/// 401 when the signature does not match. A valid notification is answered
/// with 200 unless storing its result failed, then 500 so Bold retries it.
#[web::post("")]
pub async fn receive(
    req: web::HttpRequest,
    body: Bytes,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let Some(secret) = config::app_config().ok().and_then(|c| c.bold_secret()) else {
        logfire::error!("BOLD_SECRET_KEY is not configured, bold webhook rejected");
        return Ok(error_json(consts::PAYMENT_NOT_CONFIGURED_MSG));
    };

    let signature = req
        .headers()
        .get(consts::BOLD_SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if !security::verify_signature(signature, &body, secret) {
        return Err(errors::UserError::InvalidWebhookSignature.into());
    }

    let event: BoldWebhookEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            // a retry carries the same body
            logfire::error!(
                "Failed to parse bold webhook payload: {error}",
                error = e.to_string()
            );
            return Ok(received());
        }
    };

    Ok(acknowledge(process_event(&app_state.repo, &event).await))
}

/// Response for a processed notification
fn acknowledge(result: anyhow::Result<WebhookOutcome>) -> web::HttpResponse {
    match result {
        Ok(_) => received(),
        Err(e) => {
            logfire::error!("Failed to process bold webhook: {error}", error = e.to_string());
            error_json("Error interno del servidor")
        }
    }
}

fn received() -> web::HttpResponse {
    web::HttpResponse::Ok().json(&serde_json::json!({
        "status": "received"
    }))
}

fn error_json(msg: &str) -> web::HttpResponse {
    web::HttpResponse::InternalServerError().json(&ErrorResponse::new(msg))
}
