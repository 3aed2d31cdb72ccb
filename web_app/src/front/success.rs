//! Landing page of the payment widget redirect. It only echoes the query
//! parameters back, no order state is read from the database.

use ntex::web;
use serde::Deserialize;
use serde_json::json;

use crate::{
    api,
    front::{errors, session::CheckoutState, utils},
};

#[derive(Debug, Deserialize, Default)]
pub struct SuccessQuery {
    pub codigo: Option<String>,
    pub plan: Option<String>,
    pub cantidad: Option<String>,
    pub fecha: Option<String>,
    pub vence: Option<String>,
}

#[derive(Debug, serde::Serialize, PartialEq, Eq)]
struct SuccessView {
    codigo: String,
    plan: String,
    cantidad: String,
    fecha: Option<String>,
    vence: Option<String>,
    qr_available: bool,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| ammonia::clean(v.trim()))
        .filter(|v| !v.is_empty())
}

fn build_view(query: SuccessQuery) -> SuccessView {
    let codigo = non_empty(query.codigo).unwrap_or_else(|| "MAWA-XXXXXX".into());

    SuccessView {
        qr_available: api::order::is_valid_voucher_code(&codigo),
        codigo,
        plan: non_empty(query.plan).unwrap_or_else(|| "Plan".into()),
        cantidad: non_empty(query.cantidad).unwrap_or_else(|| "1".into()),
        fecha: non_empty(query.fecha),
        vence: non_empty(query.vence),
    }
}

#[web::get("")]
async fn get_success_view(
    query: web::types::Query<SuccessQuery>,
    session: ntex_session::Session,
) -> Result<impl web::Responder, web::Error> {
    let view = build_view(query.into_inner());

    // the customer finished with the widget, a new visit starts a new order
    let state = CheckoutState::load(&session);
    if state.pending().is_some_and(|checkout| checkout.code == view.codigo) {
        CheckoutState::default()
            .store(&session)
            .map_err(|e| errors::ServerError::InternalServerError(e.to_string()))?;
    }

    let context = tera::Context::from_value(json!({ "purchase": view })).unwrap_or_default();

    Ok(web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(utils::render_template("exito.html", &context)?))
}

/// QR code with the voucher code, shown at the venue entrance
#[web::get("/qr/{codigo}")]
async fn get_voucher_qr_code(
    path: web::types::Path<(String,)>,
) -> Result<impl web::Responder, web::Error> {
    let codigo = path.0.to_string();
    if !api::order::is_valid_voucher_code(&codigo) {
        return Err(errors::UserError::InvalidVoucherCode.into());
    }

    let png = utils::get_qr_code(&codigo).map_err(|e| {
        errors::ServerError::InternalServerError(format!("qr code for {codigo}: {e}"))
    })?;

    Ok(web::HttpResponse::Ok()
        .content_type("image/png")
        .body(png))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_params_missing() {
        let view = build_view(SuccessQuery::default());

        assert_eq!(view.codigo, "MAWA-XXXXXX");
        assert_eq!(view.plan, "Plan");
        assert_eq!(view.cantidad, "1");
        assert_eq!(view.fecha, None);
        assert!(!view.qr_available);
    }

    #[test]
    fn test_echoes_params() {
        let view = build_view(SuccessQuery {
            codigo: Some("MAWA-AB23CD".into()),
            plan: Some("Travesía Completa x2".into()),
            cantidad: Some("2".into()),
            fecha: Some("2026-10-17".into()),
            vence: Some("2026-11-16".into()),
        });

        assert_eq!(view.codigo, "MAWA-AB23CD");
        assert_eq!(view.plan, "Travesía Completa x2");
        assert_eq!(view.fecha.as_deref(), Some("2026-10-17"));
        assert!(view.qr_available);
    }

    #[test]
    fn test_blank_params_use_defaults() {
        let view = build_view(SuccessQuery {
            codigo: Some("  ".into()),
            cantidad: Some("".into()),
            ..Default::default()
        });

        assert_eq!(view.codigo, "MAWA-XXXXXX");
        assert_eq!(view.cantidad, "1");
    }
}
