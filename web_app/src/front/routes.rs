//! Frontend route configuration module.
//!
//! Routes are grouped by the step of the purchase they belong to.

use super::{integrity_api, legal, store, success};
use ntex::web;

/// Storefront and order lifecycle.
///
/// # Routes
/// - `GET /` - Plans, cart and customer form
/// - `POST /orden/confirmar` - Confirm the draft order
/// - `GET /orden/pago` - Payment widget of the pending order
/// - `POST /orden/editar` - Cancel the pending order and edit it again
pub fn storefront(cfg: &mut web::ServiceConfig) {
    cfg.service((
        store::index,
        store::confirm_order,
        store::get_payment_view,
        store::edit_order,
    ));
}

/// Post payment landing page.
///
/// # Routes
/// - `GET /exito` - Purchase summary echoed from the query string
/// - `GET /exito/qr/{codigo}` - QR code of the voucher
pub fn success(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/exito").service((success::get_success_view, success::get_voucher_qr_code)),
    );
}

/// Static legal pages.
///
/// # Routes
/// - `GET /politica-datos` - Data treatment policy
pub fn legal(cfg: &mut web::ServiceConfig) {
    cfg.service((legal::get_privacy_policy,));
}

/// Json endpoints used by the payment widget.
///
/// # Routes
/// - `POST /api/bold/integrity-hash` - Sign order id, amount and currency
pub fn api(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").service((integrity_api::create_integrity_hash,)));
}
