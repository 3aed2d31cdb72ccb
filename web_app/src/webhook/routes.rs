use ntex::web;

/// Configures webhook routes for external integrations.
///
/// These routes are public endpoints authenticated by the sender signature.
///
/// # Routes
/// - `POST /webhook/bold` - Bold payment notifications
pub fn bold(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/webhook/bold").service((super::bold::receive,)));
}
