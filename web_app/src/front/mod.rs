pub mod errors;
pub mod forms;
pub mod integrity_api;
pub mod legal;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod session;
pub mod store;
pub mod success;
pub mod templates;
pub mod utils;

use crate::{repo, services};
use csrf::AesGcmCsrfProtection;

pub struct AppState {
    pub csrf_protec: AesGcmCsrfProtection,
    pub repo: repo::ImplAppRepo,
    pub integrity_service: services::ImplIntegrityHashService,
}
