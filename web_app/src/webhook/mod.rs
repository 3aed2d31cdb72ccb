//! Webhook handlers for external integrations
//!
//! ## Modules
//!
//! - [`bold`] - Bold payment notifications, they move pending orders to their
//!   final payment status

pub mod bold;
pub mod routes;
pub mod security;
