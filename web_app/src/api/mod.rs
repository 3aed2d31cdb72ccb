//! # API Module
//!
//! Business logic of the storefront. Nothing in here knows about HTTP; the
//! `front` and `webhook` layers translate requests into these calls.
//!
//! ## Modules
//!
//! - [`catalog`] - Static plan catalog
//! - [`pricing`] - Discount configuration and web prices
//! - [`dates`] - Bookable dates and holiday calendar
//! - [`cart`] - Cart totals
//! - [`integrity`] - Payment integrity hash
//! - [`order`] - Order lifecycle, confirm and cancel
//! - [`cancel`] - Cancellation signal for in-flight confirmations

pub mod cancel;
pub mod cart;
pub mod catalog;
pub mod dates;
pub mod integrity;
pub mod order;
pub mod pricing;
