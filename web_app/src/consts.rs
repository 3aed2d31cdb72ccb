use chrono_tz::Tz;

pub const CSRF_TOKEN_COOKIE_NAME: &str = "csrf_token";
pub const CHECKOUT_STATE_COOKIE_NAME: &str = "checkout_state";
pub const MAX_AGE_COOKIES: i64 = chrono::TimeDelta::hours(4).num_seconds();

/// Civil timezone of the venue, every calendar computation is pinned to it
pub const VENUE_TIMEZONE: Tz = chrono_tz::America::Bogota;

pub const GENERAL_DISCOUNT_CONFIG_KEY: &str = "DESCUENTO_WEB_PORCENTAJE";
pub const PLAN_DISCOUNT_CONFIG_PREFIX: &str = "DESCUENTO_";
pub const DEFAULT_GENERAL_DISCOUNT: u32 = 10;

pub const VOUCHER_PREFIX: &str = "MAWA-";
pub const VOUCHER_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
pub const VOUCHER_LEN: usize = 6;
pub const VOUCHER_MAX_ATTEMPTS: usize = 5;
pub const VOUCHER_VALIDITY_DAYS: i64 = 30;

pub const DAY_PASS_DAYS_AHEAD: u32 = 15;
pub const DAY_PASS_MAX_DATES: usize = 15;
pub const LODGING_DAYS_AHEAD: u32 = 60;
/// Only offered by the quantity selector, the server does not enforce it
pub const MAX_QUANTITY_PER_PLAN: u32 = 10;
/// Largest quantity per plan the server accepts from the form
pub const MAX_ACCEPTED_QUANTITY: u32 = 1_000;

pub const DEFAULT_CURRENCY: &str = "COP";
pub const PAYMENT_METHOD: &str = "BOLD_ONLINE";
pub const SALES_AGENT: &str = "VENTA_WEB";
pub const DEFAULT_DIAL_CODE: &str = "+57";

pub const BOLD_LIBRARY_URL: &str = "https://checkout.bold.co/library/boldPaymentButton.js";
pub const BOLD_SIGNATURE_HEADER: &str = "x-bold-signature";
pub const WIDGET_LOAD_TIMEOUT_MS: u64 = 15_000;

pub const GENERIC_ORDER_ERROR_MSG: &str = "Error al procesar la compra. Intenta de nuevo.";
pub const PAYMENT_NOT_CONFIGURED_MSG: &str = "Pasarela de pagos no configurada";
