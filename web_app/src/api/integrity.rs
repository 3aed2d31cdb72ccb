//! # Payment integrity hash
//!
//! The payment processor checks `sha256(order_id || amount || currency || secret)`
//! before charging, so the amount and order can't be changed in the browser.
//! There is no nonce or expiry: the hash binds exactly those three fields.

use derive_more::{Display, Error};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::{consts, models::bold};

#[derive(Debug, Display, Error, PartialEq, Eq)]
pub enum IntegrityHashError {
    #[display("orderId y amount son requeridos")]
    MissingFields,
    #[display("{}", consts::PAYMENT_NOT_CONFIGURED_MSG)]
    NotConfigured,
}

/// Lowercase hex SHA-256 of the concatenated fields
pub fn compute_integrity_hash(order_id: &str, amount: &str, currency: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(order_id.as_bytes());
    hasher.update(amount.as_bytes());
    hasher.update(currency.as_bytes());
    hasher.update(secret.as_bytes());

    hex::encode(hasher.finalize())
}

/// Text used for `amount` inside the hash. Whole numbers never carry a
/// fractional part, so `108000` and `108000.0` hash the same.
pub fn amount_repr(amount: &Value) -> Option<String> {
    match amount {
        Value::Number(number) => {
            if let Some(n) = number.as_i64() {
                return Some(n.to_string());
            }
            if let Some(n) = number.as_u64() {
                return Some(n.to_string());
            }
            number.as_f64().map(|n| {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", n as i64)
                } else {
                    n.to_string()
                }
            })
        }
        Value::String(s) if !s.trim().is_empty() => Some(s.to_string()),
        _ => None,
    }
}

/// Validates the request and signs it with `secret`
pub fn sign_request(
    request: bold::IntegrityHashRequest,
    secret: Option<&str>,
) -> Result<bold::IntegrityHashResponse, IntegrityHashError> {
    let order_id = request
        .order_id
        .filter(|id| !id.is_empty())
        .ok_or(IntegrityHashError::MissingFields)?;
    let amount = request
        .amount
        .filter(|amount| !amount.is_null())
        .ok_or(IntegrityHashError::MissingFields)?;
    let amount_text = amount_repr(&amount).ok_or(IntegrityHashError::MissingFields)?;

    let secret = secret
        .filter(|secret| !secret.is_empty())
        .ok_or(IntegrityHashError::NotConfigured)?;

    let currency = request
        .currency
        .unwrap_or_else(|| consts::DEFAULT_CURRENCY.to_string());

    Ok(bold::IntegrityHashResponse {
        ok: true,
        hash: compute_integrity_hash(&order_id, &amount_text, &currency, secret),
        order_id,
        amount,
        currency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: Value) -> bold::IntegrityHashRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_known_hash() {
        assert_eq!(
            compute_integrity_hash("MAWA-AB12C3", "108000", "COP", "s3cret"),
            "9965c9166d7e0f699d911f8de817d4e77bffde442752a9ac69dc33b185c8df29"
        );
    }

    #[test]
    fn test_sign_request_scenario() {
        let response = sign_request(
            request(json!({"orderId": "MAWA-AB12C3", "amount": 108000, "currency": "COP"})),
            Some("s3cret"),
        )
        .unwrap();

        assert!(response.ok);
        assert_eq!(
            response.hash,
            "9965c9166d7e0f699d911f8de817d4e77bffde442752a9ac69dc33b185c8df29"
        );
        assert_eq!(response.order_id, "MAWA-AB12C3");
        assert_eq!(response.amount, json!(108000));
        assert_eq!(response.currency, "COP");
    }

    #[test]
    fn test_currency_defaults_to_cop() {
        let response = sign_request(
            request(json!({"orderId": "MAWA-ZZ99XY", "amount": 54000})),
            Some("otra"),
        )
        .unwrap();

        assert_eq!(response.currency, "COP");
        assert_eq!(
            response.hash,
            "1027cf999e87d4fa4763c6e46b642793dccb1389791cdff344274ce8f2206cb8"
        );
    }

    #[test]
    fn test_float_amount_hashes_like_integer() {
        let response = sign_request(
            request(json!({"orderId": "MAWA-AB12C3", "amount": 108000.0})),
            Some("s3cret"),
        )
        .unwrap();

        assert_eq!(
            response.hash,
            compute_integrity_hash("MAWA-AB12C3", "108000", "COP", "s3cret")
        );
    }

    #[test]
    fn test_missing_fields_rejected_before_secret_check() {
        for body in [
            json!({"amount": 108000}),
            json!({"orderId": "", "amount": 108000}),
            json!({"orderId": "MAWA-AB12C3"}),
            json!({"orderId": "MAWA-AB12C3", "amount": null}),
        ] {
            assert_eq!(
                sign_request(request(body), None).unwrap_err(),
                IntegrityHashError::MissingFields
            );
        }
    }

    #[test]
    fn test_unconfigured_secret() {
        let body = json!({"orderId": "MAWA-AB12C3", "amount": 108000});

        assert_eq!(
            sign_request(request(body.clone()), None).unwrap_err(),
            IntegrityHashError::NotConfigured
        );
        assert_eq!(
            sign_request(request(body), Some("")).unwrap_err(),
            IntegrityHashError::NotConfigured
        );
    }

    #[test]
    fn test_zero_amount_is_present() {
        assert!(
            sign_request(
                request(json!({"orderId": "MAWA-AB12C3", "amount": 0})),
                Some("s3cret")
            )
            .is_ok()
        );
    }
}
