//! Signature verification of Bold webhook requests
//!
//! Bold signs every notification with HMAC-SHA256 keyed by the account secret.
//! The signed message is the base64 encoding of the raw body, and the hex
//! digest travels in the `x-bold-signature` header.
//!
//! The signature MUST be computed on the raw request body bytes, not on the
//! parsed json.

use base64::{Engine, prelude::BASE64_STANDARD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Hex signature Bold sends for `payload`
pub fn sign_payload(payload: &[u8], secret: &str) -> anyhow::Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| anyhow::anyhow!("invalid hmac key: {e}"))?;
    mac.update(BASE64_STANDARD.encode(payload).as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verifies the `x-bold-signature` header against the request payload using
/// a constant time comparison.
pub fn verify_signature(signature_header: &str, payload: &[u8], secret: &str) -> bool {
    let expected_signature = match hex::decode(signature_header.trim()) {
        Ok(sig) => sig,
        Err(e) => {
            logfire::warn!(
                "Failed to decode signature hex: {error}",
                error = e.to_string()
            );
            return false;
        }
    };

    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(e) => {
            logfire::error!(
                "Failed to create HMAC instance: {error}",
                error = e.to_string()
            );
            return false;
        }
    };

    mac.update(BASE64_STANDARD.encode(payload).as_bytes());
    let computed_signature = mac.finalize().into_bytes();

    let is_valid: bool = computed_signature.ct_eq(&expected_signature[..]).into();
    if !is_valid {
        logfire::warn!("Bold webhook signature verification failed");
    }

    is_valid
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &[u8] = br#"{"type":"SALE_APPROVED","data":{"metadata":{"reference":"MAWA-AB23CD"}}}"#;

    #[test]
    fn test_verify_signature_valid() {
        let signature = sign_payload(PAYLOAD, "s3cret").unwrap();
        assert!(verify_signature(&signature, PAYLOAD, "s3cret"));
    }

    #[test]
    fn test_signature_covers_base64_body() {
        let mut mac = HmacSha256::new_from_slice(b"s3cret").unwrap();
        mac.update(PAYLOAD);
        let raw_body_signature = hex::encode(mac.finalize().into_bytes());

        assert!(!verify_signature(&raw_body_signature, PAYLOAD, "s3cret"));
    }

    #[test]
    fn test_verify_signature_wrong_secret() {
        let signature = sign_payload(PAYLOAD, "otra").unwrap();
        assert!(!verify_signature(&signature, PAYLOAD, "s3cret"));
    }

    #[test]
    fn test_verify_signature_tampered_payload() {
        let signature = sign_payload(PAYLOAD, "s3cret").unwrap();
        let tampered = br#"{"type":"SALE_APPROVED","data":{"metadata":{"reference":"MAWA-ZZ99XY"}}}"#;

        assert!(!verify_signature(&signature, tampered, "s3cret"));
    }

    #[test]
    fn test_verify_signature_invalid_hex() {
        assert!(!verify_signature("zzzz", PAYLOAD, "s3cret"));
        assert!(!verify_signature("", PAYLOAD, "s3cret"));
    }
}
