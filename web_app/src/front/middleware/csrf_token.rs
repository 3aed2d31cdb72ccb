use base64::{Engine, prelude::BASE64_STANDARD};
use csrf::{AesGcmCsrfProtection, CsrfProtection};

use crate::{consts, front::errors};

/// Hidden form field carrying the token half of the pair
pub const CSRF_FORM_FIELD: &str = "csrf_token";

/// Token pair kept in the session. The token goes into every form, the
/// cookie half never leaves the (encrypted) session.
#[derive(Default, serde::Serialize, serde::Deserialize)]
pub struct CsrfToken {
    pub token_base64: String,
    pub cookie_base64: String,
}

/// Generates a fresh pair and stores it in the session
pub fn issue_csrf_token(
    session: &ntex_session::Session,
    csrf_protec: &AesGcmCsrfProtection,
) -> anyhow::Result<()> {
    let (csrf_token, csrf_cookie) = csrf_protec
        .generate_token_pair(None, consts::MAX_AGE_COOKIES)
        .map_err(|e| anyhow::anyhow!("cant set token csrf protection: {e}"))?;

    session
        .set(
            consts::CSRF_TOKEN_COOKIE_NAME,
            serde_json::to_string(&CsrfToken {
                token_base64: csrf_token.b64_string(),
                cookie_base64: csrf_cookie.b64_string(),
            })?,
        )
        .map_err(|e| anyhow::anyhow!("csrf token couldnt be stored: {e}"))
}

fn stored_pair(session: &ntex_session::Session) -> Option<CsrfToken> {
    session
        .get::<String>(consts::CSRF_TOKEN_COOKIE_NAME)
        .ok()
        .flatten()
        .and_then(|csrf| serde_json::from_str::<CsrfToken>(&csrf).ok())
}

/// Token to embed in the forms rendered for this session
pub fn form_token(session: &ntex_session::Session) -> Option<String> {
    stored_pair(session).map(|pair| pair.token_base64)
}

fn is_token_valid(
    csrf_protec: &AesGcmCsrfProtection,
    cookie_base64: &str,
    submitted_token_base64: &str,
) -> bool {
    let token = BASE64_STANDARD
        .decode(submitted_token_base64.as_bytes())
        .map(|token| csrf_protec.parse_token(&token));
    let cookie = BASE64_STANDARD
        .decode(cookie_base64.as_bytes())
        .map(|cookie| csrf_protec.parse_cookie(&cookie));

    if let (Ok(Ok(token)), Ok(Ok(cookie))) = (token, cookie) {
        return csrf_protec.verify_token_pair(&token, &cookie).is_ok();
    }

    false
}

/// Checks the token submitted with a form against the cookie in the session
pub fn verify_csrf_token(
    session: &ntex_session::Session,
    csrf_protec: &AesGcmCsrfProtection,
    submitted_token_base64: Option<&str>,
) -> Result<(), errors::ServerError> {
    let valid = match (stored_pair(session), submitted_token_base64) {
        (Some(pair), Some(submitted)) => {
            is_token_valid(csrf_protec, &pair.cookie_base64, submitted)
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(errors::ServerError::InvalidCsrfToken)
    }
}
