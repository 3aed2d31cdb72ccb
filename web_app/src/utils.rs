//! Helper functions could be used in api/, front/, ...

use crate::config;
use anyhow::anyhow;
use argon2::Argon2;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode},
};
use std::{str::FromStr, sync::LazyLock, time::Duration};
use uuid::Uuid;

pub async fn setup_sqlite_db_pool(encrypted: bool) -> anyhow::Result<SqlitePool> {
    let app_config = config::app_config()?;
    let connect_options = SqliteConnectOptions::from_str(&app_config.db_host)?;

    if encrypted {
        return Ok(SqlitePool::connect_with(
            connect_options
                .pragma("key", app_config.db_pass_encrypt.to_string())
                .pragma("cipher_page_size", "1024")
                .pragma("kdf_iter", "64000")
                .pragma("cipher_hmac_algorithm", "HMAC_SHA1")
                .pragma("cipher_kdf_algorithm", "PBKDF2_HMAC_SHA1")
                .journal_mode(SqliteJournalMode::Delete),
        )
        .await?);
    }

    Ok(SqlitePool::connect_with(connect_options.create_if_missing(true)).await?)
}

pub fn build_csrf_key(pwd: &str, salt: &str) -> anyhow::Result<[u8; 32]> {
    let mut csrf_key = [0u8; 32];
    Argon2::default()
        .hash_password_into(
            Uuid::from_str(pwd)?.as_bytes(),
            Uuid::from_str(salt)?.as_bytes(),
            &mut csrf_key,
        )
        .map_err(|err| anyhow!("csrf_key couldn't be created: {}", err))?;

    Ok(csrf_key)
}

pub fn build_random_csrf_key() -> anyhow::Result<[u8; 32]> {
    build_csrf_key(&Uuid::new_v4().to_string(), &Uuid::new_v4().to_string())
}

/// Client to make http requests
pub static REQUEST_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_default()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csrf_key_is_deterministic() {
        let pwd = "0b9a4c2e-5a5e-4d4b-9a53-1f0f4a8f2c11";
        let salt = "7d6f3b1a-2c4e-4f8a-8b9c-0d1e2f3a4b5c";

        assert_eq!(
            build_csrf_key(pwd, salt).unwrap(),
            build_csrf_key(pwd, salt).unwrap()
        );
        assert!(build_csrf_key("not-a-uuid", salt).is_err());
    }
}
