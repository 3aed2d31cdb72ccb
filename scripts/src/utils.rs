use crate::config;
use chrono::{DateTime, Utc};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode},
};
use std::str::FromStr;

const QUERY_UPSERT_CONFIG_VALUE: &str = r#"
INSERT INTO configuracion(clave, valor, actualizado_en)
VALUES($1, $2, CURRENT_TIMESTAMP)
ON CONFLICT(clave) DO UPDATE SET valor=excluded.valor, actualizado_en=excluded.actualizado_en;
"#;

const QUERY_PURGE_PENDING_ORDERS: &str = r#"
DELETE FROM codigos_plan WHERE estado='PENDIENTE_PAGO' AND fecha_venta < $1;
"#;

pub async fn run_migrations(db_pool: &sqlx::SqlitePool, file_name: &str) -> anyhow::Result<()> {
    let mut tera = tera::Tera::new("../migrations/**/*.sql")?;
    tera.autoescape_on(vec![".sql"]);

    let migration_query = tera.render(file_name, &tera::Context::new())?;

    sqlx::query(&migration_query).execute(db_pool).await?;
    log::info!("migration {file_name} applied");

    Ok(())
}

pub async fn upsert_config_value(
    db_pool: &sqlx::SqlitePool,
    key: &str,
    value: &str,
) -> anyhow::Result<()> {
    sqlx::query(QUERY_UPSERT_CONFIG_VALUE)
        .bind(key)
        .bind(value)
        .execute(db_pool)
        .await?;

    Ok(())
}

/// Deletes orders still waiting for payment that were created before `cutoff`
pub async fn purge_pending_orders(
    db_pool: &sqlx::SqlitePool,
    cutoff: DateTime<Utc>,
) -> anyhow::Result<u64> {
    let result = sqlx::query(QUERY_PURGE_PENDING_ORDERS)
        .bind(cutoff)
        .execute(db_pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn setup_sqlite_db_pool() -> anyhow::Result<SqlitePool> {
    let app_config = config::app_config()?;
    let connect_options = SqliteConnectOptions::from_str(&app_config.db_host)?;

    if app_config.is_prod() {
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
