use anyhow::bail;
use chrono::{TimeDelta, Utc};
use clap::{Args, Parser, Subcommand};

use crate::utils;

/// Suffixes accepted after `DESCUENTO_` in the configuration table
pub const DISCOUNT_KEYS: [&str; 7] = [
    "WEB_PORCENTAJE",
    "PACIFICO_PISCINA",
    "PACIFICO_PUENTES",
    "TRAVESIA",
    "PASADIA_INFANTIL",
    "NOCHE_MAWA",
    "NOCHE_MAWA_INFANTIL",
];

#[derive(Args, Debug, Clone)]
pub struct RunMigrationsArgs {
    #[arg(short, long)]
    file: String,
}

#[derive(Args, Debug, Clone)]
pub struct SetDiscountArgs {
    /// Plan key, or WEB_PORCENTAJE for the general discount
    #[arg(short, long)]
    key: String,
    #[arg(short, long)]
    percent: u32,
}

#[derive(Args, Debug, Clone)]
pub struct PurgePendingOrdersArgs {
    /// Orders waiting for payment longer than this are deleted
    #[arg(long, default_value_t = 24)]
    older_than_hours: i64,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Action {
    RunMigrations(RunMigrationsArgs),
    SetDiscount(SetDiscountArgs),
    PurgePendingOrders(PurgePendingOrdersArgs),
}

/// Maintenance tasks of the store database
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct AppArgs {
    #[command(subcommand)]
    pub action: Action,
}

/// Configuration row that stores the discount of `key`
pub fn discount_config_key(key: &str, percent: u32) -> anyhow::Result<String> {
    let key = key.trim().to_uppercase();
    if !DISCOUNT_KEYS.contains(&key.as_str()) {
        bail!("unknown discount key {key}, expected one of {DISCOUNT_KEYS:?}");
    }
    if percent > 100 {
        bail!("discount percent must be between 0 and 100, got {percent}");
    }

    Ok(format!("DESCUENTO_{key}"))
}

impl AppArgs {
    pub async fn run(&self) -> anyhow::Result<()> {
        match &self.action {
            Action::RunMigrations(RunMigrationsArgs { file }) => {
                let db_pool = utils::setup_sqlite_db_pool().await?;

                utils::run_migrations(&db_pool, file).await
            }
            Action::SetDiscount(SetDiscountArgs { key, percent }) => {
                let config_key = discount_config_key(key, *percent)?;
                let db_pool = utils::setup_sqlite_db_pool().await?;

                utils::upsert_config_value(&db_pool, &config_key, &percent.to_string()).await?;
                log::info!("{config_key} set to {percent}%");

                Ok(())
            }
            Action::PurgePendingOrders(PurgePendingOrdersArgs { older_than_hours }) => {
                if *older_than_hours < 1 {
                    bail!("--older-than-hours must be at least 1");
                }

                let cutoff = Utc::now() - TimeDelta::hours(*older_than_hours);
                let db_pool = utils::setup_sqlite_db_pool().await?;

                let deleted = utils::purge_pending_orders(&db_pool, cutoff).await?;
                log::info!("{deleted} abandoned pending orders deleted (sold before {cutoff})");

                Ok(())
            }
        }
    }
}
