pub mod sqlite;
pub mod sqlite_queries;

use crate::models;
use async_trait::async_trait;
use std::sync::Arc;

/// Row store behind the storefront: configuration rows and purchase codes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppRepo: Send + Sync {
    async fn get_config_value(&self, key: &str) -> anyhow::Result<Option<String>>;

    async fn get_config_values_by_prefix(
        &self,
        prefix: &str,
    ) -> anyhow::Result<Vec<(String, String)>>;

    async fn order_code_exists(&self, code: &str) -> anyhow::Result<bool>;

    async fn insert_pending_order(&self, order: &models::order::OrderRecord)
    -> anyhow::Result<()>;

    /// Deletes the order only while it is still pending, returns affected rows
    async fn delete_pending_order(&self, code: &str) -> anyhow::Result<u64>;

    /// Moves a pending order to `status`, returns affected rows
    async fn update_pending_order_status(
        &self,
        code: &str,
        status: &models::order::OrderStatus,
    ) -> anyhow::Result<u64>;

    async fn get_order_by_code(
        &self,
        code: &str,
    ) -> anyhow::Result<Option<models::order::OrderRecord>>;
}

pub type ImplAppRepo = Arc<dyn AppRepo>;
