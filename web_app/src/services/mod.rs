pub mod integrity;

use async_trait::async_trait;
use std::sync::Arc;

/// Trusted source of the payment integrity hash
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IntegrityHashService: Send + Sync {
    async fn request_hash(
        &self,
        order_id: &str,
        amount: i64,
        currency: &str,
    ) -> anyhow::Result<String>;
}

pub type ImplIntegrityHashService = Arc<dyn IntegrityHashService>;
