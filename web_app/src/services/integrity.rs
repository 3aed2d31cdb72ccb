use anyhow::bail;
use async_trait::async_trait;
use serde_json::json;

use super::IntegrityHashService;
use crate::{models, utils};

/// Asks the integrity hash endpoint to sign an order
#[derive(Clone)]
pub struct IntegrityHashClient {
    pub endpoint: String,
}

#[async_trait]
impl IntegrityHashService for IntegrityHashClient {
    #[tracing::instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn request_hash(
        &self,
        order_id: &str,
        amount: i64,
        currency: &str,
    ) -> anyhow::Result<String> {
        let response = utils::REQUEST_CLIENT
            .post(&self.endpoint)
            .header("accept", "application/json")
            .json(&json!({
                "orderId": order_id,
                "amount": amount,
                "currency": currency,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .json::<models::bold::ErrorResponse>()
                .await
                .map(|e| e.error)
                .unwrap_or_default();
            bail!("integrity hash endpoint answered {status}: {body}");
        }

        let body = response
            .json::<models::bold::IntegrityHashResponse>()
            .await?;

        if !body.ok || body.hash.is_empty() {
            bail!("integrity hash endpoint returned an empty hash");
        }

        Ok(body.hash)
    }
}
