//! Wire types shared with the Bold payment button and its webhooks.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/bold/integrity-hash`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityHashRequest {
    pub order_id: Option<String>,
    pub amount: Option<Value>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityHashResponse {
    pub ok: bool,
    pub hash: String,
    pub order_id: String,
    pub amount: Value,
    pub currency: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

/// `data-customer-data` attribute of the button
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoldCustomerData {
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub dial_code: String,
}

/// Attributes of the declarative `<script data-bold-button>` tag
#[derive(Debug, Clone, Serialize)]
pub struct BoldButton {
    pub api_key: String,
    pub order_id: String,
    pub currency: String,
    pub amount: i64,
    pub description: String,
    pub integrity_signature: Option<String>,
    pub redirection_url: String,
    /// Serialized [BoldCustomerData]
    pub customer_data: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BoldWebhookMetadata {
    #[serde(default)]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BoldWebhookData {
    #[serde(default)]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub metadata: BoldWebhookMetadata,
}

/// Notification sent by Bold when a sale changes state
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BoldWebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub data: BoldWebhookData,
}

impl BoldWebhookEvent {
    /// Voucher code of the order the event refers to
    pub fn order_reference(&self) -> Option<&str> {
        self.data.metadata.reference.as_deref()
    }
}
