use chrono::{DateTime, NaiveDate, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq, Display)]
pub enum OrderStatus {
    // Order saved, customer still at the payment widget
    #[default]
    #[serde(rename = "PENDIENTE_PAGO")]
    #[display("PENDIENTE_PAGO")]
    PendingPayment,
    // Payment approved by the processor webhook
    #[serde(rename = "PAGADO")]
    #[display("PAGADO")]
    Paid,
    // Payment rejected by the processor webhook
    #[serde(rename = "PAGO_RECHAZADO")]
    #[display("PAGO_RECHAZADO")]
    PaymentRejected,
}

impl FromStr for OrderStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDIENTE_PAGO" => Ok(OrderStatus::PendingPayment),
            "PAGADO" => Ok(OrderStatus::Paid),
            "PAGO_RECHAZADO" => Ok(OrderStatus::PaymentRejected),
            other => anyhow::bail!("unknown order status: {other}"),
        }
    }
}

/// Row of `codigos_plan`, one purchase identified by its voucher code
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct OrderRecord {
    pub code: String,
    pub plan_description: String,
    pub amount: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub headcount: u32,
    pub sold_at: DateTime<Utc>,
    pub visit_date: NaiveDate,
    pub expires_on: NaiveDate,
    pub status: OrderStatus,
    pub payment_method: String,
    pub sales_agent: String,
    /// JSON snapshot of the cart line items
    pub detail_json: String,
}
