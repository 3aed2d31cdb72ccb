//! # Cart Aggregator
//!
//! Reduces the quantities selected per plan into the totals shown on the
//! storefront and persisted with the order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{catalog::PlanKey, pricing::PricedPlan};

/// Requested quantity per plan
pub type Selections = BTreeMap<PlanKey, u32>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub key: PlanKey,
    pub name: String,
    pub quantity: u32,
    pub unit_price: i64,
    pub subtotal: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: i64,
    pub savings: i64,
    pub total: i64,
    pub headcount: u32,
    pub line_items: Vec<LineItem>,
}

impl CartTotals {
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Human readable summary, `Travesía Completa x2, Pasadía Infantil x1`
    pub fn plan_description(&self) -> String {
        self.line_items
            .iter()
            .map(|item| format!("{} x{}", item.name, item.quantity))
            .collect::<Vec<String>>()
            .join(", ")
    }
}

/// Aggregates `selections` against `priced_plans`, line items follow catalog
/// order and plans without a positive quantity are left out. Sums saturate,
/// quantities are bounded before an order is confirmed.
pub fn compute_totals(selections: &Selections, priced_plans: &[PricedPlan]) -> CartTotals {
    priced_plans
        .iter()
        .fold(CartTotals::default(), |mut totals, priced| {
            let quantity = selections.get(&priced.plan.key).copied().unwrap_or(0);
            if quantity == 0 {
                return totals;
            }

            let qty = i64::from(quantity);
            let line_subtotal = priced.precio_web.saturating_mul(qty);
            let line_savings = (priced.precio_normal - priced.precio_web).saturating_mul(qty);

            totals.subtotal = totals.subtotal.saturating_add(line_subtotal);
            totals.savings = totals.savings.saturating_add(line_savings);
            totals.headcount = totals.headcount.saturating_add(quantity);
            totals.line_items.push(LineItem {
                key: priced.plan.key,
                name: priced.plan.name.to_string(),
                quantity,
                unit_price: priced.precio_web,
                subtotal: line_subtotal,
            });
            totals.total = totals.subtotal;

            totals
        })
}
