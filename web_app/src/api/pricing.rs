//! # Pricing Engine
//!
//! Derives the web sale price of every catalog plan from the remotely
//! configured discount percentages. Loading the configuration is the only
//! I/O here and it never fails: pricing must not block checkout, so missing
//! or broken configuration degrades to the default discount.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::HashMap;

use super::catalog::{self, Category, Plan, PlanKey};
use crate::{consts, repo};

const PERCENT_BASE: Decimal = dec!(100);

/// Discount percentages read from the configuration store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountConfig {
    pub general: u32,
    pub per_plan: HashMap<PlanKey, u32>,
}

impl Default for DiscountConfig {
    fn default() -> Self {
        Self {
            general: consts::DEFAULT_GENERAL_DISCOUNT,
            per_plan: HashMap::new(),
        }
    }
}

impl DiscountConfig {
    /// Prices the whole catalog with this configuration
    pub fn price_plans(&self) -> Vec<PricedPlan> {
        price_with_discounts(&self.per_plan, self.general)
    }
}

/// A catalog [Plan] with its normal and web prices
#[derive(Debug, Clone, Serialize)]
pub struct PricedPlan {
    #[serde(flatten)]
    pub plan: &'static Plan,
    pub precio_normal: i64,
    pub precio_web: i64,
}

impl PricedPlan {
    /// Percentage shown next to the web price
    pub fn discount_percent(&self) -> i64 {
        discount_percent(self.precio_normal, self.precio_web)
    }
}

fn parse_percent(value: &str) -> Option<u32> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|percent| *percent <= 100)
}

/// Reads the global web discount. Any failure falls back to
/// [DEFAULT_GENERAL_DISCOUNT](consts::DEFAULT_GENERAL_DISCOUNT) with a warning.
pub async fn fetch_general_discount(repo: &repo::ImplAppRepo) -> u32 {
    let value = match repo
        .get_config_value(consts::GENERAL_DISCOUNT_CONFIG_KEY)
        .await
    {
        Ok(value) => value,
        Err(e) => {
            logfire::warn!(
                "general discount query failed, using default: {error}",
                error = e.to_string()
            );
            return consts::DEFAULT_GENERAL_DISCOUNT;
        }
    };

    match value.as_deref().and_then(parse_percent) {
        Some(percent) => percent,
        None => {
            logfire::warn!(
                "general discount missing or invalid, using default: {value}",
                value = value.unwrap_or_default()
            );
            consts::DEFAULT_GENERAL_DISCOUNT
        }
    }
}

/// Reads every `DESCUENTO_<PLAN_KEY>` row. Unknown plans and invalid values
/// are dropped; a failed query yields an empty map so each plan falls back to
/// the general discount.
pub async fn fetch_per_plan_discounts(repo: &repo::ImplAppRepo) -> HashMap<PlanKey, u32> {
    let rows = match repo
        .get_config_values_by_prefix(consts::PLAN_DISCOUNT_CONFIG_PREFIX)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            logfire::warn!(
                "per plan discount query failed: {error}",
                error = e.to_string()
            );
            return HashMap::new();
        }
    };

    rows.into_iter()
        .filter(|(key, _)| key != consts::GENERAL_DISCOUNT_CONFIG_KEY)
        .filter_map(|(key, value)| {
            let plan_key = key
                .strip_prefix(consts::PLAN_DISCOUNT_CONFIG_PREFIX)?
                .parse::<PlanKey>()
                .ok()?;
            Some((plan_key, parse_percent(&value)?))
        })
        .collect()
}

/// Loads both discount sources into a [DiscountConfig]
pub async fn load_discount_config(repo: &repo::ImplAppRepo) -> DiscountConfig {
    DiscountConfig {
        general: fetch_general_discount(repo).await,
        per_plan: fetch_per_plan_discounts(repo).await,
    }
}

/// `round(base * (1 - percent / 100))`, half away from zero
pub fn apply_discount(base_price: i64, percent: u32) -> i64 {
    let price = Decimal::from(base_price) * (PERCENT_BASE - Decimal::from(percent))
        / PERCENT_BASE;

    price
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(base_price)
}

/// Prices every base plan. A plan specific discount wins over the general one
/// and only adult plans are discounted.
pub fn price_with_discounts(
    per_plan_discounts: &HashMap<PlanKey, u32>,
    general_discount: u32,
) -> Vec<PricedPlan> {
    catalog::base_plans()
        .iter()
        .map(|plan| {
            let precio_web = match plan.category {
                Category::Adulto => {
                    let percent = per_plan_discounts
                        .get(&plan.key)
                        .copied()
                        .unwrap_or(general_discount);
                    apply_discount(plan.base_price, percent)
                }
                Category::Infantil => plan.base_price,
            };

            PricedPlan {
                plan,
                precio_normal: plan.base_price,
                precio_web,
            }
        })
        .collect()
}

/// `round((normal - web) / normal * 100)`
pub fn discount_percent(precio_normal: i64, precio_web: i64) -> i64 {
    if precio_normal <= 0 {
        return 0;
    }

    (Decimal::from(precio_normal - precio_web) * PERCENT_BASE
        / Decimal::from(precio_normal))
    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    .to_i64()
    .unwrap_or_default()
}
