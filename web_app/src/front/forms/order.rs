use chrono::NaiveDate;
use std::{collections::HashMap, str::FromStr};

use crate::{
    api::{
        cart::Selections,
        catalog::PlanKey,
        order::{CustomerInfo, OrderRequest, OrderValidationError},
    },
    consts,
};

pub const QUANTITY_FIELD_PREFIX: &str = "cantidad_";

fn clean_field(fields: &HashMap<String, String>, name: &str) -> String {
    fields
        .get(name)
        .map(|value| ammonia::clean(value.trim()))
        .unwrap_or_default()
}

/// Builds an [OrderRequest] from the storefront form.
///
/// Parsing is lenient: whatever could be read is returned along with the
/// errors found, so the form can be shown again with the customer's input.
pub fn parse_order_form(
    fields: &HashMap<String, String>,
) -> (OrderRequest, Vec<OrderValidationError>) {
    let mut errors = vec![];
    let mut selections = Selections::new();

    for (name, value) in fields {
        let Some(raw_key) = name.strip_prefix(QUANTITY_FIELD_PREFIX) else {
            continue;
        };

        let Ok(key) = PlanKey::from_str(raw_key) else {
            if !errors.contains(&OrderValidationError::UnknownPlan) {
                errors.push(OrderValidationError::UnknownPlan);
            }
            continue;
        };

        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        match value.parse::<u32>() {
            Ok(0) => {}
            Ok(quantity) if quantity <= consts::MAX_ACCEPTED_QUANTITY => {
                selections.insert(key, quantity);
            }
            _ => {
                if !errors.contains(&OrderValidationError::InvalidQuantity) {
                    errors.push(OrderValidationError::InvalidQuantity);
                }
            }
        }
    }

    let raw_date = clean_field(fields, "fecha_visita");
    let visit_date = if raw_date.is_empty() {
        None
    } else {
        let parsed = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d").ok();
        if parsed.is_none() {
            errors.push(OrderValidationError::VisitDateNotAvailable);
        }
        parsed
    };

    let email = clean_field(fields, "email");

    let request = OrderRequest {
        selections,
        visit_date,
        customer: CustomerInfo {
            name: clean_field(fields, "nombre"),
            phone: clean_field(fields, "celular"),
            email: (!email.is_empty()).then_some(email),
        },
    };

    (request, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_complete_form() {
        let (request, errors) = parse_order_form(&form(&[
            ("cantidad_PACIFICO_PISCINA", "2"),
            ("cantidad_TRAVESIA", "0"),
            ("cantidad_NOCHE_MAWA", ""),
            ("fecha_visita", "2026-10-17"),
            ("nombre", " Juan Perez "),
            ("celular", "3001234567"),
            ("email", ""),
        ]));

        assert!(errors.is_empty());
        assert_eq!(
            request.selections,
            Selections::from([(PlanKey::PacificoPiscina, 2)])
        );
        assert_eq!(request.visit_date, NaiveDate::from_ymd_opt(2026, 10, 17));
        assert_eq!(request.customer.name, "Juan Perez");
        assert_eq!(request.customer.phone, "3001234567");
        assert_eq!(request.customer.email, None);
    }

    #[test]
    fn test_unknown_plan_and_bad_quantity() {
        let (request, errors) = parse_order_form(&form(&[
            ("cantidad_VIP", "1"),
            ("cantidad_TRAVESIA", "-3"),
            ("cantidad_PASADIA_INFANTIL", "1"),
        ]));

        // field order is not kept by the form map
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&OrderValidationError::UnknownPlan));
        assert!(errors.contains(&OrderValidationError::InvalidQuantity));
        assert_eq!(
            request.selections,
            Selections::from([(PlanKey::PasadiaInfantil, 1)])
        );
    }

    #[test]
    fn test_oversized_quantities_are_rejected() {
        let (request, errors) = parse_order_form(&form(&[
            ("cantidad_PACIFICO_PISCINA", "4294967295"),
            ("cantidad_TRAVESIA", "4294967296"),
            ("cantidad_NOCHE_MAWA", "1001"),
            ("cantidad_PASADIA_INFANTIL", "1000"),
        ]));

        assert_eq!(errors, vec![OrderValidationError::InvalidQuantity]);
        assert_eq!(
            request.selections,
            Selections::from([(PlanKey::PasadiaInfantil, 1000)])
        );
    }

    #[test]
    fn test_bad_date_is_reported() {
        let (request, errors) = parse_order_form(&form(&[("fecha_visita", "17/10/2026")]));

        assert_eq!(request.visit_date, None);
        assert_eq!(errors, vec![OrderValidationError::VisitDateNotAvailable]);
    }

    #[test]
    fn test_markup_is_stripped() {
        let (request, _) = parse_order_form(&form(&[(
            "nombre",
            "Ana<script>alert(1)</script>",
        )]));

        assert_eq!(request.customer.name, "Ana");
    }
}
