use serde::{Deserialize, Serialize};

use crate::{
    api::order::{OrderRequest, PendingCheckout},
    consts,
};

/// Checkout progress stored (encrypt) on the customer side
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "state", content = "data")]
pub enum CheckoutState {
    Draft(OrderRequest),
    /// Keeps the draft so "editar mis datos" can bring the form back
    PendingPayment {
        draft: OrderRequest,
        checkout: PendingCheckout,
    },
}

impl Default for CheckoutState {
    fn default() -> Self {
        CheckoutState::Draft(OrderRequest::default())
    }
}

impl CheckoutState {
    /// Reads the state from the session, a missing or unreadable value is a
    /// fresh draft
    pub fn load(session: &ntex_session::Session) -> Self {
        session
            .get::<CheckoutState>(consts::CHECKOUT_STATE_COOKIE_NAME)
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    pub fn store(&self, session: &ntex_session::Session) -> anyhow::Result<()> {
        session
            .set(consts::CHECKOUT_STATE_COOKIE_NAME, self)
            .map_err(|e| anyhow::anyhow!("checkout state couldnt be stored: {e}"))
    }

    /// Back to editing, keeping the last form data
    pub fn into_draft(self) -> OrderRequest {
        match self {
            CheckoutState::Draft(request) => request,
            CheckoutState::PendingPayment { draft, .. } => draft,
        }
    }

    pub fn pending(&self) -> Option<&PendingCheckout> {
        match self {
            CheckoutState::PendingPayment { checkout, .. } => Some(checkout),
            CheckoutState::Draft(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{cart::Selections, catalog::PlanKey, order::CustomerInfo};
    use chrono::NaiveDate;

    #[test]
    fn test_state_serializes_as_tagged_value() {
        let state = CheckoutState::Draft(OrderRequest {
            selections: Selections::from([(PlanKey::Travesia, 2)]),
            visit_date: NaiveDate::from_ymd_opt(2026, 10, 17),
            customer: CustomerInfo::default(),
        });

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["state"], "Draft");
        assert_eq!(json["data"]["selections"]["TRAVESIA"], 2);

        let back: CheckoutState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_default_is_empty_draft() {
        let state = CheckoutState::default();
        assert!(state.pending().is_none());
        assert_eq!(state.into_draft(), OrderRequest::default());
    }

    #[test]
    fn test_into_draft_keeps_form_data() {
        let draft = OrderRequest {
            selections: Selections::from([(PlanKey::NocheMawa, 1)]),
            visit_date: NaiveDate::from_ymd_opt(2026, 11, 14),
            customer: CustomerInfo {
                name: "Ana".into(),
                phone: "300".into(),
                email: None,
            },
        };
        let date = NaiveDate::from_ymd_opt(2026, 11, 14).unwrap();
        let state = CheckoutState::PendingPayment {
            draft: draft.clone(),
            checkout: PendingCheckout {
                code: "MAWA-AB23CD".into(),
                amount: 180_000,
                currency: "COP".into(),
                description: "Noche Mawa x1".into(),
                headcount: 1,
                visit_date: date,
                expires_on: date,
                customer: draft.customer.clone(),
                integrity_hash: None,
                redirect_url: "http://localhost/exito".into(),
            },
        };

        assert_eq!(state.pending().map(|p| p.amount), Some(180_000));
        assert_eq!(state.into_draft(), draft);
    }
}
