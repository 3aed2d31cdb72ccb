//! # Order Lifecycle
//!
//! `DRAFT -> PENDING_PAYMENT -> {CANCELLED, SUBMITTED_TO_PROCESSOR}`
//!
//! Confirming an order reserves a voucher code, stores the order as
//! `PENDIENTE_PAGO` and asks for the payment integrity hash. Cancelling
//! ("editar mis datos") deletes the row only while it is still pending, so an
//! order already advanced by the payment webhook is never removed.

use anyhow::bail;
use chrono::{NaiveDate, Utc};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    cancel::CancelSignal,
    cart::{self, CartTotals, Selections},
    dates::{self, BookingType},
    pricing::PricedPlan,
};
use crate::{consts, metric, models, repo, services};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

/// What the customer asked for, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub selections: Selections,
    pub visit_date: Option<NaiveDate>,
    pub customer: CustomerInfo,
}

#[derive(Debug, Clone, Copy, Display, Error, PartialEq, Eq)]
pub enum OrderValidationError {
    #[display("selecciona al menos un plan")]
    MissingSelection,
    #[display("selecciona la fecha de tu visita")]
    MissingVisitDate,
    #[display("la fecha elegida no está disponible")]
    VisitDateNotAvailable,
    #[display("ingresa tu nombre completo")]
    MissingCustomerName,
    #[display("ingresa tu número de celular")]
    MissingCustomerPhone,
    #[display("el email no es válido")]
    InvalidEmail,
    #[display("plan desconocido")]
    UnknownPlan,
    #[display("cantidad inválida")]
    InvalidQuantity,
}

impl OrderValidationError {
    /// Form field the error is shown next to
    pub fn field(&self) -> &'static str {
        match self {
            OrderValidationError::MissingSelection
            | OrderValidationError::UnknownPlan
            | OrderValidationError::InvalidQuantity => "planes",
            OrderValidationError::MissingVisitDate
            | OrderValidationError::VisitDateNotAvailable => "fecha_visita",
            OrderValidationError::MissingCustomerName => "nombre",
            OrderValidationError::MissingCustomerPhone => "celular",
            OrderValidationError::InvalidEmail => "email",
        }
    }
}

/// An order that passed validation and can be confirmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidOrder {
    pub visit_date: NaiveDate,
    pub booking: BookingType,
    pub customer: CustomerInfo,
    pub totals: CartTotals,
}

impl OrderRequest {
    pub fn booking_type(&self) -> BookingType {
        BookingType::from_selections(&self.selections)
    }

    /// Checks every precondition of the confirm transition, collecting all the
    /// failures so the form can show them at once.
    pub fn validate(
        self,
        today: NaiveDate,
        priced_plans: &[PricedPlan],
    ) -> Result<ValidOrder, Vec<OrderValidationError>> {
        let mut errors = vec![];
        let booking = self.booking_type();
        let totals = cart::compute_totals(&self.selections, priced_plans);

        if totals.is_empty() {
            errors.push(OrderValidationError::MissingSelection);
        }
        if self
            .selections
            .values()
            .any(|quantity| *quantity > consts::MAX_ACCEPTED_QUANTITY)
        {
            errors.push(OrderValidationError::InvalidQuantity);
        }

        match self.visit_date {
            None => errors.push(OrderValidationError::MissingVisitDate),
            Some(date) if !dates::booking_dates(today, booking).contains(&date) => {
                errors.push(OrderValidationError::VisitDateNotAvailable)
            }
            Some(_) => {}
        }

        let name = self.customer.name.trim().to_string();
        let phone = self.customer.phone.trim().to_string();
        let email = self
            .customer
            .email
            .map(|email| email.trim().to_string())
            .filter(|email| !email.is_empty());

        if name.is_empty() {
            errors.push(OrderValidationError::MissingCustomerName);
        }
        if phone.is_empty() {
            errors.push(OrderValidationError::MissingCustomerPhone);
        }
        if email.as_ref().is_some_and(|email| !email.contains('@')) {
            errors.push(OrderValidationError::InvalidEmail);
        }

        match self.visit_date {
            Some(visit_date) if errors.is_empty() => Ok(ValidOrder {
                visit_date,
                booking,
                customer: CustomerInfo { name, phone, email },
                totals,
            }),
            _ => Err(errors),
        }
    }
}

/// Order waiting for the customer at the payment widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCheckout {
    pub code: String,
    pub amount: i64,
    pub currency: String,
    pub description: String,
    pub headcount: u32,
    pub visit_date: NaiveDate,
    pub expires_on: NaiveDate,
    pub customer: CustomerInfo,
    pub integrity_hash: Option<String>,
    pub redirect_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Confirmed(PendingCheckout),
    /// The client went away, any pending row was rolled back
    Cancelled,
}

/// New `MAWA-XXXXXX` code drawn from the v4 uuid random bytes
pub fn generate_voucher_code() -> String {
    let random = Uuid::new_v4();
    let suffix: String = random
        .as_bytes()
        .iter()
        .take(consts::VOUCHER_LEN)
        .map(|b| {
            let idx = usize::from(*b) % consts::VOUCHER_ALPHABET.len();
            char::from(consts::VOUCHER_ALPHABET[idx])
        })
        .collect();

    format!("{}{suffix}", consts::VOUCHER_PREFIX)
}

pub fn is_valid_voucher_code(code: &str) -> bool {
    code.strip_prefix(consts::VOUCHER_PREFIX)
        .is_some_and(|suffix| {
            suffix.len() == consts::VOUCHER_LEN
                && suffix.bytes().all(|b| consts::VOUCHER_ALPHABET.contains(&b))
        })
}

/// Generates codes until one is not taken yet
async fn unique_voucher_code(repo: &repo::ImplAppRepo) -> anyhow::Result<String> {
    for _ in 0..consts::VOUCHER_MAX_ATTEMPTS {
        let code = generate_voucher_code();
        if !repo.order_code_exists(&code).await? {
            return Ok(code);
        }

        logfire::warn!("voucher code collision: {code}", code = code.clone());
        metric::incr_order_action_statds("voucher_collision");
    }

    bail!(
        "no free voucher code after {} attempts",
        consts::VOUCHER_MAX_ATTEMPTS
    )
}

/// Landing page the payment widget redirects to once the payment ends
pub fn build_redirect_url(
    base_url: &str,
    code: &str,
    description: &str,
    headcount: u32,
    visit_date: NaiveDate,
    expires_on: NaiveDate,
) -> anyhow::Result<String> {
    let url = reqwest::Url::parse_with_params(
        &format!("{}/exito", base_url.trim_end_matches('/')),
        [
            ("codigo", code.to_string()),
            ("plan", description.to_string()),
            ("cantidad", headcount.to_string()),
            ("fecha", visit_date.to_string()),
            ("vence", expires_on.to_string()),
        ],
    )?;

    Ok(url.to_string())
}

fn build_order_record(
    code: &str,
    order: &ValidOrder,
    expires_on: NaiveDate,
) -> anyhow::Result<models::order::OrderRecord> {
    Ok(models::order::OrderRecord {
        code: code.to_string(),
        plan_description: order.totals.plan_description(),
        amount: order.totals.total,
        customer_name: order.customer.name.to_uppercase(),
        customer_phone: order.customer.phone.to_string(),
        customer_email: order.customer.email.clone(),
        headcount: order.totals.headcount,
        sold_at: Utc::now(),
        visit_date: order.visit_date,
        expires_on,
        status: models::order::OrderStatus::PendingPayment,
        payment_method: consts::PAYMENT_METHOD.to_string(),
        sales_agent: consts::SALES_AGENT.to_string(),
        detail_json: serde_json::to_string(&order.totals.line_items)?,
    })
}

async fn rollback_pending_order(repo: &repo::ImplAppRepo, code: &str) {
    if let Err(e) = repo.delete_pending_order(code).await {
        logfire::error!(
            "abandoned order {code} could not be rolled back: {error}",
            code = code.to_string(),
            error = e.to_string()
        );
    }
    metric::incr_order_action_statds("order_abandoned");
}

/// `DRAFT -> PENDING_PAYMENT`.
///
/// Insert failures abort the transition. A missing integrity hash does not:
/// the flow continues without it. A cancel observed after the insert deletes
/// the pending row again.
pub async fn confirm_order(
    repo: &repo::ImplAppRepo,
    integrity_service: &services::ImplIntegrityHashService,
    order: ValidOrder,
    base_url: &str,
    mut cancel: CancelSignal,
) -> anyhow::Result<ConfirmOutcome> {
    if cancel.is_cancelled() {
        return Ok(ConfirmOutcome::Cancelled);
    }

    let code = unique_voucher_code(repo).await?;
    let expires_on = dates::expiry_date(order.visit_date);
    let description = order.totals.plan_description();
    let redirect_url = build_redirect_url(
        base_url,
        &code,
        &description,
        order.totals.headcount,
        order.visit_date,
        expires_on,
    )?;
    let record = build_order_record(&code, &order, expires_on)?;

    let inserted = tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        res = repo.insert_pending_order(&record) => Some(res),
    };

    match inserted {
        Some(res) => res?,
        None => {
            rollback_pending_order(repo, &code).await;
            return Ok(ConfirmOutcome::Cancelled);
        }
    }

    if cancel.is_cancelled() {
        rollback_pending_order(repo, &code).await;
        return Ok(ConfirmOutcome::Cancelled);
    }

    let hash_result = tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        res = integrity_service.request_hash(&code, record.amount, consts::DEFAULT_CURRENCY) => Some(res),
    };

    let integrity_hash = match hash_result {
        None => {
            rollback_pending_order(repo, &code).await;
            return Ok(ConfirmOutcome::Cancelled);
        }
        Some(Ok(hash)) => Some(hash),
        Some(Err(e)) => {
            logfire::warn!(
                "integrity hash unavailable for {code}, continuing without it: {error}",
                code = code.clone(),
                error = e.to_string()
            );
            metric::incr_order_action_statds("integrity_hash_missing");
            None
        }
    };

    metric::incr_order_action_statds("order_confirmed");

    Ok(ConfirmOutcome::Confirmed(PendingCheckout {
        code,
        amount: record.amount,
        currency: consts::DEFAULT_CURRENCY.to_string(),
        description,
        headcount: record.headcount,
        visit_date: record.visit_date,
        expires_on,
        customer: order.customer,
        integrity_hash,
        redirect_url,
    }))
}

/// `PENDING_PAYMENT -> CANCELLED`, returns how many rows were deleted.
/// Zero means the order already left the pending state.
pub async fn cancel_order(repo: &repo::ImplAppRepo, code: &str) -> anyhow::Result<u64> {
    let deleted = repo.delete_pending_order(code).await?;
    metric::incr_order_action_statds("order_cancelled");

    Ok(deleted)
}

/// Applies a payment result reported by the processor. Only pending orders
/// move, so replays of the same notification are harmless.
pub async fn record_payment_result(
    repo: &repo::ImplAppRepo,
    code: &str,
    approved: bool,
) -> anyhow::Result<bool> {
    let status = if approved {
        models::order::OrderStatus::Paid
    } else {
        models::order::OrderStatus::PaymentRejected
    };

    let updated = repo.update_pending_order_status(code, &status).await?;
    metric::incr_payment_status_statds(&status.to_string());

    Ok(updated > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::{cancel::cancel_pair, catalog::PlanKey, pricing::price_with_discounts},
        repo::MockAppRepo,
        services::MockIntegrityHashService,
    };
    use mockall::predicate::*;
    use std::{
        collections::HashMap,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
    };

    const BASE_URL: &str = "https://tienda.mawa.co";

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn customer() -> CustomerInfo {
        CustomerInfo {
            name: "Juan Perez".into(),
            phone: "3001234567".into(),
            email: Some("juan@example.com".into()),
        }
    }

    fn valid_order() -> ValidOrder {
        let priced = price_with_discounts(&HashMap::new(), 10);
        OrderRequest {
            selections: Selections::from([(PlanKey::PacificoPiscina, 2)]),
            visit_date: Some(date("2026-10-17")),
            customer: customer(),
        }
        .validate(date("2026-10-16"), &priced)
        .unwrap()
    }

    fn no_collisions(mock_repo: &mut MockAppRepo) {
        mock_repo
            .expect_order_code_exists()
            .times(1)
            .returning(|_| Ok(false));
    }

    #[test]
    fn test_voucher_code_format() {
        for _ in 0..200 {
            let code = generate_voucher_code();
            assert_eq!(code.len(), 11);
            assert!(is_valid_voucher_code(&code), "{code}");
        }
    }

    #[test]
    fn test_is_valid_voucher_code() {
        assert!(is_valid_voucher_code("MAWA-AB23CD"));
        assert!(!is_valid_voucher_code("MAWA-AB12C3")); // '1' is ambiguous
        assert!(!is_valid_voucher_code("MAWA-ABO2CD")); // 'O' is ambiguous
        assert!(!is_valid_voucher_code("MAWA-AB23C"));
        assert!(!is_valid_voucher_code("mawa-AB23CD"));
        assert!(!is_valid_voucher_code("AB23CD"));
    }

    #[test]
    fn test_validate_collects_every_error() {
        let priced = price_with_discounts(&HashMap::new(), 10);
        let errors = OrderRequest {
            selections: Selections::new(),
            visit_date: None,
            customer: CustomerInfo {
                name: "  ".into(),
                phone: "".into(),
                email: Some("sin-arroba".into()),
            },
        }
        .validate(date("2026-10-16"), &priced)
        .unwrap_err();

        assert_eq!(
            errors,
            vec![
                OrderValidationError::MissingSelection,
                OrderValidationError::MissingVisitDate,
                OrderValidationError::MissingCustomerName,
                OrderValidationError::MissingCustomerPhone,
                OrderValidationError::InvalidEmail,
            ]
        );
    }

    #[test]
    fn test_validate_rejects_dates_outside_the_offer() {
        let priced = price_with_discounts(&HashMap::new(), 10);
        let request = |visit: &str, key: PlanKey| OrderRequest {
            selections: Selections::from([(key, 1)]),
            visit_date: Some(date(visit)),
            customer: customer(),
        };

        // wednesday
        assert_eq!(
            request("2026-10-21", PlanKey::Travesia)
                .validate(date("2026-10-16"), &priced)
                .unwrap_err(),
            vec![OrderValidationError::VisitDateNotAvailable]
        );
        // sunday without a monday holiday, lodging
        assert_eq!(
            request("2026-10-18", PlanKey::NocheMawa)
                .validate(date("2026-10-16"), &priced)
                .unwrap_err(),
            vec![OrderValidationError::VisitDateNotAvailable]
        );
        // today is never offered
        assert!(
            request("2026-10-17", PlanKey::Travesia)
                .validate(date("2026-10-17"), &priced)
                .is_err()
        );
    }

    #[test]
    fn test_validate_rejects_oversized_quantities() {
        let priced = price_with_discounts(&HashMap::new(), 10);
        let errors = OrderRequest {
            selections: Selections::from([
                (PlanKey::PacificoPiscina, u32::MAX),
                (PlanKey::Travesia, 1),
            ]),
            visit_date: Some(date("2026-10-17")),
            customer: customer(),
        }
        .validate(date("2026-10-16"), &priced)
        .unwrap_err();

        assert_eq!(errors, vec![OrderValidationError::InvalidQuantity]);
    }

    #[test]
    fn test_validate_trims_and_drops_empty_email() {
        let priced = price_with_discounts(&HashMap::new(), 10);
        let order = OrderRequest {
            selections: Selections::from([(PlanKey::NocheMawa, 1)]),
            visit_date: Some(date("2026-11-15")),
            customer: CustomerInfo {
                name: " Ana ".into(),
                phone: " 300 ".into(),
                email: Some("  ".into()),
            },
        }
        .validate(date("2026-11-01"), &priced)
        .unwrap();

        assert_eq!(order.booking, BookingType::Lodging);
        assert_eq!(order.customer.name, "Ana");
        assert_eq!(order.customer.phone, "300");
        assert_eq!(order.customer.email, None);
    }

    #[test]
    fn test_build_redirect_url() {
        let url = build_redirect_url(
            "https://tienda.mawa.co/",
            "MAWA-AB23CD",
            "Pacífico - Piscina x2",
            2,
            date("2026-10-17"),
            date("2026-11-16"),
        )
        .unwrap();

        assert!(url.starts_with("https://tienda.mawa.co/exito?codigo=MAWA-AB23CD&"));
        assert!(url.contains("plan=Pac%C3%ADfico+-+Piscina+x2"));
        assert!(url.contains("cantidad=2"));
        assert!(url.contains("fecha=2026-10-17"));
        assert!(url.contains("vence=2026-11-16"));
    }

    #[ntex::test]
    async fn test_confirm_order_success() {
        let mut mock_repo = MockAppRepo::new();
        no_collisions(&mut mock_repo);
        mock_repo
            .expect_insert_pending_order()
            .withf(|order| {
                order.status == models::order::OrderStatus::PendingPayment
                    && order.amount == 108_000
                    && order.headcount == 2
                    && order.customer_name == "JUAN PEREZ"
                    && order.expires_on == NaiveDate::from_ymd_opt(2026, 11, 16).unwrap()
                    && order.plan_description == "Pacífico - Piscina x2"
                    && order.payment_method == "BOLD_ONLINE"
            })
            .times(1)
            .returning(|_| Ok(()));
        mock_repo.expect_delete_pending_order().never();

        let mut mock_integrity = MockIntegrityHashService::new();
        mock_integrity
            .expect_request_hash()
            .with(always(), eq(108_000), eq("COP"))
            .times(1)
            .returning(|_, _, _| Ok("abc123".to_string()));

        let repo: repo::ImplAppRepo = Arc::new(mock_repo);
        let integrity: services::ImplIntegrityHashService = Arc::new(mock_integrity);
        let (_handle, signal) = cancel_pair();

        let outcome = confirm_order(&repo, &integrity, valid_order(), BASE_URL, signal)
            .await
            .unwrap();

        let ConfirmOutcome::Confirmed(pending) = outcome else {
            panic!("order should be confirmed");
        };
        assert!(is_valid_voucher_code(&pending.code));
        assert_eq!(pending.amount, 108_000);
        assert_eq!(pending.headcount, 2);
        assert_eq!(pending.integrity_hash.as_deref(), Some("abc123"));
        assert!(
            pending
                .redirect_url
                .starts_with(&format!("{BASE_URL}/exito?codigo={}", pending.code))
        );
    }

    #[ntex::test]
    async fn test_confirm_order_tolerates_missing_hash() {
        let mut mock_repo = MockAppRepo::new();
        no_collisions(&mut mock_repo);
        mock_repo
            .expect_insert_pending_order()
            .times(1)
            .returning(|_| Ok(()));
        mock_repo.expect_delete_pending_order().never();

        let mut mock_integrity = MockIntegrityHashService::new();
        mock_integrity
            .expect_request_hash()
            .times(1)
            .returning(|_, _, _| Err(anyhow::anyhow!("connection refused")));

        let repo: repo::ImplAppRepo = Arc::new(mock_repo);
        let integrity: services::ImplIntegrityHashService = Arc::new(mock_integrity);
        let (_handle, signal) = cancel_pair();

        let outcome = confirm_order(&repo, &integrity, valid_order(), BASE_URL, signal)
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            ConfirmOutcome::Confirmed(PendingCheckout {
                integrity_hash: None,
                ..
            })
        ));
    }

    #[ntex::test]
    async fn test_confirm_order_insert_failure_aborts() {
        let mut mock_repo = MockAppRepo::new();
        no_collisions(&mut mock_repo);
        mock_repo
            .expect_insert_pending_order()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("Database connection error")));

        let mut mock_integrity = MockIntegrityHashService::new();
        mock_integrity.expect_request_hash().never();

        let repo: repo::ImplAppRepo = Arc::new(mock_repo);
        let integrity: services::ImplIntegrityHashService = Arc::new(mock_integrity);
        let (_handle, signal) = cancel_pair();

        let result = confirm_order(&repo, &integrity, valid_order(), BASE_URL, signal).await;

        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Database connection error")
        );
    }

    #[ntex::test]
    async fn test_confirm_order_regenerates_taken_codes() {
        let calls = AtomicUsize::new(0);
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_order_code_exists()
            .times(2)
            .returning(move |_| Ok(calls.fetch_add(1, Ordering::SeqCst) == 0));
        mock_repo
            .expect_insert_pending_order()
            .times(1)
            .returning(|_| Ok(()));

        let mut mock_integrity = MockIntegrityHashService::new();
        mock_integrity
            .expect_request_hash()
            .times(1)
            .returning(|_, _, _| Ok("abc123".to_string()));

        let repo: repo::ImplAppRepo = Arc::new(mock_repo);
        let integrity: services::ImplIntegrityHashService = Arc::new(mock_integrity);
        let (_handle, signal) = cancel_pair();

        let outcome = confirm_order(&repo, &integrity, valid_order(), BASE_URL, signal).await;

        assert!(matches!(outcome, Ok(ConfirmOutcome::Confirmed(_))));
    }

    #[ntex::test]
    async fn test_confirm_order_gives_up_when_codes_keep_colliding() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_order_code_exists()
            .times(consts::VOUCHER_MAX_ATTEMPTS)
            .returning(|_| Ok(true));
        mock_repo.expect_insert_pending_order().never();

        let repo: repo::ImplAppRepo = Arc::new(mock_repo);
        let integrity: services::ImplIntegrityHashService =
            Arc::new(MockIntegrityHashService::new());
        let (_handle, signal) = cancel_pair();

        let result = confirm_order(&repo, &integrity, valid_order(), BASE_URL, signal).await;

        assert!(result.is_err());
    }

    #[ntex::test]
    async fn test_confirm_order_cancelled_before_start() {
        let repo: repo::ImplAppRepo = Arc::new(MockAppRepo::new());
        let integrity: services::ImplIntegrityHashService =
            Arc::new(MockIntegrityHashService::new());
        let (handle, signal) = cancel_pair();
        drop(handle);

        let outcome = confirm_order(&repo, &integrity, valid_order(), BASE_URL, signal)
            .await
            .unwrap();

        assert_eq!(outcome, ConfirmOutcome::Cancelled);
    }

    #[ntex::test]
    async fn test_confirm_order_cancelled_after_insert_rolls_back() {
        let (handle, signal) = cancel_pair();

        let mut mock_repo = MockAppRepo::new();
        no_collisions(&mut mock_repo);
        mock_repo
            .expect_insert_pending_order()
            .times(1)
            .return_once(move |_| {
                handle.cancel();
                Ok(())
            });
        mock_repo
            .expect_delete_pending_order()
            .times(1)
            .returning(|_| Ok(1));

        let mut mock_integrity = MockIntegrityHashService::new();
        mock_integrity.expect_request_hash().never();

        let repo: repo::ImplAppRepo = Arc::new(mock_repo);
        let integrity: services::ImplIntegrityHashService = Arc::new(mock_integrity);

        let outcome = confirm_order(&repo, &integrity, valid_order(), BASE_URL, signal)
            .await
            .unwrap();

        assert_eq!(outcome, ConfirmOutcome::Cancelled);
    }

    #[ntex::test]
    async fn test_cancel_pending_order() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_delete_pending_order()
            .with(eq("MAWA-AB23CD"))
            .times(1)
            .returning(|_| Ok(1));
        let repo: repo::ImplAppRepo = Arc::new(mock_repo);

        assert_eq!(cancel_order(&repo, "MAWA-AB23CD").await.unwrap(), 1);
    }

    #[ntex::test]
    async fn test_cancel_already_paid_order_deletes_nothing() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_delete_pending_order()
            .with(eq("MAWA-AB23CD"))
            .times(1)
            .returning(|_| Ok(0));
        let repo: repo::ImplAppRepo = Arc::new(mock_repo);

        assert_eq!(cancel_order(&repo, "MAWA-AB23CD").await.unwrap(), 0);
    }

    #[ntex::test]
    async fn test_record_payment_result() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_update_pending_order_status()
            .with(eq("MAWA-AB23CD"), eq(models::order::OrderStatus::Paid))
            .times(1)
            .returning(|_, _| Ok(1));
        mock_repo
            .expect_update_pending_order_status()
            .with(eq("MAWA-CD45EF"), eq(models::order::OrderStatus::PaymentRejected))
            .times(1)
            .returning(|_, _| Ok(0));
        let repo: repo::ImplAppRepo = Arc::new(mock_repo);

        assert!(record_payment_result(&repo, "MAWA-AB23CD", true).await.unwrap());
        assert!(!record_payment_result(&repo, "MAWA-CD45EF", false).await.unwrap());
    }
}
