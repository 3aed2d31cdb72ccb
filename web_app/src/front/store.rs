//! Storefront pages: plan selection, order confirmation and the payment step

use chrono::NaiveDate;
use ntex::{http::StatusCode, web};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;

use crate::{
    api::{
        self,
        dates::BookingType,
        order::{ConfirmOutcome, OrderRequest, OrderValidationError},
        pricing::PricedPlan,
    },
    config, consts,
    front::{AppState, errors, forms, middleware, session::CheckoutState, utils},
    models,
};

#[derive(Serialize)]
struct PlanView {
    #[serde(flatten)]
    priced: PricedPlan,
    descuento: i64,
    cantidad: u32,
}

#[derive(Serialize)]
struct DateOption {
    value: NaiveDate,
    label: String,
    kind: &'static str,
}

fn date_options(today: NaiveDate, booking: BookingType) -> Vec<DateOption> {
    api::dates::booking_dates(today, booking)
        .into_iter()
        .map(|date| DateOption {
            value: date,
            label: api::dates::format_short_date(date),
            kind: api::dates::day_label(date),
        })
        .collect()
}

fn field_errors(errors: &[OrderValidationError]) -> HashMap<&'static str, Vec<String>> {
    errors.iter().fold(HashMap::new(), |mut acc, error| {
        acc.entry(error.field())
            .or_insert_with(Vec::new)
            .push(error.to_string());
        acc
    })
}

/// Renders the storefront for `draft`, with the validation messages found
async fn storefront_response(
    app_state: &AppState,
    session: &ntex_session::Session,
    status: StatusCode,
    draft: &OrderRequest,
    validation_errors: &[OrderValidationError],
    general_error: Option<&str>,
) -> Result<web::HttpResponse, web::Error> {
    let discounts = api::pricing::load_discount_config(&app_state.repo).await;
    let priced_plans = discounts.price_plans();
    let totals = api::cart::compute_totals(&draft.selections, &priced_plans);
    let today = api::dates::venue_today();

    let plans: Vec<PlanView> = priced_plans
        .into_iter()
        .map(|priced| PlanView {
            descuento: priced.discount_percent(),
            cantidad: draft
                .selections
                .get(&priced.plan.key)
                .copied()
                .unwrap_or(0),
            priced,
        })
        .collect();

    let context = tera::Context::from_value(json!({
        "plans": plans,
        "general_discount": discounts.general,
        "quantity_options": (0..=consts::MAX_QUANTITY_PER_PLAN).collect::<Vec<u32>>(),
        "totals": totals,
        "booking_type": draft.booking_type(),
        "day_pass_dates": date_options(today, BookingType::DayPass),
        "lodging_dates": date_options(today, BookingType::Lodging),
        "draft": draft,
        "field_errors": field_errors(validation_errors),
        "general_error": general_error,
        "csrf_token": middleware::csrf_token::form_token(session),
    }))
    .unwrap_or_default();

    Ok(web::HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(utils::render_template("index.html", &context)?))
}

/// Endpoint to render the storefront
#[web::get("/")]
async fn index(
    app_state: web::types::State<AppState>,
    session: ntex_session::Session,
) -> Result<web::HttpResponse, web::Error> {
    let state = CheckoutState::load(&session);
    if state.pending().is_some() {
        return utils::redirect_to("/orden/pago");
    }

    middleware::csrf_token::issue_csrf_token(&session, &app_state.csrf_protec).map_err(|e| {
        errors::ServerError::InternalServerError(format!("at index.html csrf token: {e}"))
    })?;

    storefront_response(
        &app_state,
        &session,
        StatusCode::OK,
        &state.into_draft(),
        &[],
        None,
    )
    .await
}

/// `DRAFT -> PENDING_PAYMENT`.
///
/// The confirmation runs in its own task while this handler holds the cancel
/// handle: if the client disconnects the handler future is dropped and the
/// task rolls the pending order back.
#[web::post("/orden/confirmar")]
async fn confirm_order(
    app_state: web::types::State<AppState>,
    session: ntex_session::Session,
    form: web::types::Form<HashMap<String, String>>,
) -> Result<web::HttpResponse, web::Error> {
    middleware::csrf_token::verify_csrf_token(
        &session,
        &app_state.csrf_protec,
        form.0
            .get(middleware::csrf_token::CSRF_FORM_FIELD)
            .map(String::as_str),
    )?;

    if CheckoutState::load(&session).pending().is_some() {
        return utils::redirect_to("/orden/pago");
    }

    let (request, mut validation_errors) = forms::order::parse_order_form(&form.0);
    CheckoutState::Draft(request.clone())
        .store(&session)
        .map_err(|e| errors::ServerError::InternalServerError(e.to_string()))?;

    let priced_plans = api::pricing::load_discount_config(&app_state.repo)
        .await
        .price_plans();

    let valid_order = match request.clone().validate(api::dates::venue_today(), &priced_plans) {
        Ok(valid_order) if validation_errors.is_empty() => valid_order,
        Ok(_) => {
            return storefront_response(
                &app_state,
                &session,
                StatusCode::BAD_REQUEST,
                &request,
                &validation_errors,
                None,
            )
            .await;
        }
        Err(found) => {
            for error in found {
                if !validation_errors.contains(&error) {
                    validation_errors.push(error);
                }
            }
            return storefront_response(
                &app_state,
                &session,
                StatusCode::BAD_REQUEST,
                &request,
                &validation_errors,
                None,
            )
            .await;
        }
    };

    let base_url = config::app_config()
        .map_err(|e| errors::ServerError::InternalServerError(e.to_string()))?
        .base_url();
    let repo = app_state.repo.clone();
    let integrity_service = app_state.integrity_service.clone();
    let (_cancel_handle, cancel_signal) = api::cancel::cancel_pair();
    let (tx, rx) = tokio::sync::oneshot::channel();

    ntex::rt::spawn(async move {
        let outcome = api::order::confirm_order(
            &repo,
            &integrity_service,
            valid_order,
            &base_url,
            cancel_signal,
        )
        .await;
        // receiver is gone when the client disconnected
        let _ = tx.send(outcome);
    });

    let outcome = rx.await.map_err(|e| {
        errors::ServerError::InternalServerError(format!("order confirmation task failed: {e}"))
    })?;

    match outcome {
        Ok(ConfirmOutcome::Confirmed(checkout)) => {
            logfire::info!(
                "order {code} waiting for payment",
                code = checkout.code.clone()
            );
            CheckoutState::PendingPayment {
                draft: request,
                checkout,
            }
            .store(&session)
            .map_err(|e| errors::ServerError::InternalServerError(e.to_string()))?;

            utils::redirect_to("/orden/pago")
        }
        Ok(ConfirmOutcome::Cancelled) => Ok(web::HttpResponse::NoContent().finish()),
        Err(e) => {
            logfire::error!("order couldnt be confirmed: {error}", error = e.to_string());
            storefront_response(
                &app_state,
                &session,
                StatusCode::INTERNAL_SERVER_ERROR,
                &request,
                &[],
                Some(consts::GENERIC_ORDER_ERROR_MSG),
            )
            .await
        }
    }
}

fn build_bold_button(
    checkout: &api::order::PendingCheckout,
    api_key: &str,
) -> anyhow::Result<models::bold::BoldButton> {
    let customer_data = serde_json::to_string(&models::bold::BoldCustomerData {
        email: checkout.customer.email.clone().unwrap_or_default(),
        full_name: checkout.customer.name.to_string(),
        phone: checkout.customer.phone.to_string(),
        dial_code: consts::DEFAULT_DIAL_CODE.to_string(),
    })?;

    Ok(models::bold::BoldButton {
        api_key: api_key.to_string(),
        order_id: checkout.code.to_string(),
        currency: checkout.currency.to_string(),
        amount: checkout.amount,
        description: checkout.description.to_string(),
        integrity_signature: checkout.integrity_hash.clone(),
        redirection_url: checkout.redirect_url.to_string(),
        customer_data,
    })
}

/// Endpoint to render the payment widget of the pending order
#[web::get("/orden/pago")]
async fn get_payment_view(
    app_state: web::types::State<AppState>,
    session: ntex_session::Session,
) -> Result<web::HttpResponse, web::Error> {
    let state = CheckoutState::load(&session);
    let Some(checkout) = state.pending() else {
        return utils::redirect_to("/");
    };

    let app_config = config::app_config()
        .map_err(|e| errors::ServerError::InternalServerError(e.to_string()))?;
    let Some(api_key) = app_config.bold_api_key() else {
        return Err(errors::ServerError::PaymentNotConfigured.into());
    };

    let button = build_bold_button(checkout, api_key).map_err(|e| {
        errors::ServerError::InternalServerError(format!("payment button: {e}"))
    })?;

    middleware::csrf_token::issue_csrf_token(&session, &app_state.csrf_protec).map_err(|e| {
        errors::ServerError::InternalServerError(format!("at payment.html csrf token: {e}"))
    })?;

    let context = tera::Context::from_value(json!({
        "checkout": checkout,
        "button": button,
        "bold_library_url": consts::BOLD_LIBRARY_URL,
        "widget_timeout_ms": consts::WIDGET_LOAD_TIMEOUT_MS,
        "csrf_token": middleware::csrf_token::form_token(&session),
    }))
    .unwrap_or_default();

    Ok(web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(utils::render_template("payment.html", &context)?))
}

/// `PENDING_PAYMENT -> CANCELLED` ("editar mis datos"). The form comes back
/// even when the delete fails or finds nothing.
#[web::post("/orden/editar")]
async fn edit_order(
    app_state: web::types::State<AppState>,
    session: ntex_session::Session,
    form: web::types::Form<HashMap<String, String>>,
) -> Result<web::HttpResponse, web::Error> {
    middleware::csrf_token::verify_csrf_token(
        &session,
        &app_state.csrf_protec,
        form.0
            .get(middleware::csrf_token::CSRF_FORM_FIELD)
            .map(String::as_str),
    )?;

    let state = CheckoutState::load(&session);

    if let Some(checkout) = state.pending() {
        match api::order::cancel_order(&app_state.repo, &checkout.code).await {
            Ok(0) => logfire::info!(
                "order {code} was no longer pending, nothing deleted",
                code = checkout.code.clone()
            ),
            Ok(_) => {}
            Err(e) => logfire::warn!(
                "order {code} couldnt be cancelled: {error}",
                code = checkout.code.clone(),
                error = e.to_string()
            ),
        }
    }

    CheckoutState::Draft(state.into_draft())
        .store(&session)
        .map_err(|e| errors::ServerError::InternalServerError(e.to_string()))?;

    utils::redirect_to("/")
}
