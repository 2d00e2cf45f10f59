//! Checkout and payment handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::api::error::ApiError;
use crate::domain::Amount;
use crate::domain::role::Member;
use crate::infrastructure::AppState;
use crate::infrastructure::auth::RoleGate;
use crate::models::Payment;
use crate::services::checkout_service::{self, CheckoutInput, Reconciliation};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionRequest {
    pub cost: Amount,
    /// Order id
    pub id: String,
    pub bookname: String,
    pub buyer_email: String,
}

/// POST /payment-checkout-session - Open a hosted checkout for an order
pub async fn create_checkout_session(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutSessionRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let input = CheckoutInput {
        order_id: payload.id,
        bookname: payload.bookname,
        buyer_email: payload.buyer_email,
        cost: payload.cost.value()?,
    };

    let url =
        checkout_service::create_checkout(state.gateway.as_ref(), &state.site_domain, input)
            .await?;

    Ok(Json(json!({ "url": url })))
}

#[derive(Debug, Deserialize)]
pub struct SessionStatusQuery {
    pub session_id: String,
}

/// PATCH /session-status?session_id= - Reconcile a checkout session
///
/// Answers 202 while the provider still reports the session unpaid, so the
/// client knows to poll again.
pub async fn session_status(
    State(state): State<AppState>,
    Query(params): Query<SessionStatusQuery>,
) -> Result<Response, ApiError> {
    let outcome = checkout_service::reconcile_session(
        state.gateway.as_ref(),
        state.payments.as_ref(),
        &params.session_id,
    )
    .await?;

    let response = match outcome {
        Reconciliation::AlreadyRecorded { transaction_id } => (
            StatusCode::OK,
            Json(json!({
                "message": "already exist",
                "transactionId": transaction_id
            })),
        ),
        Reconciliation::Recorded {
            transaction_id,
            order_id,
        } => (
            StatusCode::OK,
            Json(json!({
                "status": "paid",
                "transactionId": transaction_id,
                "orderId": order_id
            })),
        ),
        Reconciliation::Pending { payment_status } => (
            StatusCode::ACCEPTED,
            Json(json!({
                "status": "pending",
                "paymentStatus": payment_status
            })),
        ),
    };

    Ok(response.into_response())
}

/// GET /payments/:email - Payment history (members only)
pub async fn payment_history(
    _gate: RoleGate<Member>,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Payment>>, ApiError> {
    Ok(Json(state.payments.find_by_email(&email).await?))
}
