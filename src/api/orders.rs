//! Order handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::books::UpdateStatusRequest;
use crate::api::error::ApiError;
use crate::domain::role::{Admin, Librarian, Member};
use crate::domain::{DeleteResult, InsertResult, NewOrder, UpdateResult};
use crate::infrastructure::AppState;
use crate::infrastructure::auth::{Caller, RoleGate};
use crate::models::Order;

/// POST /order - Place an order; it always starts pending and unpaid
pub async fn create_order(
    caller: Caller,
    State(state): State<AppState>,
    Json(order): Json<NewOrder>,
) -> Result<Json<InsertResult>, ApiError> {
    let buyer = order
        .email
        .clone()
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| caller.email.clone());

    let result = state.orders.create(order, &buyer).await?;
    tracing::info!("Order {} placed by {}", result.inserted_id, buyer);
    Ok(Json(result))
}

/// GET /myorder/:email - A buyer's orders (members only)
pub async fn my_orders(
    _gate: RoleGate<Member>,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.find_by_email(&email).await?))
}

/// PATCH /update-order/:id - Change an order's status (any signed-in caller)
pub async fn update_order_status(
    _caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<UpdateResult>, ApiError> {
    Ok(Json(state.orders.update_status(&id, &payload.status).await?))
}

/// DELETE /delete-order/:id - Remove one order (admin only)
///
/// `:id` is matched against the order's `bookId`, not its own id.
pub async fn delete_order(
    gate: RoleGate<Admin>,
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<Json<DeleteResult>, ApiError> {
    let result = state.orders.delete_one_by_book_id(&book_id).await?;
    tracing::info!(
        "{} deleted {} order(s) for book {}",
        gate.caller.email,
        result.deleted_count,
        book_id
    );
    Ok(Json(result))
}

/// GET /all-order-book - Every order (librarian only)
pub async fn all_orders(
    _gate: RoleGate<Librarian>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.find_all().await?))
}
