//! Account registration and administration

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::error::ApiError;
use crate::domain::role::Admin;
use crate::domain::{DomainError, NewUser, Role, UpdateResult};
use crate::infrastructure::AppState;
use crate::infrastructure::auth::RoleGate;
use crate::models::User;

const USER_EXISTS: &str = "user already exist";

/// POST /users - Register an account with role `user` unless the email is known
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<Json<Value>, ApiError> {
    if payload.email.trim().is_empty() {
        return Err(ApiError::BadRequest("email is required".into()));
    }

    if state.users.find_by_email(&payload.email).await?.is_some() {
        return Ok(Json(json!({ "message": USER_EXISTS })));
    }

    match state.users.create(payload).await {
        Ok(inserted) => {
            tracing::info!("Registered user {}", inserted.inserted_id);
            Ok(Json(json!(inserted)))
        }
        // Lost a race with a concurrent registration of the same email
        Err(DomainError::Conflict(_)) => Ok(Json(json!({ "message": USER_EXISTS }))),
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    get,
    path = "/users/{email}/role",
    params(("email" = String, Path, description = "Account email")),
    responses(
        (status = 200, description = "Stored role, `user` when the account is unknown")
    )
)]
pub async fn get_user_role(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let role = state
        .users
        .find_by_email(&email)
        .await?
        .map(|u| u.role)
        .unwrap_or_else(|| Role::User.as_str().to_string());

    Ok(Json(json!({ "role": role })))
}

/// GET /alluser/:email - Every account (admin only)
pub async fn list_all_users(
    _gate: RoleGate<Admin>,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Value>, ApiError> {
    // The path names the admin the client believes is signed in; it must be one too.
    let named_is_admin = state
        .users
        .find_by_email(&email)
        .await?
        .is_some_and(|u| u.role == Role::Admin.as_str());
    if !named_is_admin {
        return Ok(Json(json!({ "message": "forbidden access" })));
    }

    let users: Vec<User> = state.users.find_all().await?;
    Ok(Json(json!(users)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

/// PATCH /update-user/:id - Change an account's role (admin only)
pub async fn update_user_role(
    gate: RoleGate<Admin>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateRoleRequest>,
) -> Result<Json<UpdateResult>, ApiError> {
    let role: Role = payload.role.parse().map_err(ApiError::BadRequest)?;

    let result = state.users.update_role(&id, role).await?;
    tracing::info!(
        "{} set role of {} to {} (matched {})",
        gate.caller.email,
        id,
        role,
        result.matched_count
    );
    Ok(Json(result))
}
