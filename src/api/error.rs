//! HTTP mapping of domain and auth failures

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::{AuthError, DomainError};

#[derive(Debug)]
pub enum ApiError {
    Auth(AuthError),
    Domain(DomainError),
    BadRequest(String),
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        ApiError::Auth(e)
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError::Domain(e)
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(e: sea_orm::DbErr) -> Self {
        ApiError::Domain(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Role mismatches are reported as 401 too, never 403.
            ApiError::Auth(e) => {
                tracing::debug!("Request rejected: {}", e);
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "message": "Unauthorized access" })),
                )
                    .into_response()
            }
            ApiError::BadRequest(msg) | ApiError::Domain(DomainError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::Domain(DomainError::NotFound) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Resource not found" })),
            )
                .into_response(),
            ApiError::Domain(DomainError::Conflict(msg)) => {
                (StatusCode::CONFLICT, Json(json!({ "message": msg }))).into_response()
            }
            ApiError::Domain(DomainError::External(msg)) => {
                tracing::error!("Upstream failure: {}", msg);
                (StatusCode::BAD_GATEWAY, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::Domain(e) => {
                tracing::error!("Request failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": e.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_are_unauthorized() {
        let resp = ApiError::from(AuthError::Forbidden).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp =
            ApiError::from(AuthError::Unauthenticated("missing header".into())).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn domain_failures_map_to_status_codes() {
        let cases = [
            (DomainError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (DomainError::NotFound, StatusCode::NOT_FOUND),
            (DomainError::Conflict("dup".into()), StatusCode::CONFLICT),
            (DomainError::External("stripe".into()), StatusCode::BAD_GATEWAY),
            (DomainError::Database("io".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }
}
