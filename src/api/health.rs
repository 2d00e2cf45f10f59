use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::infrastructure::AppState;

/// Liveness text for the bare origin
pub async fn root() -> &'static str {
    "Book courier is live!"
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up; reports database reachability")
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let database = match state.db().ping().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!("Database ping failed: {}", e);
            "unreachable"
        }
    };

    Json(json!({
        "status": "ok",
        "service": "book-courier",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database
    }))
}
