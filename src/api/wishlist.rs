use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::error::ApiError;
use crate::domain::{InsertResult, NewWishlistEntry};
use crate::infrastructure::AppState;
use crate::infrastructure::auth::Caller;
use crate::models::WishlistEntry;

/// POST /user-wishlist/:email - Save a book to a wishlist
pub async fn add_to_wishlist(
    _caller: Caller,
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(entry): Json<NewWishlistEntry>,
) -> Result<Json<InsertResult>, ApiError> {
    Ok(Json(state.wishlist.create(entry, &email).await?))
}

/// GET /mywishlist-get/:email
pub async fn my_wishlist(
    _caller: Caller,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<WishlistEntry>>, ApiError> {
    Ok(Json(state.wishlist.find_by_email(&email).await?))
}
