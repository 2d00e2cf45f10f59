use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::error::ApiError;
use crate::domain::{InsertResult, NewReview};
use crate::infrastructure::AppState;
use crate::models::Review;

/// POST /review - Open to anyone
pub async fn create_review(
    State(state): State<AppState>,
    Json(review): Json<NewReview>,
) -> Result<Json<InsertResult>, ApiError> {
    if review.book_id.is_empty() {
        return Err(ApiError::BadRequest("bookId is required".into()));
    }
    Ok(Json(state.reviews.create(review).await?))
}

#[utoipa::path(
    get,
    path = "/reviews/{id}",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "Reviews of the book, newest first")
    )
)]
pub async fn book_reviews(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<Json<Vec<Review>>, ApiError> {
    Ok(Json(state.reviews.find_by_book_id(&book_id).await?))
}
