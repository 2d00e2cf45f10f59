//! Catalog handlers: librarian listings, admin moderation, public reads

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::domain::role::{Admin, Librarian};
use crate::domain::{BookEdit, BookFilter, DeleteResult, InsertResult, NewBook, UpdateResult};
use crate::infrastructure::AppState;
use crate::infrastructure::auth::RoleGate;
use crate::models::Book;

/// Number of books on the "latest" shelf
pub const LATEST_BOOKS: u64 = 4;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBooksQuery {
    pub search_text: Option<String>,
}

/// POST /books - List a new book (librarian only)
pub async fn create_book(
    gate: RoleGate<Librarian>,
    State(state): State<AppState>,
    Json(book): Json<NewBook>,
) -> Result<Json<InsertResult>, ApiError> {
    if book.bookname.trim().is_empty() {
        return Err(ApiError::BadRequest("bookname is required".into()));
    }

    let owner = book
        .email
        .clone()
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| gate.caller.email.clone());

    let result = state.books.create(book, &owner).await?;
    tracing::info!("Book {} listed by {}", result.inserted_id, owner);
    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/allbooks",
    params(("searchText" = Option<String>, Query, description = "Case-insensitive substring of the book name")),
    responses(
        (status = 200, description = "Matching books")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<ListBooksQuery>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let filter = BookFilter {
        search_text: params.search_text,
    };
    Ok(Json(state.books.find_all(filter).await?))
}

/// GET /libraian-books/:email - Books listed by one librarian
pub async fn list_librarian_books(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Book>>, ApiError> {
    Ok(Json(state.books.find_by_owner(&email).await?))
}

#[utoipa::path(
    get,
    path = "/book-edit/{id}",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book, or null when unknown")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Book>>, ApiError> {
    Ok(Json(state.books.find_by_id(&id).await?))
}

/// PATCH /books-edit/:id - Rewrite the listing fields (librarian only)
pub async fn edit_book(
    _gate: RoleGate<Librarian>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(edit): Json<BookEdit>,
) -> Result<Json<UpdateResult>, ApiError> {
    Ok(Json(state.books.update_details(&id, edit).await?))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// PATCH /books-update/:id - Change a listing's status (admin only)
pub async fn update_book_status(
    _gate: RoleGate<Admin>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<UpdateResult>, ApiError> {
    Ok(Json(state.books.update_status(&id, &payload.status).await?))
}

/// DELETE /delete-book/:id - Remove a listing (admin only)
pub async fn delete_book(
    gate: RoleGate<Admin>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResult>, ApiError> {
    let result = state.books.delete(&id).await?;
    tracing::info!(
        "{} deleted book {} ({} removed)",
        gate.caller.email,
        id,
        result.deleted_count
    );
    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/latest-book",
    responses(
        (status = 200, description = "Up to four most recently listed books, newest first")
    )
)]
pub async fn latest_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, ApiError> {
    Ok(Json(state.books.find_latest(LATEST_BOOKS).await?))
}
