//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{DomainError, Role};
use crate::models::{Book, Order, Payment, Review, User, WishlistEntry};

/// Outcome of a single-document insert
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl InsertResult {
    pub fn new(inserted_id: impl Into<String>) -> Self {
        Self {
            acknowledged: true,
            inserted_id: inserted_id.into(),
        }
    }
}

/// Outcome of a partial update. SQLite reports matched rows, so both counts agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

impl UpdateResult {
    pub fn from_rows(rows_affected: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count: rows_affected,
            modified_count: rows_affected,
        }
    }
}

/// Outcome of a delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn from_rows(rows_affected: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count: rows_affected,
        }
    }
}

/// Registration payload. Role and creation time are always set server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}

/// Repository trait for User entity
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their (unique) email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find all users
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    /// Create a user with role `user`; `Conflict` if the email is taken
    async fn create(&self, user: NewUser) -> Result<InsertResult, DomainError>;

    /// Change a user's role
    async fn update_role(&self, id: &str, role: Role) -> Result<UpdateResult, DomainError>;
}

/// Filter criteria for catalog queries
#[derive(Debug, Default, Clone)]
pub struct BookFilter {
    /// Case-insensitive substring of `bookname`
    pub search_text: Option<String>,
}

/// Librarian's new listing. `date` is stamped server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBook {
    pub bookname: String,
    pub bookimage: Option<String>,
    pub author: Option<String>,
    #[serde(deserialize_with = "crate::domain::amount::deserialize")]
    pub price: f64,
    pub status: Option<String>,
    /// Owning librarian; defaults to the caller
    pub email: Option<String>,
}

/// Fields a librarian may change on an existing listing
#[derive(Debug, Clone, Deserialize)]
pub struct BookEdit {
    pub bookname: String,
    pub bookimage: Option<String>,
    pub author: Option<String>,
    pub status: String,
    #[serde(deserialize_with = "crate::domain::amount::deserialize")]
    pub price: f64,
}

/// Repository trait for Book entity
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find all books matching the filter
    async fn find_all(&self, filter: BookFilter) -> Result<Vec<Book>, DomainError>;

    /// Find books listed by a librarian
    async fn find_by_owner(&self, email: &str) -> Result<Vec<Book>, DomainError>;

    /// Find a single book by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Book>, DomainError>;

    /// Most recently listed books, newest first
    async fn find_latest(&self, limit: u64) -> Result<Vec<Book>, DomainError>;

    /// Create a new book owned by `owner`
    async fn create(&self, book: NewBook, owner: &str) -> Result<InsertResult, DomainError>;

    /// Overwrite the librarian-editable fields
    async fn update_details(&self, id: &str, edit: BookEdit) -> Result<UpdateResult, DomainError>;

    /// Overwrite the status only
    async fn update_status(&self, id: &str, status: &str) -> Result<UpdateResult, DomainError>;

    /// Delete a book by ID
    async fn delete(&self, id: &str) -> Result<DeleteResult, DomainError>;
}

/// Order placed by a buyer. Status and payment state are forced server-side.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub book_id: String,
    pub bookname: String,
    /// Buyer; defaults to the caller
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(deserialize_with = "crate::domain::amount::deserialize")]
    pub cost: f64,
}

/// Repository trait for Order entity
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Create an order in state pending/unpaid for `buyer`
    async fn create(&self, order: NewOrder, buyer: &str) -> Result<InsertResult, DomainError>;

    /// Orders placed by a buyer
    async fn find_by_email(&self, email: &str) -> Result<Vec<Order>, DomainError>;

    /// Every order
    async fn find_all(&self) -> Result<Vec<Order>, DomainError>;

    /// Find a single order by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, DomainError>;

    /// Overwrite the free-form status
    async fn update_status(&self, id: &str, status: &str) -> Result<UpdateResult, DomainError>;

    /// Delete at most one order referencing `book_id`
    async fn delete_one_by_book_id(&self, book_id: &str) -> Result<DeleteResult, DomainError>;
}

/// Payment recorded during reconciliation
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub transaction_id: String,
    pub email: Option<String>,
    pub bookname: String,
    pub amount: f64,
}

/// Repository trait for Payment entity
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<Payment>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Vec<Payment>, DomainError>;

    /// Insert the payment and flip order `order_id` to `paid` in one transaction.
    /// `Conflict` if the transaction id is already recorded; on any failure
    /// neither write is kept. Returns the order update.
    async fn record_payment(
        &self,
        payment: NewPayment,
        order_id: &str,
    ) -> Result<UpdateResult, DomainError>;
}

/// Book reference saved to a wishlist
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWishlistEntry {
    pub book_id: Option<String>,
    pub bookname: Option<String>,
    pub bookimage: Option<String>,
    pub author: Option<String>,
    pub price: Option<f64>,
}

#[async_trait]
pub trait WishlistRepository: Send + Sync {
    async fn create(&self, entry: NewWishlistEntry, email: &str)
    -> Result<InsertResult, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Vec<WishlistEntry>, DomainError>;
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub book_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, review: NewReview) -> Result<InsertResult, DomainError>;

    async fn find_by_book_id(&self, book_id: &str) -> Result<Vec<Review>, DomainError>;
}
