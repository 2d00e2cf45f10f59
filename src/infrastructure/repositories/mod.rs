//! Repository implementations using SeaORM

pub mod book_repository;
pub mod order_repository;
pub mod payment_repository;
pub mod review_repository;
pub mod user_repository;
pub mod wishlist_repository;

pub use book_repository::SeaOrmBookRepository;
pub use order_repository::SeaOrmOrderRepository;
pub use payment_repository::SeaOrmPaymentRepository;
pub use review_repository::SeaOrmReviewRepository;
pub use user_repository::SeaOrmUserRepository;
pub use wishlist_repository::SeaOrmWishlistRepository;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

/// Map a unique-index violation to `Conflict`, anything else to `Database`.
pub(crate) fn conflict_or_db(err: DbErr, what: &str) -> DomainError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::Conflict(what.to_string()),
        _ => DomainError::from(err),
    }
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
