//! Application state containing repositories and external clients

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{
    BookRepository, IdentityVerifier, OrderRepository, PaymentGateway, PaymentRepository,
    ReviewRepository, UserRepository, WishlistRepository,
};
use crate::infrastructure::{
    SeaOrmBookRepository, SeaOrmOrderRepository, SeaOrmPaymentRepository, SeaOrmReviewRepository,
    SeaOrmUserRepository, SeaOrmWishlistRepository,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    pub users: Arc<dyn UserRepository>,
    pub books: Arc<dyn BookRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub wishlist: Arc<dyn WishlistRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    /// Bearer token verification
    pub identity: Arc<dyn IdentityVerifier>,
    /// Hosted checkout provider
    pub gateway: Arc<dyn PaymentGateway>,
    /// Public client origin, base of checkout redirect URLs
    pub site_domain: String,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(
        db: DatabaseConnection,
        identity: Arc<dyn IdentityVerifier>,
        gateway: Arc<dyn PaymentGateway>,
        site_domain: impl Into<String>,
    ) -> Self {
        Self {
            users: Arc::new(SeaOrmUserRepository::new(db.clone())),
            books: Arc::new(SeaOrmBookRepository::new(db.clone())),
            orders: Arc::new(SeaOrmOrderRepository::new(db.clone())),
            payments: Arc::new(SeaOrmPaymentRepository::new(db.clone())),
            wishlist: Arc::new(SeaOrmWishlistRepository::new(db.clone())),
            reviews: Arc::new(SeaOrmReviewRepository::new(db.clone())),
            identity,
            gateway,
            site_domain: site_domain.into(),
            db,
        }
    }

    /// Get the database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
