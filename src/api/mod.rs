pub mod books;
pub mod error;
pub mod health;
pub mod orders;
pub mod payments;
pub mod reviews;
pub mod users;
pub mod wishlist;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Liveness
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        // Users
        .route("/users", post(users::register_user))
        .route("/users/:email/role", get(users::get_user_role))
        .route("/alluser/:email", get(users::list_all_users))
        .route("/update-user/:id", patch(users::update_user_role))
        // Books
        .route("/books", post(books::create_book))
        .route("/allbooks", get(books::list_books))
        .route("/libraian-books/:email", get(books::list_librarian_books))
        .route("/book-edit/:id", get(books::get_book))
        .route("/books-edit/:id", patch(books::edit_book))
        .route("/books-update/:id", patch(books::update_book_status))
        .route("/delete-book/:id", delete(books::delete_book))
        .route("/latest-book", get(books::latest_books))
        // Orders
        .route("/order", post(orders::create_order))
        .route("/myorder/:email", get(orders::my_orders))
        .route("/update-order/:id", patch(orders::update_order_status))
        .route("/delete-order/:id", delete(orders::delete_order))
        .route("/all-order-book", get(orders::all_orders))
        // Wishlist
        .route("/user-wishlist/:email", post(wishlist::add_to_wishlist))
        .route("/mywishlist-get/:email", get(wishlist::my_wishlist))
        // Reviews
        .route("/review", post(reviews::create_review))
        .route("/reviews/:id", get(reviews::book_reviews))
        // Checkout
        .route(
            "/payment-checkout-session",
            post(payments::create_checkout_session),
        )
        .route("/session-status", patch(payments::session_status))
        .route("/payments/:email", get(payments::payment_history))
        .with_state(state)
}
