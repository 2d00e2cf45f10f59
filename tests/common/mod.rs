#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use book_courier::api;
use book_courier::db;
use book_courier::domain::{AuthError, IdentityVerifier, Role, VerifiedIdentity};
use book_courier::infrastructure::AppState;
use book_courier::infrastructure::stripe::StripeGateway;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

pub const STRIPE_TEST_KEY: &str = "sk_test_courier";
pub const SITE: &str = "https://courier.example.com";

pub const ADMIN_TOKEN: &str = "token-admin";
pub const LIBRARIAN_TOKEN: &str = "token-librarian";
pub const USER_TOKEN: &str = "token-user";
pub const STRANGER_TOKEN: &str = "token-stranger";

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const LIBRARIAN_EMAIL: &str = "librarian@example.com";
pub const USER_EMAIL: &str = "reader@example.com";
/// Verified by the identity provider but never registered
pub const STRANGER_EMAIL: &str = "stranger@example.com";

/// Identity provider stand-in: a fixed token -> email table
pub struct StaticVerifier {
    tokens: HashMap<String, String>,
}

impl StaticVerifier {
    pub fn standard() -> Self {
        let tokens = [
            (ADMIN_TOKEN, ADMIN_EMAIL),
            (LIBRARIAN_TOKEN, LIBRARIAN_EMAIL),
            (USER_TOKEN, USER_EMAIL),
            (STRANGER_TOKEN, STRANGER_EMAIL),
        ]
        .into_iter()
        .map(|(t, e)| (t.to_string(), e.to_string()))
        .collect();
        Self { tokens }
    }
}

#[async_trait]
impl IdentityVerifier for StaticVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, AuthError> {
        self.tokens
            .get(token)
            .map(|email| VerifiedIdentity {
                uid: format!("uid-{}", email),
                email: email.clone(),
            })
            .ok_or_else(|| AuthError::Unauthenticated("unknown test token".into()))
    }
}

// Helper to create a test database
pub async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

/// State wired to an in-memory database, the static verifier, and a Stripe
/// client aimed at `stripe_base` (a wiremock server in checkout tests).
pub async fn setup_test_state(stripe_base: &str) -> AppState {
    let db = setup_test_db().await;
    let gateway = StripeGateway::new(reqwest::Client::new(), stripe_base, STRIPE_TEST_KEY);
    AppState::new(
        db,
        Arc::new(StaticVerifier::standard()),
        Arc::new(gateway),
        SITE,
    )
}

/// State with the three role accounts registered
pub async fn setup_seeded_state(stripe_base: &str) -> AppState {
    let state = setup_test_state(stripe_base).await;
    create_test_user(state.db(), ADMIN_EMAIL, Role::Admin).await;
    create_test_user(state.db(), LIBRARIAN_EMAIL, Role::Librarian).await;
    create_test_user(state.db(), USER_EMAIL, Role::User).await;
    state
}

// Helper to create a user with a given role
pub async fn create_test_user(db: &DatabaseConnection, email: &str, role: Role) -> String {
    let user = book_courier::models::user::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        email: Set(email.to_string()),
        name: Set(None),
        photo_url: Set(None),
        role: Set(role.as_str().to_string()),
        created_at: Set(chrono::Utc::now().to_rfc3339()),
    };
    user.insert(db).await.expect("Failed to create user").id
}

// Helper to create a book with an explicit listing date
pub async fn create_test_book(
    db: &DatabaseConnection,
    bookname: &str,
    owner: &str,
    date: &str,
) -> String {
    let book = book_courier::models::book::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        bookname: Set(bookname.to_string()),
        bookname_folded: Set(book_courier::models::book::fold_bookname(bookname)),
        bookimage: Set(Some(format!("https://img.example.com/{}.jpg", bookname))),
        author: Set(Some("Test Author".to_string())),
        price: Set(10.0),
        status: Set("published".to_string()),
        email: Set(owner.to_string()),
        date: Set(date.to_string()),
    };
    book.insert(db).await.expect("Failed to create book").id
}

// Helper to record a payment directly, bypassing reconciliation
pub async fn create_test_payment(db: &DatabaseConnection, transaction_id: &str, email: &str) {
    let payment = book_courier::models::payment::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        transaction_id: Set(transaction_id.to_string()),
        email: Set(Some(email.to_string())),
        bookname: Set("Dune".to_string()),
        amount: Set(12.5),
        date: Set(chrono::Utc::now().to_rfc3339()),
    };
    payment.insert(db).await.expect("Failed to create payment");
}

pub fn app(state: AppState) -> Router {
    api::api_router(state)
}

/// Send one request through the router; the body is parsed as JSON when possible.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri).method(method);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
