//! Authentication and role gating across the protected routes

mod common;

use axum::http::StatusCode;
use book_courier::domain::Role;
use common::*;
use serde_json::json;

const UNUSED_STRIPE: &str = "http://127.0.0.1:9";

#[tokio::test]
async fn test_missing_or_invalid_token_is_unauthorized() {
    let state = setup_seeded_state(UNUSED_STRIPE).await;
    let app = app(state);

    let (status, body) = send(&app, "GET", "/all-order-book", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "Unauthorized access" }));

    let (status, body) = send(&app, "GET", "/all-order-book", Some("forged"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "Unauthorized access" }));
}

#[tokio::test]
async fn test_wrong_role_is_unauthorized() {
    let state = setup_seeded_state(UNUSED_STRIPE).await;
    let app = app(state);

    // Librarian-only route, called by an admin
    let (status, body) = send(&app, "GET", "/all-order-book", Some(ADMIN_TOKEN), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "Unauthorized access" }));

    // Admin-only route, called by a librarian
    let (status, _) = send(
        &app,
        "DELETE",
        "/delete-book/some-book",
        Some(LIBRARIAN_TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Member-only route, called by a librarian
    let uri = format!("/myorder/{}", LIBRARIAN_EMAIL);
    let (status, _) = send(&app, "GET", &uri, Some(LIBRARIAN_TOKEN), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_verified_caller_without_account_is_unauthorized() {
    let state = setup_seeded_state(UNUSED_STRIPE).await;
    let app = app(state);

    let uri = format!("/myorder/{}", STRANGER_EMAIL);
    let (status, body) = send(&app, "GET", &uri, Some(STRANGER_TOKEN), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "Unauthorized access" }));
}

#[tokio::test]
async fn test_matching_role_passes_each_gate() {
    let state = setup_seeded_state(UNUSED_STRIPE).await;
    let app = app(state);

    let (status, _) = send(&app, "GET", "/all-order-book", Some(LIBRARIAN_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!("/myorder/{}", USER_EMAIL);
    let (status, _) = send(&app, "GET", &uri, Some(USER_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!("/alluser/{}", ADMIN_EMAIL);
    let (status, _) = send(&app, "GET", &uri, Some(ADMIN_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_role_change_takes_effect_on_next_request() {
    let state = setup_seeded_state(UNUSED_STRIPE).await;
    let app = app(state.clone());

    let uri = format!("/myorder/{}", USER_EMAIL);
    let (status, _) = send(&app, "GET", &uri, Some(USER_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);

    let reader = state.users.find_by_email(USER_EMAIL).await.unwrap().unwrap();
    state.users.update_role(&reader.id, Role::Librarian).await.unwrap();

    let (status, _) = send(&app, "GET", &uri, Some(USER_TOKEN), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, "GET", "/all-order-book", Some(USER_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_public_routes_need_no_token() {
    let state = setup_seeded_state(UNUSED_STRIPE).await;
    let app = app(state);

    for uri in ["/allbooks", "/latest-book", "/reviews/any", "/book-edit/any", "/health"] {
        let (status, _) = send(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::OK, "{} should be public", uri);
    }
}
