//! The assembled application, with an unreachable database.
//!
//! Covers what the router does before (or without) touching `PostgreSQL`,
//! and that a failing approval lookup never locks a seller out.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::to_bytes;
use axum::http::StatusCode;
use tower::ServiceExt;
use tower_sessions::MemoryStore;

use kebumify_integration_tests::{
    get as get_req, location, offline_state, post_form, seed_session, user,
};
use kebumify_web::routes::app_router;

fn offline_app() -> (Router, MemoryStore) {
    let store = MemoryStore::default();
    let app = app_router(offline_state(), store.clone(), false, None);
    (app, store)
}

#[tokio::test]
async fn anonymous_admin_panel_redirects_to_login() {
    let (app, _) = offline_app();

    for path in ["/dashboard", "/dashboard/admin/stats", "/dashboard/admin/accounts/pending"] {
        let response = app.clone().oneshot(get_req(path, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{path}");
        assert_eq!(location(&response), Some("/login"), "{path}");
    }
}

#[tokio::test]
async fn login_page_echoes_messages() {
    let (app, _) = offline_app();

    let response = app
        .oneshot(get_req("/login?error=credentials", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["page"], "login");
    assert_eq!(json["error"], "credentials");
    assert!(json["success"].is_null());
}

#[tokio::test]
async fn register_rejects_mismatched_passwords() {
    let (app, _) = offline_app();

    let form = "email=sri%40kebumen.id&password=lanting-enak&password_confirm=lanting-asin\
                &store_name=Lanting+Bu+Sri&whatsapp=081234567890";
    let response = app
        .oneshot(post_form("/register", form, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/register?error=password_mismatch"));
}

#[tokio::test]
async fn register_reports_validation_errors() {
    let (app, _) = offline_app();

    let cases = [
        ("email=sri&password=lanting-enak&password_confirm=lanting-enak&store_name=Sri&whatsapp=081234567890", "invalid_email"),
        ("email=sri%40kebumen.id&password=short&password_confirm=short&store_name=Sri&whatsapp=081234567890", "weak_password"),
        ("email=sri%40kebumen.id&password=lanting-enak&password_confirm=lanting-enak&store_name=Sri&whatsapp=123", "invalid_whatsapp"),
        ("email=sri%40kebumen.id&password=lanting-enak&password_confirm=lanting-enak&store_name=+&whatsapp=081234567890", "store_name"),
    ];
    for (form, code) in cases {
        let response = app
            .clone()
            .oneshot(post_form("/register", form, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{code}");
        assert_eq!(
            location(&response),
            Some(format!("/register?error={code}").as_str())
        );
    }
}

#[tokio::test]
async fn failed_approval_lookup_does_not_redirect() {
    let (app, store) = offline_app();
    let cookie = seed_session(&store, user(42)).await;

    // The gate lets the request through; the handler then fails on its own
    // database read.
    let response = app
        .oneshot(get_req("/dashboard", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(location(&response).is_none());
}

#[tokio::test]
async fn signed_in_login_page_bounces_without_database() {
    let (app, store) = offline_app();
    let cookie = seed_session(&store, user(43)).await;

    let response = app
        .oneshot(get_req("/login", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/dashboard"));
}

#[tokio::test]
async fn logout_clears_the_session() {
    let (app, store) = offline_app();
    let cookie = seed_session(&store, user(44)).await;

    let response = app
        .clone()
        .oneshot(post_form("/logout", "", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login?success=logged_out"));

    // The old cookie no longer identifies anyone.
    let response = app
        .oneshot(get_req("/dashboard", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(location(&response), Some("/login"));
}
