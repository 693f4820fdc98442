//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! # Auth
//! GET  /login                  - Login page (echoes ?error / ?success)
//! POST /login                  - Login action (rate limited)
//! GET  /register               - Register page
//! POST /register               - Register action (rate limited)
//! POST /logout                 - Logout action
//!
//! # Seller (signed in)
//! GET  /waiting-approval       - Approval status
//! GET  /dashboard              - Own profile and WhatsApp link
//!
//! # Admin
//! GET  /dashboard/admin/stats                  - Account counters
//! GET  /dashboard/admin/accounts/pending       - Accounts waiting for approval
//! POST /dashboard/admin/accounts/{id}/approve  - Approve an account
//! POST /dashboard/admin/accounts/{id}/reject   - Reject an account
//! ```
//!
//! Health checks live in the binary, outside the session layer.

pub mod admin;
pub mod auth;
pub mod dashboard;

use axum::{
    Router,
    routing::{get, post},
};
use tower_sessions::SessionStore;

use crate::middleware::{access_gate, rate_limit::RateLimiterLayer, session_layer};
use crate::state::AppState;

/// Create the admin routes router (nested under `/dashboard/admin`).
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(admin::stats))
        .route("/accounts/pending", get(admin::pending))
        .route("/accounts/{id}/approve", post(admin::approve))
        .route("/accounts/{id}/reject", post(admin::reject))
}

/// Create the credential-accepting routes (`POST /login`, `POST /register`).
///
/// Kept separate so the binary can put a rate limiter in front of them.
pub fn credential_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
}

/// Create all remaining routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page))
        .route("/register", get(auth::register_page))
        .route("/logout", post(auth::logout))
        .route("/waiting-approval", get(dashboard::waiting_approval))
        .route("/dashboard", get(dashboard::index))
        .nest("/dashboard/admin", admin_routes())
}

/// Assemble the gated application.
///
/// The access gate is layered inside the session layer, so redirects it
/// produces still carry the session cookie.
pub fn app_router<St>(
    state: AppState,
    store: St,
    secure_cookies: bool,
    limiter: Option<RateLimiterLayer>,
) -> Router
where
    St: SessionStore + Clone,
{
    let credentials = match limiter {
        Some(limiter) => credential_routes().route_layer(limiter),
        None => credential_routes(),
    };

    Router::new()
        .merge(routes())
        .merge(credentials)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            access_gate::<AppState>,
        ))
        .layer(session_layer(store, secure_cookies))
        .with_state(state)
}
