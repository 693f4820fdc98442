//! Access gate wired through a real session layer.
//!
//! Handlers are stubs; approval records come from `FakeApprovals`.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::extract::{Path, Request};
use axum::http::StatusCode;
use axum::middleware::{Next, from_fn, from_fn_with_state};
use axum::response::Response;
use axum::routing::{get, post};
use tower::ServiceExt;
use tower_sessions::session::Id;
use tower_sessions::{MemoryStore, Session, SessionStore};

use kebumify_core::Role;
use kebumify_integration_tests::{
    FakeApprovals, UnreachableSessionStore, current_user, found, get as get_req, location,
    post_form, seed_session, session_cookie, user,
};
use kebumify_web::gate::ApprovalLookup;
use kebumify_web::middleware::{access_gate, session_layer, set_current_user};

async fn sign_in(session: Session, Path(n): Path<u64>) -> StatusCode {
    set_current_user(&session, &current_user(user(u128::from(n))))
        .await
        .unwrap();
    StatusCode::NO_CONTENT
}

async fn record_last_path(session: Session, request: Request, next: Next) -> Response {
    session
        .insert("last_path", request.uri().path())
        .await
        .unwrap();
    next.run(request).await
}

fn routes(source: &FakeApprovals) -> Router {
    Router::new()
        .route("/dashboard", get(|| async { "dashboard" }))
        .route("/dashboard/products", get(|| async { "products" }))
        .route("/dashboardx", get(|| async { "dashboardx" }))
        .route("/login", get(|| async { "login" }))
        .route("/register", get(|| async { "register" }))
        .route("/waiting-approval", get(|| async { "waiting" }))
        .route("/products", get(|| async { "catalogue" }))
        .route("/test/sign-in/{n}", post(sign_in))
        .layer(from_fn_with_state(source.clone(), access_gate::<FakeApprovals>))
}

fn app<St: SessionStore + Clone>(source: &FakeApprovals, store: St) -> Router {
    routes(source).layer(session_layer(store, false))
}

async fn status_and_location(
    app: &Router,
    path: &str,
    cookie: Option<&str>,
) -> (StatusCode, Option<String>) {
    let response = app.clone().oneshot(get_req(path, cookie)).await.unwrap();
    (response.status(), location(&response).map(str::to_owned))
}

fn redirect(to: &str) -> (StatusCode, Option<String>) {
    (StatusCode::TEMPORARY_REDIRECT, Some(to.to_owned()))
}

const PASS: (StatusCode, Option<String>) = (StatusCode::OK, None);

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn anonymous_dashboard_redirects_to_login() {
    let source = FakeApprovals::default();
    let app = app(&source, MemoryStore::default());

    assert_eq!(
        status_and_location(&app, "/dashboard/products", None).await,
        redirect("/login")
    );
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn signed_in_register_redirects_to_dashboard() {
    let source = FakeApprovals::new([(user(1), found(Role::Member, true))]);
    let store = MemoryStore::default();
    let cookie = seed_session(&store, user(1)).await;
    let app = app(&source, store);

    assert_eq!(
        status_and_location(&app, "/register", Some(&cookie)).await,
        redirect("/dashboard")
    );
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn unapproved_member_sent_to_waiting_room() {
    let source = FakeApprovals::new([(user(2), found(Role::Member, false))]);
    let store = MemoryStore::default();
    let cookie = seed_session(&store, user(2)).await;
    let app = app(&source, store);

    assert_eq!(
        status_and_location(&app, "/dashboard", Some(&cookie)).await,
        redirect("/waiting-approval")
    );
    assert_eq!(
        status_and_location(&app, "/waiting-approval", Some(&cookie)).await,
        PASS
    );
}

#[tokio::test]
async fn unapproved_admin_reaches_dashboard() {
    let source = FakeApprovals::new([(user(3), found(Role::Admin, false))]);
    let store = MemoryStore::default();
    let cookie = seed_session(&store, user(3)).await;
    let app = app(&source, store);

    assert_eq!(status_and_location(&app, "/dashboard", Some(&cookie)).await, PASS);
}

#[tokio::test]
async fn approved_member_leaves_waiting_room() {
    let source = FakeApprovals::new([(user(4), found(Role::Member, true))]);
    let store = MemoryStore::default();
    let cookie = seed_session(&store, user(4)).await;
    let app = app(&source, store);

    assert_eq!(
        status_and_location(&app, "/waiting-approval", Some(&cookie)).await,
        redirect("/dashboard")
    );
    assert_eq!(status_and_location(&app, "/dashboard", Some(&cookie)).await, PASS);
}

#[tokio::test]
async fn lookup_failure_fails_open() {
    let source = FakeApprovals::new([(user(5), ApprovalLookup::LookupError)]);
    let store = MemoryStore::default();
    let cookie = seed_session(&store, user(5)).await;
    let app = app(&source, store);

    assert_eq!(status_and_location(&app, "/dashboard", Some(&cookie)).await, PASS);
    assert_eq!(source.calls(), 1);
}

// =============================================================================
// Pass-through and prefix behavior
// =============================================================================

#[tokio::test]
async fn unclassified_paths_pass_untouched() {
    let source = FakeApprovals::new([(user(6), found(Role::Member, false))]);
    let store = MemoryStore::default();
    let cookie = seed_session(&store, user(6)).await;
    let app = app(&source, store);

    for cookie in [None, Some(cookie.as_str())] {
        assert_eq!(status_and_location(&app, "/products", cookie).await, PASS);
    }
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn prefixes_match_literally() {
    let source = FakeApprovals::default();
    let app = app(&source, MemoryStore::default());

    assert_eq!(
        status_and_location(&app, "/dashboardx", None).await,
        redirect("/login")
    );
}

#[tokio::test]
async fn unknown_session_cookie_is_anonymous() {
    let source = FakeApprovals::default();
    let app = app(&source, MemoryStore::default());

    assert_eq!(
        status_and_location(&app, "/dashboard", Some("kebumify_session=not-a-session-id")).await,
        redirect("/login")
    );
    assert_eq!(
        status_and_location(&app, "/login", Some("kebumify_session=AAAA")).await,
        PASS
    );
}

// =============================================================================
// Session cookie handling
// =============================================================================

#[tokio::test]
async fn sign_in_cookie_is_honoured_by_the_gate() {
    let source = FakeApprovals::new([(user(7), found(Role::Member, false))]);
    let app = app(&source, MemoryStore::default());

    let response = app
        .clone()
        .oneshot(post_form("/test/sign-in/7", "", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cookie = session_cookie(&response).unwrap();

    assert_eq!(
        status_and_location(&app, "/login", Some(&cookie)).await,
        redirect("/dashboard")
    );
    assert_eq!(
        status_and_location(&app, "/dashboard", Some(&cookie)).await,
        redirect("/waiting-approval")
    );
}

#[tokio::test]
async fn session_changes_survive_a_gate_redirect() {
    let source = FakeApprovals::new([(user(8), found(Role::Member, false))]);
    let store = MemoryStore::default();
    let cookie = seed_session(&store, user(8)).await;
    let app = routes(&source)
        .layer(from_fn(record_last_path))
        .layer(session_layer(store.clone(), false));

    let response = app
        .clone()
        .oneshot(get_req("/dashboard", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/waiting-approval"));
    assert_eq!(session_cookie(&response).as_deref(), Some(cookie.as_str()));

    let id: Id = cookie.split_once('=').unwrap().1.parse().unwrap();
    let record = store.load(&id).await.unwrap().unwrap();
    assert_eq!(record.data["last_path"], "/dashboard");

    // The seller is still signed in afterwards.
    assert_eq!(
        status_and_location(&app, "/register", Some(&cookie)).await,
        redirect("/dashboard")
    );
}

// =============================================================================
// Session store outages
// =============================================================================

#[tokio::test]
async fn unreachable_session_store_treats_caller_as_anonymous() {
    let source = FakeApprovals::new([(user(9), found(Role::Member, false))]);
    let app = app(&source, UnreachableSessionStore);
    let cookie = "kebumify_session=AAAAAAAAAAAAAAAAAAAAAA";

    assert_eq!(
        status_and_location(&app, "/dashboard", Some(cookie)).await,
        redirect("/login")
    );
    assert_eq!(status_and_location(&app, "/products", Some(cookie)).await, PASS);
    assert_eq!(status_and_location(&app, "/login", Some(cookie)).await, PASS);
    assert_eq!(source.calls(), 0);
}
