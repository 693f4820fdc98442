//! Access gate middleware.
//!
//! Runs [`crate::gate::evaluate`] for every request and answers with a
//! `307 Temporary Redirect` when the gate says so. Must be layered inside the
//! session layer so a refreshed session cookie is still written on the
//! redirect response.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use super::auth::resolve_current_user;
use crate::gate::{self, ApprovalSource, GateDecision};

/// Gate dashboard, auth and waiting-room routes on session and approval state.
///
/// Requests outside the gated prefixes are forwarded untouched.
///
/// ```rust,ignore
/// Router::new()
///     .merge(routes::routes())
///     .layer(axum::middleware::from_fn_with_state(state.clone(), access_gate::<AppState>))
///     .layer(session_layer)
/// ```
pub async fn access_gate<S: ApprovalSource>(
    State(source): State<S>,
    request: Request,
    next: Next,
) -> Response {
    let user = resolve_current_user(request.extensions().get::<Session>()).await;
    let store = source.approval_store();
    let decision = gate::evaluate(request.uri().path(), user.as_ref().map(|u| u.id), &store).await;

    match decision {
        GateDecision::PassThrough => next.run(request).await,
        GateDecision::Redirect(target) => {
            tracing::debug!(
                path = %request.uri().path(),
                user_id = ?user.as_ref().map(|u| u.id),
                location = target.path(),
                "Access gate redirect"
            );
            Redirect::temporary(target.path()).into_response()
        }
    }
}
