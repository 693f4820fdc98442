//! Authentication middleware and extractors.
//!
//! Provides session helpers and extractors for requiring a signed-in seller
//! or an admin in route handlers.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use kebumify_core::Role;

use crate::db::AccountRepository;
use crate::models::{Account, CurrentUser, session_keys};
use crate::state::AppState;

/// Resolve the signed-in user from a session.
///
/// A missing session layer, a store failure, or a value that no longer
/// deserializes are all treated as "not signed in".
pub async fn resolve_current_user(session: Option<&Session>) -> Option<CurrentUser> {
    let session = session?;
    match session.get::<CurrentUser>(session_keys::CURRENT_USER).await {
        Ok(user) => user,
        Err(e) => {
            tracing::debug!(error = %e, "Could not read current user from session");
            None
        }
    }
}

/// Extractor that requires a signed-in user.
///
/// If the user is not logged in, returns a redirect to the login page
/// for HTML requests, or 401 Unauthorized for API requests.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Error returned when authentication is required but the user is not logged in.
pub enum AuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl AuthRejection {
    fn for_path(path: &str) -> Self {
        if path.starts_with("/api/") {
            Self::Unauthorized
        } else {
            Self::RedirectToLogin
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        resolve_current_user(parts.extensions.get::<Session>())
            .await
            .map(Self)
            .ok_or_else(|| AuthRejection::for_path(parts.uri.path()))
    }
}

/// Extractor that requires an admin account.
///
/// The role is read from the database rather than the session, so demoting
/// an admin takes effect immediately.
///
/// # Example
///
/// ```rust,ignore
/// async fn admin_handler(RequireAdmin(admin): RequireAdmin) -> impl IntoResponse {
///     format!("Hello admin {}!", admin.store_name)
/// }
/// ```
pub struct RequireAdmin(pub Account);

/// Error returned when admin access is required.
pub enum AdminRejection {
    /// Not signed in.
    Auth(AuthRejection),
    /// Signed in, but not an admin (or the account no longer exists).
    Forbidden,
    /// The account could not be loaded.
    Unavailable,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Auth(rejection) => rejection.into_response(),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                "Only admins can access this resource",
            )
                .into_response(),
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AdminRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireAuth(user) = RequireAuth::from_request_parts(parts, state)
            .await
            .map_err(AdminRejection::Auth)?;

        let account = AccountRepository::new(state.pool())
            .get_by_id(user.id)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user.id, error = %e, "Failed to load admin account");
                AdminRejection::Unavailable
            })?
            .ok_or(AdminRejection::Forbidden)?;

        if account.role != Role::Admin {
            tracing::warn!(user_id = %user.id, "Non-admin attempted admin access");
            return Err(AdminRejection::Forbidden);
        }

        Ok(Self(account))
    }
}

/// Store the signed-in user in the session.
///
/// The session ID is cycled first so a pre-login session ID cannot be reused
/// after authentication.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Clear the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be deleted from the store.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
