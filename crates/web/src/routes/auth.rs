//! Authentication route handlers.
//!
//! Handles password login, seller registration and logout. Form failures
//! redirect back to the form with an `?error=<code>` query parameter.

use axum::{
    Form, Json,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::{Account, CurrentUser};
use crate::services::auth::{AuthError, AuthService, RegistrationInput};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub store_name: String,
    pub whatsapp: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Body returned by the login and registration pages.
#[derive(Debug, Serialize)]
pub struct AuthPage {
    pub page: &'static str,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Error code placed in the `?error=` query parameter.
#[must_use]
pub const fn error_code(err: &AuthError) -> &'static str {
    match err {
        AuthError::InvalidCredentials => "credentials",
        AuthError::WeakPassword(_) => "weak_password",
        AuthError::InvalidEmail(_) => "invalid_email",
        AuthError::InvalidWhatsapp(_) => "invalid_whatsapp",
        AuthError::MissingStoreName => "store_name",
        AuthError::UserAlreadyExists => "email_taken",
        AuthError::Repository(_) | AuthError::PasswordHash => "failed",
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> Json<AuthPage> {
    Json(AuthPage {
        page: "login",
        error: query.error,
        success: query.success,
    })
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    match AuthService::new(state.pool())
        .login(&form.email, &form.password)
        .await
    {
        Ok(account) => sign_in(&session, &account, "/dashboard", "/login").await,
        Err(e) => {
            if matches!(e, AuthError::Repository(_) | AuthError::PasswordHash) {
                tracing::error!(error = %e, "Login failed");
            } else {
                tracing::info!(error = %e, "Login rejected");
            }
            Redirect::to(&format!("/login?error={}", error_code(&e))).into_response()
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> Json<AuthPage> {
    Json(AuthPage {
        page: "register",
        error: query.error,
        success: query.success,
    })
}

/// Handle registration form submission.
///
/// The new seller is signed in straight away and lands in the waiting room
/// until an admin approves the account.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.password != form.password_confirm {
        return Redirect::to("/register?error=password_mismatch").into_response();
    }

    let input = RegistrationInput {
        email: &form.email,
        password: &form.password,
        store_name: &form.store_name,
        whatsapp: &form.whatsapp,
    };

    match AuthService::new(state.pool()).register(input).await {
        Ok(account) => sign_in(&session, &account, "/waiting-approval", "/login").await,
        Err(e) => {
            tracing::warn!(error = %e, "Registration failed");
            Redirect::to(&format!("/register?error={}", error_code(&e))).into_response()
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Handle logout.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!(error = %e, "Failed to clear session");
    }
    clear_sentry_user();

    Redirect::to("/login?success=logged_out").into_response()
}

async fn sign_in(session: &Session, account: &Account, next: &str, on_error: &str) -> Response {
    let user = CurrentUser::from(account);
    if let Err(e) = set_current_user(session, &user).await {
        tracing::error!(error = %e, "Failed to set session");
        return Redirect::to(&format!("{on_error}?error=session")).into_response();
    }

    set_sentry_user(&user.id, Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, "Signed in");
    Redirect::to(next).into_response()
}
