//! Admin approval panel.
//!
//! Every handler takes [`RequireAdmin`], which re-reads the caller's role from
//! the database.

use axum::{
    Json,
    extract::{Path, State},
};

use kebumify_core::UserId;

use crate::db::AccountRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Account, AccountStats};
use crate::state::AppState;

/// Account counters.
pub async fn stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<AccountStats>> {
    Ok(Json(AccountRepository::new(state.pool()).stats().await?))
}

/// Sellers waiting for approval, oldest first.
pub async fn pending(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Account>>> {
    Ok(Json(
        AccountRepository::new(state.pool()).list_pending().await?,
    ))
}

/// Approve a seller account.
pub async fn approve(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<UserId>,
) -> Result<Json<Account>> {
    let account = AccountRepository::new(state.pool())
        .set_active(id, true)
        .await?;
    tracing::info!(admin_id = %admin.id, account_id = %id, "Account approved");
    Ok(Json(account))
}

/// Reject (or revoke) a seller account.
///
/// Admins cannot reject themselves.
pub async fn reject(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<UserId>,
) -> Result<Json<Account>> {
    if id == admin.id {
        return Err(AppError::BadRequest(
            "admins cannot reject their own account".to_owned(),
        ));
    }

    let account = AccountRepository::new(state.pool())
        .set_active(id, false)
        .await?;
    tracing::info!(admin_id = %admin.id, account_id = %id, "Account rejected");
    Ok(Json(account))
}
