//! Seller dashboard and waiting room.
//!
//! Both handlers sit behind the access gate: by the time they run, an
//! unapproved seller has already been steered to `/waiting-approval` and an
//! approved one away from it. They still load the account themselves, since
//! the gate lets requests through when the approval lookup fails.

use axum::{Json, extract::State};
use serde::Serialize;

use kebumify_core::Role;

use crate::db::AccountRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{Account, CurrentUser};
use crate::state::AppState;

/// Greeting prefilled in the WhatsApp chat opened from the dashboard.
const WHATSAPP_GREETING: &str = "Halo, saya tertarik dengan produk di Kebumify";

/// Dashboard response body.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub account: Account,
    /// Link buyers use to start a WhatsApp chat with the seller.
    pub whatsapp_link: String,
}

/// Waiting room response body.
#[derive(Debug, Serialize)]
pub struct WaitingApprovalView {
    pub store_name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub message: &'static str,
}

/// Show the signed-in seller's own profile.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<DashboardView>> {
    let account = load_account(&state, &user).await?;
    let whatsapp_link = account.whatsapp.deep_link(Some(WHATSAPP_GREETING));

    Ok(Json(DashboardView {
        account,
        whatsapp_link,
    }))
}

/// Show the approval status of the signed-in seller.
pub async fn waiting_approval(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<WaitingApprovalView>> {
    let account = load_account(&state, &user).await?;
    let message = if account.approval().awaits_approval() {
        "Your store is waiting for admin approval."
    } else {
        "Your store has been approved."
    };

    Ok(Json(WaitingApprovalView {
        store_name: account.store_name,
        email: account.email.into_inner(),
        role: account.role,
        is_active: account.is_active,
        message,
    }))
}

async fn load_account(state: &AppState, user: &CurrentUser) -> Result<Account> {
    AccountRepository::new(state.pool())
        .get_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("account {}", user.id)))
}
