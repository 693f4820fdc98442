//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use kebumify_core::{Email, UserId};

use super::Account;

/// Session-stored user identity.
///
/// Only the identity lives in the session. Role and approval state are read
/// from the database on every gated request so an admin decision takes effect
/// on the seller's next navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Account ID.
    pub id: UserId,
    /// Login email address.
    pub email: Email,
}

impl From<&Account> for CurrentUser {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
