//! Account domain types.
//!
//! These types represent validated domain objects separate from database row types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use kebumify_core::{Email, Role, UserId, WhatsappNumber};

/// A seller or admin account (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    /// Unique account ID.
    pub id: UserId,
    /// Login email address.
    pub email: Email,
    /// Display name of the seller's store.
    pub store_name: String,
    /// WhatsApp number buyers use to reach the seller.
    pub whatsapp: WhatsappNumber,
    /// Platform role.
    pub role: Role,
    /// Whether an admin has approved the account.
    pub is_active: bool,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// The approval projection consumed by the access gate.
    #[must_use]
    pub const fn approval(&self) -> AccountApproval {
        AccountApproval {
            is_active: self.is_active,
            role: self.role,
        }
    }
}

/// The two profile fields the access gate decides on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccountApproval {
    /// Whether an admin has approved the account.
    pub is_active: bool,
    /// Platform role.
    pub role: Role,
}

impl AccountApproval {
    /// Whether this account must wait for approval before using the dashboard.
    #[must_use]
    pub const fn awaits_approval(&self) -> bool {
        !self.role.is_admin() && !self.is_active
    }
}

/// Account counts shown on the admin panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AccountStats {
    /// All accounts.
    pub total: i64,
    /// Approved accounts (any role).
    pub active: i64,
    /// Non-admin accounts still waiting for approval.
    pub pending: i64,
    /// Admin accounts.
    pub admins: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_awaits_approval_only_for_inactive_members() {
        let cases = [
            (Role::Member, false, true),
            (Role::Member, true, false),
            (Role::Admin, false, false),
            (Role::Admin, true, false),
        ];
        for (role, is_active, expected) in cases {
            let approval = AccountApproval { is_active, role };
            assert_eq!(approval.awaits_approval(), expected, "{role} active={is_active}");
        }
    }
}
