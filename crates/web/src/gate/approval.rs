//! Approval lookups consumed by the access gate.

use std::future::Future;

use kebumify_core::UserId;

use crate::models::AccountApproval;

/// Outcome of looking up an account's approval record.
///
/// Only [`ApprovalLookup::Found`] can make the gate redirect. Both other
/// variants fail open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalLookup {
    /// The account has an approval record.
    Found(AccountApproval),
    /// No profile row exists for the identity.
    NotFound,
    /// The store could not answer (query failed, row undecodable).
    LookupError,
}

impl ApprovalLookup {
    /// The approval record, if one was found.
    #[must_use]
    pub const fn found(&self) -> Option<&AccountApproval> {
        match self {
            Self::Found(approval) => Some(approval),
            Self::NotFound | Self::LookupError => None,
        }
    }
}

/// Source of approval records for gated requests.
///
/// Implementations never return an error: failures are folded into
/// [`ApprovalLookup::LookupError`] at the store boundary.
pub trait ApprovalStore {
    /// Fetch the approval record of `user_id`.
    fn fetch_approval(&self, user_id: UserId) -> impl Future<Output = ApprovalLookup> + Send;
}

/// Application state that can hand out an [`ApprovalStore`] per request.
///
/// The gate middleware is generic over this trait so the store handle is
/// built for each request from shared state and injected into
/// [`super::evaluate`].
pub trait ApprovalSource: Clone + Send + Sync + 'static {
    /// Build the store used for one request.
    fn approval_store(&self) -> impl ApprovalStore + Send + Sync + '_;
}
