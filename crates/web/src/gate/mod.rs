//! Access gate for the dashboard, auth pages and approval waiting room.
//!
//! Every request is classified by path, then checked against the caller's
//! session and (for signed-in callers) their approval record:
//!
//! ```text
//! 1. anonymous        + /dashboard*                    -> /login
//! 2. signed in        + /login* or /register*          -> /dashboard
//! 3. signed in, approval found:
//!    b. non-admin, inactive, not /waiting-approval*   -> /waiting-approval
//!    c. active, /waiting-approval*                     -> /dashboard
//! 4. anything else                                     -> pass through
//! ```
//!
//! The first matching rule wins. The approval store is consulted at most once
//! and only when rule 3 can still apply. Lookup failures never redirect.
//!
//! This module is pure decision logic; [`crate::middleware::access_gate`]
//! wires it into the HTTP pipeline.

mod approval;
mod route;

pub use approval::{ApprovalLookup, ApprovalSource, ApprovalStore};
pub use route::{
    DASHBOARD_PREFIX, LOGIN_PREFIX, REGISTER_PREFIX, RouteClass, WAITING_APPROVAL_PREFIX,
};

use kebumify_core::UserId;

/// Where the gate sends a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget {
    /// `/login`
    Login,
    /// `/dashboard`
    Dashboard,
    /// `/waiting-approval`
    WaitingApproval,
}

impl RedirectTarget {
    /// The path placed in the `Location` header.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => LOGIN_PREFIX,
            Self::Dashboard => DASHBOARD_PREFIX,
            Self::WaitingApproval => WAITING_APPROVAL_PREFIX,
        }
    }
}

/// Result of evaluating the gate for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Forward the request unchanged.
    PassThrough,
    /// Answer with a redirect instead of running the handler.
    Redirect(RedirectTarget),
}

/// Evaluate the gate for `path`.
///
/// `user_id` is the identity resolved from the session, or `None` for an
/// anonymous (or unresolvable) session.
pub async fn evaluate<A>(path: &str, user_id: Option<UserId>, approvals: &A) -> GateDecision
where
    A: ApprovalStore + Sync,
{
    let class = RouteClass::classify(path);
    if !class.is_gated() {
        return GateDecision::PassThrough;
    }

    let Some(user_id) = user_id else {
        return match class {
            RouteClass::Dashboard => GateDecision::Redirect(RedirectTarget::Login),
            _ => GateDecision::PassThrough,
        };
    };

    if class == RouteClass::LoginOrRegister {
        return GateDecision::Redirect(RedirectTarget::Dashboard);
    }

    let lookup = approvals.fetch_approval(user_id).await;
    decide_with_approval(class, &lookup)
}

/// Rule 3 of the gate, applied once the caller is known to be signed in.
#[must_use]
pub fn decide_with_approval(class: RouteClass, lookup: &ApprovalLookup) -> GateDecision {
    let Some(approval) = lookup.found() else {
        return GateDecision::PassThrough;
    };

    let in_waiting_room = class == RouteClass::WaitingApproval;
    if approval.awaits_approval() && !in_waiting_room {
        GateDecision::Redirect(RedirectTarget::WaitingApproval)
    } else if approval.is_active && in_waiting_room {
        GateDecision::Redirect(RedirectTarget::Dashboard)
    } else {
        GateDecision::PassThrough
    }
}
