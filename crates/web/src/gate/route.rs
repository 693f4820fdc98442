//! Route classification for the access gate.

/// Prefix of the seller dashboard (and the admin panel nested under it).
pub const DASHBOARD_PREFIX: &str = "/dashboard";
/// Prefix of the login page.
pub const LOGIN_PREFIX: &str = "/login";
/// Prefix of the registration page.
pub const REGISTER_PREFIX: &str = "/register";
/// Prefix of the approval waiting room.
pub const WAITING_APPROVAL_PREFIX: &str = "/waiting-approval";

/// Which gate rules apply to a request path.
///
/// Matching is a plain string prefix test, so `/dashboard-old` is classified
/// as [`RouteClass::Dashboard`] just like `/dashboard/products`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Seller dashboard and admin panel.
    Dashboard,
    /// Login and registration pages.
    LoginOrRegister,
    /// Waiting room for unapproved sellers.
    WaitingApproval,
    /// Everything else (public pages, health checks, assets).
    Unclassified,
}

impl RouteClass {
    /// Classify a request path.
    #[must_use]
    pub fn classify(path: &str) -> Self {
        if path.starts_with(DASHBOARD_PREFIX) {
            Self::Dashboard
        } else if path.starts_with(LOGIN_PREFIX) || path.starts_with(REGISTER_PREFIX) {
            Self::LoginOrRegister
        } else if path.starts_with(WAITING_APPROVAL_PREFIX) {
            Self::WaitingApproval
        } else {
            Self::Unclassified
        }
    }

    /// Whether the gate acts on this class at all.
    #[must_use]
    pub const fn is_gated(self) -> bool {
        !matches!(self, Self::Unclassified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_prefix() {
        for path in ["/dashboard", "/dashboard/", "/dashboard/products", "/dashboard/admin/stats"] {
            assert_eq!(RouteClass::classify(path), RouteClass::Dashboard, "{path}");
        }
    }

    #[test]
    fn test_login_and_register_prefix() {
        for path in ["/login", "/login?error=credentials", "/register", "/register/seller"] {
            assert_eq!(RouteClass::classify(path), RouteClass::LoginOrRegister, "{path}");
        }
    }

    #[test]
    fn test_waiting_approval_prefix() {
        assert_eq!(
            RouteClass::classify("/waiting-approval"),
            RouteClass::WaitingApproval
        );
        assert_eq!(
            RouteClass::classify("/waiting-approval/status"),
            RouteClass::WaitingApproval
        );
    }

    #[test]
    fn test_prefix_match_is_literal() {
        assert_eq!(RouteClass::classify("/dashboardx"), RouteClass::Dashboard);
        assert_eq!(RouteClass::classify("/loginhelp"), RouteClass::LoginOrRegister);
    }

    #[test]
    fn test_unclassified_paths() {
        for path in ["/", "/products", "/store/123", "/logout", "/health", "/admin", "/api/dashboard"] {
            let class = RouteClass::classify(path);
            assert_eq!(class, RouteClass::Unclassified, "{path}");
            assert!(!class.is_gated());
        }
    }
}
