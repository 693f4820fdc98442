//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. Request ID
//! 3. `TraceLayer` (request span)
//! 4. Security headers
//! 5. Session layer (tower-sessions with `PostgreSQL` store)
//! 6. Access gate (redirects by session and approval state)
//! 7. Rate limiting (login and registration only)

pub mod access_gate;
pub mod auth;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use access_gate::access_gate;
pub use auth::{
    RequireAdmin, RequireAuth, clear_current_user, resolve_current_user, set_current_user,
};
pub use rate_limit::auth_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::{secure_headers_middleware, security_headers_middleware};
pub use session::{create_session_layer, session_layer};
