//! Domain models for the web service.
//!
//! # Modules
//!
//! - `account` - Seller/admin accounts and their approval projection
//! - `session` - Identity stored in the session cookie's server-side record

pub mod account;
pub mod session;

pub use account::{Account, AccountApproval, AccountStats};
pub use session::{CurrentUser, keys as session_keys};
