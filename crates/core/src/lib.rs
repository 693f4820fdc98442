//! Kebumify Core - Shared domain types.
//!
//! This crate provides the types shared by every Kebumify component:
//! - `web` - Seller dashboard, admin approval panel and access gate
//! - `cli` - Command-line tools for migrations and account management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. Database encoding is opt-in via the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for user IDs, emails, roles and WhatsApp numbers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
