//! Business logic services for the web service.
//!
//! # Services
//!
//! - `auth` - Seller registration, password login and admin bootstrap

pub mod auth;
