//! Core types for Kebumify.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod role;
pub mod whatsapp;

pub use email::{Email, EmailError};
pub use id::UserId;
pub use role::{Role, RoleParseError};
pub use whatsapp::{WhatsappError, WhatsappNumber};
