//! Kebumify web service library.
//!
//! Seller registration, the approval waiting room, the seller dashboard and
//! the admin approval panel, all behind a path-based access gate. Exposed as
//! a library so routers can be assembled in tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod gate;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
