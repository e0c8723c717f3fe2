//! Storefront and back-office client for the Piar Point ordering API.
//!
//! The remote API owns persistence, pricing, and stock accounting; this
//! client renders the catalog, runs the in-memory cart against the
//! last-fetched stock figures, and drives checkout, order tracking, and the
//! admin screens over plain request/response calls.

pub mod api;
pub mod auth;
pub mod config;
pub mod inventory;
pub mod orders;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;
pub mod ui;
pub mod users;
