//! Stock list server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! HTML views, WebSocket live updates) so integration tests and the binary
//! entrypoint can both access them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod notifications;
pub mod query;
pub mod routes;
pub mod state;
pub mod views;
pub mod ws;
