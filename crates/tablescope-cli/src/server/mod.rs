//! HTTP server: routing, state, handlers and error mapping.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
