//! Anicama lead ingestion server library.
//!
//! Exposes config, state, error handling, handlers and the router builder so
//! the binary entrypoint and the integration tests share one code path.

pub mod config;
pub mod cors;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
