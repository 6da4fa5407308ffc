//! Aviary Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined in the
//! application layer: the `OAuth2` token-endpoint gateway, the reqwest API
//! transport, and the system clock.

pub mod adapters;
pub mod auth;
pub mod http;

pub use adapters::SystemClock;
pub use auth::OAuth2Gateway;
pub use http::{ReqwestTransport, build_form};
