//! Aviary Application - token lifecycle and session core
//!
//! This crate holds the two components hosts interact with: the
//! [`TokenAuthority`] owning the `OAuth2` authorization-code lifecycle, and
//! the per-request [`ApiSession`] that attaches a fresh token to every
//! remote call. External systems are reached exclusively through the port
//! traits in [`ports`].

pub mod authority;
pub mod ports;
pub mod session;
pub mod stores;

pub use authority::TokenAuthority;
pub use session::ApiSession;
pub use stores::MemoryTokenStore;
