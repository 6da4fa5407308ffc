//! Aviary Domain - Core types for the social API connector
//!
//! This crate defines the domain model for Aviary: `OAuth2` client
//! configuration, access tokens, callback handling, the remote endpoint
//! catalogue, and the error taxonomy. All types here are pure Rust with no
//! I/O dependencies.

pub mod api;
pub mod auth;
pub mod error;

pub use api::{ApiRequest, ApiResponse, Endpoint, FormPart, HttpMethod, Payload};
pub use auth::{AccessToken, CallbackOutcome, CallbackQuery, ClientCredentials};
pub use error::{ApiError, ApiResult, AuthError, AuthResult, TokenStoreError};
