//! Authorization adapters.

mod oauth2_gateway;

pub use oauth2_gateway::OAuth2Gateway;
