//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external
//! systems: the provider's token endpoint, the host's token store, the HTTP
//! stack, and the clock. Each port is a trait implemented by an adapter in
//! the infrastructure layer or by the host itself.

mod clock;
mod gateway;
mod token_store;
mod transport;

pub use clock::Clock;
pub use gateway::AuthorizationGateway;
pub use token_store::TokenStore;
pub use transport::ApiTransport;
