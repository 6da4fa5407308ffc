//! API-call domain types.

mod endpoint;
mod payload;
mod request;

pub use endpoint::{Endpoint, HttpMethod};
pub use payload::{FormPart, Payload};
pub use request::{ApiRequest, ApiResponse};
