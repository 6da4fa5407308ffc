//! API transport port.

use async_trait::async_trait;
use aviary_domain::{ApiRequest, ApiResponse, ApiResult};

/// Port for one HTTP round trip against the remote REST API.
///
/// Implementations map transport-level failures (DNS, connection refused,
/// timeout) to `ApiError::Transport`. Non-2xx statuses are returned as
/// responses, not errors; interpreting them is the session's job.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Executes the request and returns the raw status and body.
    ///
    /// # Errors
    /// Returns `ApiError::Transport` when no response was obtained at all.
    async fn execute(&self, request: ApiRequest) -> ApiResult<ApiResponse>;
}
