//! Clock port for time-related operations.

use chrono::{DateTime, Utc};

/// Port for getting the current time.
///
/// Token expiry decisions go through this abstraction so they can be tested
/// against a fixed instant.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}
