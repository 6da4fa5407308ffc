//! Authorization domain types.

mod callback;
mod credentials;
mod token;

pub use callback::{CallbackOutcome, CallbackQuery};
pub use credentials::ClientCredentials;
pub use token::AccessToken;
