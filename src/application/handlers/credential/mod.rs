//! Gateway credential lifecycle handlers.

mod check_credential;
mod persist_token;
mod revoke_token;

pub use check_credential::{CheckCredentialHandler, CredentialReport};
pub use persist_token::{PersistTokenCommand, PersistTokenError, PersistTokenHandler};
pub use revoke_token::RevokeTokenHandler;
