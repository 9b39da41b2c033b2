//! Credential domain: the gateway API token and its lifecycle.

mod credential;
mod token;

pub use credential::{ConnectionStatus, GatewayCredential};
pub use token::{classify, validate_token, TokenClaims, TokenError, TokenHealth};
