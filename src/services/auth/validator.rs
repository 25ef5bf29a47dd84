//! Token validation strategy used by the auth gate.
use async_trait::async_trait;
use thiserror::Error;

use super::Principal;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("invalid token")]
    Invalid,
    #[error("token expired")]
    Expired,
    #[error("no principal for token")]
    UnknownPrincipal,
    #[error("token backend failure: {0}")]
    Backend(String),
}

/// Verifies a bearer token and resolves it to a `Principal`.
///
/// Implementations may block on I/O (signature keys, principal lookup); the gate awaits
/// the call inline for the request being authorized. No retries.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    async fn validate(&self, token: &str) -> Result<Principal, TokenError>;
}
