//! Authenticated caller identity and the store it is resolved from.

use async_trait::async_trait;

use crate::repos::error::RepoError;

/// The identity attached to a request once the gate has accepted its bearer token.
///
/// - `id` is the internal user id (`users.id`)
/// - `username` / `email` are informational (logging, handlers), not used for authorization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: i64,
    pub username: Option<String>,
    pub email: Option<String>,
}

impl Principal {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            username: None,
            email: None,
        }
    }
}

/// Resolves a user id taken from a verified token into a `Principal`.
///
/// Returns:
/// - `Ok(Some(_))` => principal exists
/// - `Ok(None)`    => no such principal (token references a deleted/unknown user)
/// - `Err(_)`      => backend failure (caller must fail closed)
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    async fn find_principal(&self, user_id: i64) -> Result<Option<Principal>, RepoError>;
}
