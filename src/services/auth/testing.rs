//! In-memory auth doubles for tests.
use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;

use super::{Principal, PrincipalStore, TokenError, TokenValidator};
use crate::repos::error::RepoError;

/// Token → outcome table. Unlisted tokens are `TokenError::Invalid`.
#[derive(Default)]
pub struct StaticValidator {
    outcomes: HashMap<String, Result<Principal, TokenError>>,
    calls: AtomicUsize,
}

impl StaticValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_principal(mut self, token: &str, principal: Principal) -> Self {
        self.outcomes.insert(token.to_string(), Ok(principal));
        self
    }

    pub fn with_error(mut self, token: &str, err: TokenError) -> Self {
        self.outcomes.insert(token.to_string(), Err(err));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenValidator for StaticValidator {
    async fn validate(&self, token: &str) -> Result<Principal, TokenError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcomes
            .get(token)
            .cloned()
            .unwrap_or(Err(TokenError::Invalid))
    }
}

#[derive(Default)]
pub struct MemoryPrincipalStore {
    principals: HashMap<i64, Principal>,
    fail: bool,
}

impl MemoryPrincipalStore {
    pub fn with(principals: impl IntoIterator<Item = Principal>) -> Self {
        Self {
            principals: principals.into_iter().map(|p| (p.id, p)).collect(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            principals: HashMap::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl PrincipalStore for MemoryPrincipalStore {
    async fn find_principal(&self, user_id: i64) -> Result<Option<Principal>, RepoError> {
        if self.fail {
            return Err(RepoError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(self.principals.get(&user_id).cloned())
    }
}
