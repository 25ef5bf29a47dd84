use async_trait::async_trait;
use sqlx::PgPool;

use crate::repos::{error::RepoError, user_repo};
use crate::services::auth::{Principal, PrincipalStore};

/// `users` table backed principal lookup. Read-only.
#[derive(Clone, Debug)]
pub struct PgPrincipalStore {
    db: PgPool,
}

impl PgPrincipalStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PrincipalStore for PgPrincipalStore {
    async fn find_principal(&self, user_id: i64) -> Result<Option<Principal>, RepoError> {
        let row = user_repo::get(&self.db, user_id).await?;

        Ok(row.map(|u| Principal {
            username: Some(u.username),
            email: Some(u.email),
            ..Principal::new(u.id)
        }))
    }
}
