//! Factory: build the `AuthGate` from application `Config`.
use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::services::auth::{AuthGate, JwtValidator, principal_store::PgPrincipalStore};

pub fn build_auth_gate(config: &Config, db: PgPool) -> AuthGate {
    let principals = Arc::new(PgPrincipalStore::new(db));
    let validator = JwtValidator::new(
        config.secret_key.as_bytes(),
        config.access_token_leeway_seconds,
        principals,
    );

    AuthGate::new(Arc::new(validator))
}
