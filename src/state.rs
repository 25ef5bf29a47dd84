/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 * - Cheap to clone (Arc / pool handles inside)
 */
use std::sync::Arc;

use crate::api::v1::dto::app_info::AppInfoResponse;
use crate::services::auth::AuthGate;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub gate: AuthGate,
    pub app_info: Arc<AppInfoResponse>,
}

impl AppState {
    pub fn new(db: sqlx::PgPool, gate: AuthGate, app_info: AppInfoResponse) -> Self {
        Self {
            db,
            gate,
            app_info: Arc::new(app_info),
        }
    }
}
