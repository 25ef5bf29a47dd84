/*
 * Responsibility
 * - URL layout
 *   - /health             public
 *   - /u/v1/user[/{id}]   users (auth gate)
 *   - /a/v1/app           app info (auth gate)
 * - Decides which groups sit behind the bearer gate
 */
use axum::{Router, routing::get};

use crate::middleware::auth::access;
use crate::services::auth::AuthGate;
use crate::state::AppState;

use crate::api::v1::handlers::{
    app_info::app_info,
    health::health,
    users::{get_user, list_users},
};

pub fn routes(gate: AuthGate) -> Router<AppState> {
    let users = Router::new()
        .route("/user", get(list_users))
        .route("/user/{id}", get(get_user));

    let app = Router::new().route("/app", get(app_info));

    Router::new()
        .route("/health", get(health))
        .nest("/u/v1", access::apply(users, gate.clone()))
        .nest("/a/v1", access::apply(app, gate))
}
