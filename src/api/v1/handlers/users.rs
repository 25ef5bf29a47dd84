/*
 * Responsibility
 * - GET /u/v1/user, GET /u/v1/user/{id}
 * - Caller identity comes from CurrentPrincipal (set by the auth gate)
 */
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    api::v1::{
        dto::users::{UserListResponse, UserResponse},
        extractors::CurrentPrincipal,
    },
    error::AppError,
    repos::user_repo,
    state::AppState,
};

pub async fn list_users(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Result<Json<UserListResponse>, AppError> {
    tracing::debug!(principal_id = principal.id, "listing users");

    let rows = user_repo::list(&state.db).await?;
    let userlist = rows.into_iter().map(UserResponse::from).collect();

    Ok(Json(UserListResponse { userlist }))
}

pub async fn get_user(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(raw_id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user_id = parse_user_id(&raw_id)?;
    tracing::debug!(principal_id = principal.id, user_id, "fetching user");

    let row = user_repo::get(&state.db, user_id)
        .await?
        .ok_or(AppError::not_found("user"))?;

    Ok(Json(row.into()))
}

fn parse_user_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("invalid user id: {raw}")))
}
