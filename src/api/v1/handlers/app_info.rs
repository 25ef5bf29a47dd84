/*
 * Responsibility
 * - GET /a/v1/app (service name / version, behind the auth gate)
 */
use axum::{Json, extract::State};

use crate::{api::v1::dto::app_info::AppInfoResponse, state::AppState};

pub async fn app_info(State(state): State<AppState>) -> Json<AppInfoResponse> {
    Json(state.app_info.as_ref().clone())
}
