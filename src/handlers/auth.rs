use axum::{extract::State, Json};
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::services::admin::{self, LoginResponse};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login with admin username and password
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = admin::login(
        &state.store,
        &state.config,
        &payload.username,
        &payload.password,
    )
    .await?;

    tracing::info!(username = %response.admin.username, "Admin logged in");
    Ok(Json(response))
}
