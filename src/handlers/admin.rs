use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::entities::bed::{self, BedType};
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::services::admin::{self, BedsAdded, HospitalOverview};
use crate::store::NewHospital;
use crate::utils::jwt::Claims;
use crate::AppState;

// ============ Hospital Management ============

/// All hospitals with their bed distribution (admin)
pub async fn hospital_overview(State(state): State<AppState>) -> Json<Vec<HospitalOverview>> {
    Json(admin::hospital_overview(&state.store).await)
}

/// Register a hospital (admin)
pub async fn create_hospital(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppJson(payload): AppJson<NewHospital>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    admin::add_hospital(&state.store, &payload).await?;
    tracing::info!(admin = %claims.username, "Hospital registered");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "Hospital added successfully" })),
    ))
}

// ============ Bed Management ============

#[derive(Debug, Deserialize)]
pub struct AddBedsRequest {
    pub bed_type: BedType,
    pub count: u32,
}

/// Add a batch of beds of one type (admin)
pub async fn add_beds(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppPath(hospital_id): AppPath<i32>,
    AppJson(payload): AppJson<AddBedsRequest>,
) -> AppResult<(StatusCode, Json<BedsAdded>)> {
    let result = admin::add_beds(&state.store, hospital_id, payload.bed_type, payload.count).await?;
    tracing::info!(
        admin = %claims.username,
        hospital_id,
        added = result.added,
        "Beds provisioned"
    );

    let status = if result.is_complete() {
        StatusCode::CREATED
    } else {
        StatusCode::MULTI_STATUS
    };
    Ok((status, Json(result)))
}

/// Detailed bed list of one hospital (admin)
pub async fn hospital_beds(
    State(state): State<AppState>,
    AppPath(hospital_id): AppPath<i32>,
) -> AppResult<Json<Vec<bed::Model>>> {
    Ok(Json(admin::hospital_beds(&state.store, hospital_id).await?))
}
