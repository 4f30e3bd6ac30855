use axum::{
    extract::State,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::entities::hospital;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::services::booking::{self, BookingConfirmation};
use crate::store::{AvailableBed, NewPatient, PatientBooking};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct BedFilter {
    pub hospital_id: Option<i32>,
}

/// List Available beds, optionally for one hospital
pub async fn list_available_beds(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<BedFilter>,
) -> Json<Vec<AvailableBed>> {
    Json(booking::list_available_beds(&state.store, filter.hospital_id).await)
}

pub async fn list_hospitals(State(state): State<AppState>) -> Json<Vec<hospital::Model>> {
    Json(booking::list_hospitals(&state.store).await)
}

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub bed_id: i32,
    #[serde(flatten)]
    pub patient: NewPatient,
}

/// Register a patient and book a bed for them
pub async fn create_booking(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateBookingRequest>,
) -> AppResult<Json<BookingConfirmation>> {
    let confirmation =
        booking::submit_booking(&state.store, payload.bed_id, &payload.patient).await?;
    Ok(Json(confirmation))
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

/// List active bookings registered under an email
pub async fn list_bookings(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<EmailQuery>,
) -> AppResult<Json<Vec<PatientBooking>>> {
    let email = query.email.unwrap_or_default();
    let bookings = booking::bookings_for_email(&state.store, &email).await?;
    Ok(Json(bookings))
}

#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookings: Option<Vec<PatientBooking>>,
}

/// Cancel a booking
pub async fn cancel_booking(
    State(state): State<AppState>,
    AppPath(booking_id): AppPath<i32>,
    AppQuery(query): AppQuery<EmailQuery>,
) -> AppResult<Json<CancelResponse>> {
    let bookings =
        booking::cancel_booking(&state.store, booking_id, query.email.as_deref()).await?;

    Ok(Json(CancelResponse {
        message: "Booking cancelled".to_string(),
        bookings,
    }))
}
