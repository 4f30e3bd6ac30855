use serde::Serialize;

use crate::entities::hospital;
use crate::error::{AppError, AppResult};
use crate::store::{AvailableBed, NewPatient, PatientBooking, Store};

pub const MAX_AGE: i32 = 120;

#[derive(Debug, Serialize)]
pub struct BookingConfirmation {
    pub booking_id: i32,
    pub patient_id: i32,
    pub bed_id: i32,
}

pub async fn list_available_beds(store: &Store, hospital_id: Option<i32>) -> Vec<AvailableBed> {
    store.list_available_beds(hospital_id).await
}

pub async fn list_hospitals(store: &Store) -> Vec<hospital::Model> {
    store.list_hospitals().await
}

/// Check the booking form and return it with surrounding whitespace removed.
pub fn validate_patient(patient: &NewPatient) -> AppResult<NewPatient> {
    let name = patient.name.trim();
    let contact_number = patient.contact_number.trim();
    let email = patient.email.trim();

    if name.is_empty() || contact_number.is_empty() || email.is_empty() {
        return Err(AppError::Validation("Please fill in all fields".to_string()));
    }

    if !(0..=MAX_AGE).contains(&patient.age) {
        return Err(AppError::Validation(format!(
            "Age must be between 0 and {}",
            MAX_AGE
        )));
    }

    Ok(NewPatient {
        name: name.to_string(),
        age: patient.age,
        gender: patient.gender,
        contact_number: contact_number.to_string(),
        email: email.to_string(),
    })
}

/// Register the patient, then book the bed for them.
///
/// There is no compensation step: when booking fails after the patient row
/// was written, that row stays behind without a booking.
pub async fn submit_booking(
    store: &Store,
    bed_id: i32,
    patient: &NewPatient,
) -> AppResult<BookingConfirmation> {
    let patient = validate_patient(patient)?;

    let patient_id = store.add_patient(&patient).await.ok_or_else(|| {
        AppError::OperationFailed("Failed to register patient. Please try again.".to_string())
    })?;

    let booking_id = store.book_bed(bed_id, patient_id).await.ok_or_else(|| {
        AppError::OperationFailed("Failed to book bed. Please try again.".to_string())
    })?;

    Ok(BookingConfirmation {
        booking_id,
        patient_id,
        bed_id,
    })
}

/// Active bookings of every patient row registered under `email`.
pub async fn bookings_for_email(store: &Store, email: &str) -> AppResult<Vec<PatientBooking>> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AppError::Validation("Please enter your email".to_string()));
    }

    let patient_ids = store.find_patient_ids_by_email(email).await;
    Ok(store.list_active_bookings(&patient_ids).await)
}

/// Cancel a booking. With an email, the caller's refreshed bookings are
/// returned alongside.
pub async fn cancel_booking(
    store: &Store,
    booking_id: i32,
    email: Option<&str>,
) -> AppResult<Option<Vec<PatientBooking>>> {
    if !store.cancel_booking(booking_id).await {
        return Err(AppError::OperationFailed(
            "Failed to cancel booking. Please try again.".to_string(),
        ));
    }

    match email {
        Some(email) => bookings_for_email(store, email).await.map(Some),
        None => Ok(None),
    }
}
