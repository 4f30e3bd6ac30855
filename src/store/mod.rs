//! Relational store for hospitals, beds, patients, bookings and admins.
//!
//! Every public operation fails closed: a `DbErr` is logged here and the
//! caller receives `false`, `None` or an empty list, meaning the operation
//! did not happen. `book_bed` and `cancel_booking` run their statements in a
//! single transaction, so a failure part-way through leaves nothing behind.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::entities::bed::{BedStatus, BedType};
use crate::entities::booking::BookingStatus;
use crate::entities::patient::Gender;
use crate::entities::{admin, bed, booking, hospital, patient};

#[derive(Debug, Clone, Deserialize)]
pub struct NewHospital {
    pub name: String,
    pub location: String,
    pub contact_number: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub contact_number: String,
    pub email: String,
}

/// An Available bed together with the name of its hospital.
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct AvailableBed {
    pub bed_id: i32,
    pub hospital_id: i32,
    pub hospital_name: String,
    pub bed_number: String,
    pub bed_type: BedType,
    pub status: BedStatus,
}

/// An Active booking joined with its bed and hospital.
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct PatientBooking {
    pub booking_id: i32,
    pub bed_id: i32,
    pub patient_id: i32,
    pub hospital_name: String,
    pub bed_number: String,
    pub bed_type: BedType,
    pub booking_date: sea_orm::prelude::DateTimeWithTimeZone,
    pub status: BookingStatus,
}

#[derive(Clone)]
pub struct Store {
    db: DatabaseConnection,
}

fn fail_closed<T>(operation: &'static str, result: Result<T, DbErr>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!(operation, error = %e, "Store operation failed");
            None
        }
    }
}

impl Store {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    // ============ Hospitals ============

    pub async fn add_hospital(&self, new: &NewHospital) -> bool {
        let hospital = hospital::ActiveModel {
            name: Set(new.name.clone()),
            location: Set(new.location.clone()),
            contact_number: Set(new.contact_number.clone()),
            email: Set(new.email.clone()),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        match fail_closed("add_hospital", hospital.insert(&self.db).await) {
            Some(h) => {
                tracing::info!(hospital_id = h.id, name = %h.name, "Hospital added");
                true
            }
            None => false,
        }
    }

    pub async fn list_hospitals(&self) -> Vec<hospital::Model> {
        let result = hospital::Entity::find()
            .order_by_asc(hospital::Column::Id)
            .all(&self.db)
            .await;

        fail_closed("list_hospitals", result).unwrap_or_default()
    }

    pub async fn find_hospital(&self, hospital_id: i32) -> Option<hospital::Model> {
        let result = hospital::Entity::find_by_id(hospital_id).one(&self.db).await;
        fail_closed("find_hospital", result).flatten()
    }

    // ============ Beds ============

    /// Insert one Available bed. Fails when `hospital_id` does not exist.
    pub async fn add_bed(&self, hospital_id: i32, bed_number: &str, bed_type: BedType) -> bool {
        let bed = bed::ActiveModel {
            hospital_id: Set(hospital_id),
            bed_number: Set(bed_number.to_string()),
            bed_type: Set(bed_type),
            status: Set(BedStatus::Available),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        fail_closed("add_bed", bed.insert(&self.db).await).is_some()
    }

    /// Beds with status Available, optionally restricted to one hospital.
    pub async fn list_available_beds(&self, hospital_id: Option<i32>) -> Vec<AvailableBed> {
        let mut query = bed::Entity::find()
            .select_only()
            .column_as(bed::Column::Id, "bed_id")
            .column(bed::Column::HospitalId)
            .column_as(hospital::Column::Name, "hospital_name")
            .column(bed::Column::BedNumber)
            .column(bed::Column::BedType)
            .column(bed::Column::Status)
            .join(JoinType::InnerJoin, bed::Relation::Hospital.def())
            .filter(bed::Column::Status.eq(BedStatus::Available));

        if let Some(id) = hospital_id {
            query = query.filter(bed::Column::HospitalId.eq(id));
        }

        let result = query
            .order_by_asc(bed::Column::Id)
            .into_model::<AvailableBed>()
            .all(&self.db)
            .await;

        fail_closed("list_available_beds", result).unwrap_or_default()
    }

    /// Every bed of a hospital ordered by (type, number).
    pub async fn list_hospital_beds(&self, hospital_id: i32) -> Vec<bed::Model> {
        let result = bed::Entity::find()
            .filter(bed::Column::HospitalId.eq(hospital_id))
            .order_by_asc(bed::Column::BedType)
            .order_by_asc(bed::Column::BedNumber)
            .all(&self.db)
            .await;

        fail_closed("list_hospital_beds", result).unwrap_or_default()
    }

    // ============ Patients ============

    /// Always inserts a new row, even for an email seen before.
    pub async fn add_patient(&self, new: &NewPatient) -> Option<i32> {
        let patient = patient::ActiveModel {
            name: Set(new.name.clone()),
            age: Set(new.age),
            gender: Set(new.gender),
            contact_number: Set(new.contact_number.clone()),
            email: Set(new.email.clone()),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        fail_closed("add_patient", patient.insert(&self.db).await).map(|p| p.id)
    }

    pub async fn find_patient_ids_by_email(&self, email: &str) -> Vec<i32> {
        let result = patient::Entity::find()
            .filter(patient::Column::Email.eq(email))
            .order_by_asc(patient::Column::Id)
            .all(&self.db)
            .await;

        fail_closed("find_patient_ids_by_email", result)
            .unwrap_or_default()
            .into_iter()
            .map(|p| p.id)
            .collect()
    }

    // ============ Bookings ============

    /// Mark the bed Occupied and insert an Active booking, atomically.
    ///
    /// The bed's current status is not checked: booking an Occupied bed
    /// succeeds and leaves it with two Active bookings.
    pub async fn book_bed(&self, bed_id: i32, patient_id: i32) -> Option<i32> {
        let booking_id = fail_closed("book_bed", self.try_book_bed(bed_id, patient_id).await)?;
        tracing::info!(booking_id, bed_id, patient_id, "Bed booked");
        Some(booking_id)
    }

    async fn try_book_bed(&self, bed_id: i32, patient_id: i32) -> Result<i32, DbErr> {
        let txn = self.db.begin().await?;

        bed::Entity::update_many()
            .col_expr(bed::Column::Status, Expr::value(BedStatus::Occupied))
            .filter(bed::Column::Id.eq(bed_id))
            .exec(&txn)
            .await?;

        let booking = booking::ActiveModel {
            bed_id: Set(bed_id),
            patient_id: Set(patient_id),
            booking_date: Set(Utc::now().into()),
            status: Set(BookingStatus::Active),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(booking.id)
    }

    /// Cancel a booking and free its bed, atomically. No ownership check,
    /// and the bed is freed even if another Active booking references it.
    pub async fn cancel_booking(&self, booking_id: i32) -> bool {
        match fail_closed("cancel_booking", self.try_cancel_booking(booking_id).await) {
            Some(Some(bed_id)) => {
                tracing::info!(booking_id, bed_id, "Booking cancelled");
                true
            }
            Some(None) => {
                tracing::warn!(booking_id, "Cancel requested for unknown booking");
                false
            }
            None => false,
        }
    }

    async fn try_cancel_booking(&self, booking_id: i32) -> Result<Option<i32>, DbErr> {
        let txn = self.db.begin().await?;

        let Some(existing) = booking::Entity::find_by_id(booking_id).one(&txn).await? else {
            txn.rollback().await?;
            return Ok(None);
        };

        booking::Entity::update_many()
            .col_expr(booking::Column::Status, Expr::value(BookingStatus::Cancelled))
            .filter(booking::Column::Id.eq(booking_id))
            .exec(&txn)
            .await?;

        bed::Entity::update_many()
            .col_expr(bed::Column::Status, Expr::value(BedStatus::Available))
            .filter(bed::Column::Id.eq(existing.bed_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(Some(existing.bed_id))
    }

    pub async fn list_patient_bookings(&self, patient_id: i32) -> Vec<PatientBooking> {
        self.list_active_bookings(&[patient_id]).await
    }

    /// Active bookings of any of `patient_ids`, ordered by booking id.
    pub async fn list_active_bookings(&self, patient_ids: &[i32]) -> Vec<PatientBooking> {
        if patient_ids.is_empty() {
            return Vec::new();
        }

        let result = booking::Entity::find()
            .select_only()
            .column_as(booking::Column::Id, "booking_id")
            .column(booking::Column::BedId)
            .column(booking::Column::PatientId)
            .column_as(hospital::Column::Name, "hospital_name")
            .column(bed::Column::BedNumber)
            .column(bed::Column::BedType)
            .column(booking::Column::BookingDate)
            .column(booking::Column::Status)
            .join(JoinType::InnerJoin, booking::Relation::Bed.def())
            .join(JoinType::InnerJoin, bed::Relation::Hospital.def())
            .filter(booking::Column::PatientId.is_in(patient_ids.iter().copied()))
            .filter(booking::Column::Status.eq(BookingStatus::Active))
            .order_by_asc(booking::Column::Id)
            .into_model::<PatientBooking>()
            .all(&self.db)
            .await;

        fail_closed("list_active_bookings", result).unwrap_or_default()
    }

    // ============ Admins ============

    pub async fn find_admin(&self, username: &str) -> Option<admin::Model> {
        let result = admin::Entity::find()
            .filter(admin::Column::Username.eq(username))
            .one(&self.db)
            .await;

        fail_closed("find_admin", result).flatten()
    }

    pub async fn add_admin(
        &self,
        username: &str,
        password_hash: &str,
        hospital_id: Option<i32>,
    ) -> bool {
        let admin = admin::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(password_hash.to_string()),
            hospital_id: Set(hospital_id),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        match fail_closed("add_admin", admin.insert(&self.db).await) {
            Some(a) => {
                tracing::info!(admin_id = a.id, username = %a.username, "Admin account created");
                true
            }
            None => false,
        }
    }
}
