use sea_orm::Iterable;
use serde::Serialize;

use crate::config::Config;
use crate::entities::bed::{self, BedStatus, BedType};
use crate::entities::hospital;
use crate::error::{AppError, AppResult};
use crate::store::{NewHospital, Store};
use crate::utils::jwt::create_token;
use crate::utils::password::{hash_password, verify_password};

pub const MAX_BEDS_PER_REQUEST: u32 = 100;

#[derive(Debug, Serialize)]
pub struct AdminInfo {
    pub id: i32,
    pub username: String,
    pub hospital_id: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminInfo,
}

/// Check credentials against the admin table and issue a token.
pub async fn login(
    store: &Store,
    config: &Config,
    username: &str,
    password: &str,
) -> AppResult<LoginResponse> {
    let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

    let admin = store.find_admin(username.trim()).await.ok_or_else(invalid)?;

    if !verify_password(password, &admin.password_hash)? {
        tracing::warn!(username = %admin.username, "Rejected admin login");
        return Err(invalid());
    }

    let token = create_token(
        admin.id,
        &admin.username,
        admin.hospital_id,
        &config.jwt_secret,
        config.jwt_expiration_hours,
    )?;

    Ok(LoginResponse {
        token,
        admin: AdminInfo {
            id: admin.id,
            username: admin.username,
            hospital_id: admin.hospital_id,
        },
    })
}

/// Create the admin account if no admin with that username exists.
pub async fn seed_admin(store: &Store, username: &str, password: &str) -> AppResult<()> {
    if store.find_admin(username).await.is_some() {
        return Ok(());
    }

    let password_hash = hash_password(password)?;
    if !store.add_admin(username, &password_hash, None).await {
        return Err(AppError::Internal(format!(
            "Failed to create admin account {}",
            username
        )));
    }

    Ok(())
}

pub async fn add_hospital(store: &Store, new: &NewHospital) -> AppResult<()> {
    let name = new.name.trim();
    let location = new.location.trim();
    if name.is_empty() || location.is_empty() {
        return Err(AppError::Validation(
            "Please fill in required fields".to_string(),
        ));
    }

    let blank_to_none = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let hospital = NewHospital {
        name: name.to_string(),
        location: location.to_string(),
        contact_number: blank_to_none(&new.contact_number),
        email: blank_to_none(&new.email),
    };

    if !store.add_hospital(&hospital).await {
        return Err(AppError::OperationFailed("Failed to add hospital".to_string()));
    }

    Ok(())
}

/// Label of the `index`-th (1-based) bed of a batch, e.g. `ICU-3`.
pub fn bed_label(bed_type: BedType, index: u32) -> String {
    format!("{}-{}", bed_type, index)
}

#[derive(Debug, Serialize)]
pub struct BedsAdded {
    pub hospital_id: i32,
    pub bed_type: BedType,
    pub requested: u32,
    pub added: u32,
}

impl BedsAdded {
    pub fn is_complete(&self) -> bool {
        self.added == self.requested
    }
}

/// Add `count` beds of one type, labelled `{type}-1` .. `{type}-{count}`.
///
/// Labels restart at 1 on every call, so a second batch of the same type
/// repeats earlier labels. A partial batch is reported, not rolled back.
pub async fn add_beds(
    store: &Store,
    hospital_id: i32,
    bed_type: BedType,
    count: u32,
) -> AppResult<BedsAdded> {
    if !(1..=MAX_BEDS_PER_REQUEST).contains(&count) {
        return Err(AppError::Validation(format!(
            "Number of beds must be between 1 and {}",
            MAX_BEDS_PER_REQUEST
        )));
    }

    if store.find_hospital(hospital_id).await.is_none() {
        return Err(AppError::NotFound("Hospital not found".to_string()));
    }

    let mut added = 0;
    for index in 1..=count {
        if store.add_bed(hospital_id, &bed_label(bed_type, index), bed_type).await {
            added += 1;
        }
    }

    if added < count {
        tracing::warn!(hospital_id, %bed_type, added, requested = count, "Partial bed batch");
    }

    Ok(BedsAdded {
        hospital_id,
        bed_type,
        requested: count,
        added,
    })
}

#[derive(Debug, Serialize, PartialEq)]
pub struct TypeCount {
    pub bed_type: BedType,
    pub count: usize,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct StatusCount {
    pub status: BedStatus,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct HospitalOverview {
    pub hospital: hospital::Model,
    pub bed_counts: Vec<TypeCount>,
    pub status_counts: Vec<StatusCount>,
    pub beds: Vec<bed::Model>,
}

pub fn summarize_beds(beds: &[bed::Model]) -> (Vec<TypeCount>, Vec<StatusCount>) {
    let bed_counts = BedType::iter()
        .map(|bed_type| TypeCount {
            bed_type,
            count: beds.iter().filter(|b| b.bed_type == bed_type).count(),
        })
        .filter(|c| c.count > 0)
        .collect();

    let status_counts = BedStatus::iter()
        .map(|status| StatusCount {
            status,
            count: beds.iter().filter(|b| b.status == status).count(),
        })
        .filter(|c| c.count > 0)
        .collect();

    (bed_counts, status_counts)
}

pub async fn hospital_beds(store: &Store, hospital_id: i32) -> AppResult<Vec<bed::Model>> {
    if store.find_hospital(hospital_id).await.is_none() {
        return Err(AppError::NotFound("Hospital not found".to_string()));
    }
    Ok(store.list_hospital_beds(hospital_id).await)
}

/// Every hospital with its bed distribution and detailed bed list.
pub async fn hospital_overview(store: &Store) -> Vec<HospitalOverview> {
    let mut overview = Vec::new();
    for hospital in store.list_hospitals().await {
        let beds = store.list_hospital_beds(hospital.id).await;
        let (bed_counts, status_counts) = summarize_beds(&beds);
        overview.push(HospitalOverview {
            hospital,
            bed_counts,
            status_counts,
            beds,
        });
    }
    overview
}
