#![allow(dead_code)]

use sea_orm::{ConnectOptions, Database};

use bed_booking_backend::entities::bed::BedType;
use bed_booking_backend::entities::patient::Gender;
use bed_booking_backend::services::admin;
use bed_booking_backend::store::{NewHospital, NewPatient};
use bed_booking_backend::{db, AppState, Config, Store};

/// Fresh in-memory database with every table created.
pub async fn setup_store() -> Store {
    // One connection, so every query sees the same in-memory database
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    db::bootstrap(&db).await.expect("Failed to run migrations");
    Store::new(db)
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-secret".to_string(),
        jwt_expiration_hours: 1,
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        admin_username: "admin".to_string(),
        admin_password: "admin".to_string(),
    }
}

pub async fn setup_state() -> AppState {
    let store = setup_store().await;
    let config = test_config();
    admin::seed_admin(&store, &config.admin_username, &config.admin_password)
        .await
        .expect("Failed to seed admin");
    AppState { store, config }
}

pub fn hospital(name: &str, location: &str) -> NewHospital {
    NewHospital {
        name: name.to_string(),
        location: location.to_string(),
        contact_number: None,
        email: None,
    }
}

pub fn a_patient() -> NewPatient {
    NewPatient {
        name: "A Patient".to_string(),
        age: 40,
        gender: Gender::Male,
        contact_number: "555".to_string(),
        email: "a@x.com".to_string(),
    }
}

/// Register a hospital and `count` beds of `bed_type`; returns the hospital id.
pub async fn hospital_with_beds(store: &Store, name: &str, bed_type: BedType, count: u32) -> i32 {
    assert!(store.add_hospital(&hospital(name, "Downtown")).await);
    let hospital_id = store
        .list_hospitals()
        .await
        .into_iter()
        .find(|h| h.name == name)
        .map(|h| h.id)
        .expect("hospital was just added");

    let added = admin::add_beds(store, hospital_id, bed_type, count)
        .await
        .expect("beds should be added");
    assert!(added.is_complete());
    hospital_id
}
