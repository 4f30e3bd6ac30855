mod common;

use sea_orm::{EntityTrait, PaginatorTrait};

use bed_booking_backend::entities::bed::{BedStatus, BedType};
use bed_booking_backend::entities::booking::BookingStatus;
use bed_booking_backend::entities::{bed, booking, patient};
use bed_booking_backend::services::{admin, booking as booking_service};
use bed_booking_backend::store::NewHospital;
use bed_booking_backend::AppError;

use common::{a_patient, hospital, hospital_with_beds, setup_store, test_config};

#[tokio::test]
async fn icu_batch_is_numbered_from_one_and_available() {
    let store = setup_store().await;
    assert!(store.add_hospital(&hospital("City General", "Downtown")).await);
    let hospital_id = store.list_hospitals().await[0].id;

    let added = admin::add_beds(&store, hospital_id, BedType::Icu, 3).await.unwrap();
    assert_eq!(added.added, 3);
    assert!(added.is_complete());

    let beds = store.list_hospital_beds(hospital_id).await;
    let numbers: Vec<&str> = beds.iter().map(|b| b.bed_number.as_str()).collect();
    assert_eq!(numbers, vec!["ICU-1", "ICU-2", "ICU-3"]);
    assert!(beds.iter().all(|b| b.status == BedStatus::Available));
    assert!(beds.iter().all(|b| b.bed_type == BedType::Icu));
}

#[tokio::test]
async fn second_batch_repeats_labels() {
    let store = setup_store().await;
    let hospital_id = hospital_with_beds(&store, "City General", BedType::General, 2).await;

    admin::add_beds(&store, hospital_id, BedType::General, 1).await.unwrap();

    let labels: Vec<String> = store
        .list_hospital_beds(hospital_id)
        .await
        .into_iter()
        .map(|b| b.bed_number)
        .collect();
    assert_eq!(labels, vec!["General-1", "General-1", "General-2"]);
}

#[tokio::test]
async fn bed_batch_size_is_bounded() {
    let store = setup_store().await;
    let hospital_id = hospital_with_beds(&store, "City General", BedType::General, 1).await;

    for count in [0, admin::MAX_BEDS_PER_REQUEST + 1] {
        let err = admin::add_beds(&store, hospital_id, BedType::Icu, count).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
    assert_eq!(store.list_hospital_beds(hospital_id).await.len(), 1);
}

#[tokio::test]
async fn beds_for_unknown_hospital_are_not_found() {
    let store = setup_store().await;
    let err = admin::add_beds(&store, 77, BedType::Icu, 2).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn hospital_requires_name_and_location() {
    let store = setup_store().await;

    let err = admin::add_hospital(&store, &hospital("City General", "  ")).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    let err = admin::add_hospital(&store, &hospital("", "Downtown")).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(store.list_hospitals().await.is_empty());
}

#[tokio::test]
async fn blank_hospital_contact_details_are_stored_as_null() {
    let store = setup_store().await;
    let new = NewHospital {
        name: " City General ".to_string(),
        location: "Downtown".to_string(),
        contact_number: Some("  ".to_string()),
        email: Some("info@citygeneral.org".to_string()),
    };

    admin::add_hospital(&store, &new).await.unwrap();

    let stored = &store.list_hospitals().await[0];
    assert_eq!(stored.name, "City General");
    assert_eq!(stored.contact_number, None);
    assert_eq!(stored.email.as_deref(), Some("info@citygeneral.org"));
}

#[tokio::test]
async fn booking_registers_patient_and_occupies_bed() {
    let store = setup_store().await;
    let hospital_id = hospital_with_beds(&store, "City General", BedType::Icu, 3).await;
    let bed_id = store.list_available_beds(Some(hospital_id)).await[1].bed_id;

    let confirmation = booking_service::submit_booking(&store, bed_id, &a_patient())
        .await
        .unwrap();

    let patient = patient::Entity::find_by_id(confirmation.patient_id)
        .one(store.connection())
        .await
        .unwrap()
        .expect("patient row created");
    assert_eq!(patient.name, "A Patient");
    assert_eq!(patient.age, 40);
    assert_eq!(patient.email, "a@x.com");

    let bed = bed::Entity::find_by_id(bed_id).one(store.connection()).await.unwrap().unwrap();
    assert_eq!(bed.status, BedStatus::Occupied);

    let bookings = booking::Entity::find().all(store.connection()).await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].id, confirmation.booking_id);
    assert_eq!(bookings[0].bed_id, bed_id);
    assert_eq!(bookings[0].patient_id, confirmation.patient_id);
    assert_eq!(bookings[0].status, BookingStatus::Active);
}

#[tokio::test]
async fn cancelled_booking_disappears_from_patient_view() {
    let store = setup_store().await;
    hospital_with_beds(&store, "City General", BedType::Icu, 3).await;
    let bed_id = store.list_available_beds(None).await[0].bed_id;
    let confirmation = booking_service::submit_booking(&store, bed_id, &a_patient())
        .await
        .unwrap();

    let refreshed = booking_service::cancel_booking(&store, confirmation.booking_id, Some("a@x.com"))
        .await
        .unwrap()
        .expect("email given, so bookings are refreshed");
    assert!(refreshed.is_empty());

    let cancelled = booking::Entity::find_by_id(confirmation.booking_id)
        .one(store.connection())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);

    let bed = bed::Entity::find_by_id(bed_id).one(store.connection()).await.unwrap().unwrap();
    assert_eq!(bed.status, BedStatus::Available);
    assert!(store.list_patient_bookings(confirmation.patient_id).await.is_empty());
}

#[tokio::test]
async fn cancelling_unknown_booking_is_an_operation_failure() {
    let store = setup_store().await;
    let err = booking_service::cancel_booking(&store, 12, None).await.unwrap_err();
    assert!(matches!(err, AppError::OperationFailed(_)));
}

#[tokio::test]
async fn invalid_form_never_reaches_the_store() {
    let store = setup_store().await;
    hospital_with_beds(&store, "City General", BedType::General, 1).await;
    let bed_id = store.list_available_beds(None).await[0].bed_id;

    let mut form = a_patient();
    form.name = String::new();
    let err = booking_service::submit_booking(&store, bed_id, &form).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let mut form = a_patient();
    form.age = 121;
    let err = booking_service::submit_booking(&store, bed_id, &form).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    assert_eq!(patient::Entity::find().count(store.connection()).await.unwrap(), 0);
    assert_eq!(store.list_available_beds(None).await.len(), 1);
}

#[tokio::test]
async fn failed_booking_leaves_registered_patient_behind() {
    let store = setup_store().await;

    let err = booking_service::submit_booking(&store, 999, &a_patient()).await.unwrap_err();
    assert!(matches!(err, AppError::OperationFailed(_)));

    // No compensating delete for the patient row
    assert_eq!(patient::Entity::find().count(store.connection()).await.unwrap(), 1);
    assert_eq!(booking::Entity::find().count(store.connection()).await.unwrap(), 0);
}

#[tokio::test]
async fn bookings_are_found_by_email_across_patient_rows() {
    let store = setup_store().await;
    hospital_with_beds(&store, "City General", BedType::General, 3).await;
    let beds = store.list_available_beds(None).await;

    let first = booking_service::submit_booking(&store, beds[0].bed_id, &a_patient())
        .await
        .unwrap();
    let second = booking_service::submit_booking(&store, beds[1].bed_id, &a_patient())
        .await
        .unwrap();
    let mut other = a_patient();
    other.email = "b@x.com".to_string();
    booking_service::submit_booking(&store, beds[2].bed_id, &other).await.unwrap();

    let mine = booking_service::bookings_for_email(&store, " a@x.com ").await.unwrap();
    let ids: Vec<i32> = mine.iter().map(|b| b.booking_id).collect();
    assert_eq!(ids, vec![first.booking_id, second.booking_id]);

    assert!(booking_service::bookings_for_email(&store, "nobody@x.com")
        .await
        .unwrap()
        .is_empty());
    assert!(matches!(
        booking_service::bookings_for_email(&store, "   ").await,
        Err(AppError::Validation(_))
    ));
}

#[tokio::test]
async fn overview_counts_beds_per_type_and_status() {
    let store = setup_store().await;
    let city = hospital_with_beds(&store, "City General", BedType::Icu, 2).await;
    admin::add_beds(&store, city, BedType::General, 1).await.unwrap();
    assert!(store.add_hospital(&hospital("Empty Clinic", "Suburbs")).await);

    let bed_id = store.list_available_beds(Some(city)).await[0].bed_id;
    booking_service::submit_booking(&store, bed_id, &a_patient()).await.unwrap();

    let overview = admin::hospital_overview(&store).await;
    assert_eq!(overview.len(), 2);

    let city_view = &overview[0];
    assert_eq!(city_view.hospital.name, "City General");
    assert_eq!(city_view.beds.len(), 3);
    let icu = city_view.bed_counts.iter().find(|c| c.bed_type == BedType::Icu).unwrap();
    assert_eq!(icu.count, 2);
    let occupied = city_view
        .status_counts
        .iter()
        .find(|c| c.status == BedStatus::Occupied)
        .unwrap();
    assert_eq!(occupied.count, 1);

    let empty_view = &overview[1];
    assert!(empty_view.beds.is_empty());
    assert!(empty_view.bed_counts.is_empty());
}

#[tokio::test]
async fn seeded_admin_can_log_in() {
    let store = setup_store().await;
    let config = test_config();

    admin::seed_admin(&store, "admin", "s3cret").await.unwrap();
    // Seeding twice keeps the first account
    admin::seed_admin(&store, "admin", "changed").await.unwrap();

    let response = admin::login(&store, &config, "admin", "s3cret").await.unwrap();
    assert_eq!(response.admin.username, "admin");
    assert!(!response.token.is_empty());

    let stored = store.find_admin("admin").await.unwrap();
    assert_ne!(stored.password_hash, "s3cret");

    assert!(matches!(
        admin::login(&store, &config, "admin", "changed").await,
        Err(AppError::Unauthorized(_))
    ));
    assert!(matches!(
        admin::login(&store, &config, "ghost", "s3cret").await,
        Err(AppError::Unauthorized(_))
    ));
}
