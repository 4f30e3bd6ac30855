use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{admin, auth, booking};
use crate::middleware::auth::require_admin;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Public routes: browse beds, book, view and cancel bookings
    let public_routes = Router::new()
        .route("/beds", get(booking::list_available_beds))
        .route("/hospitals", get(booking::list_hospitals))
        .route("/bookings", post(booking::create_booking))
        .route("/bookings", get(booking::list_bookings))
        .route("/bookings/{id}", delete(booking::cancel_booking));

    let auth_routes = Router::new().route("/login", post(auth::login));

    // Admin routes (requires bearer token)
    let admin_routes = Router::new()
        .route("/hospitals", get(admin::hospital_overview))
        .route("/hospitals", post(admin::create_hospital))
        .route("/hospitals/{id}/beds", get(admin::hospital_beds))
        .route("/hospitals/{id}/beds", post(admin::add_beds))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .nest("/api", public_routes)
        .nest("/api/admin", auth_routes.merge(admin_routes))
        .with_state(state)
}
