//! API endpoints.

pub mod auth;
pub mod calculator;
pub mod records;
pub mod timetable;

use axum::{
    Router,
    extract::FromRequest,
    middleware,
    routing::{get, post},
};
use record_store::RecordStore;

use crate::error::ServerError;
use crate::middleware::auth_middleware;
use crate::state::SharedState;

/// JSON body extractor whose rejections render as `{"error": ...}`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct ApiJson<T>(pub T);

/// Creates the API router with all endpoints.
///
/// Record, timetable and profile routes sit behind the bearer token check.
pub fn create_router<S: RecordStore + 'static>(state: SharedState<S>) -> Router<SharedState<S>> {
    let protected = Router::new()
        // Account
        .route("/auth/me", get(auth::get_current_user))
        // Attendance records
        .route("/calculate", post(records::create_record))
        .route("/data", get(records::list_records))
        .route(
            "/data/:id",
            get(records::get_record)
                .put(records::update_record)
                .delete(records::delete_record),
        )
        .route("/daily", post(records::daily_update))
        .route("/mark-attendance", post(records::mark_attendance))
        // Timetable
        .route(
            "/timetable",
            get(timetable::get_timetable)
                .put(timetable::save_timetable)
                .delete(timetable::clear_timetable),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware::<S>));

    Router::new()
        // Auth endpoints
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        // Stateless calculator
        .route("/calculator", post(calculator::calculate))
        // Health check
        .route("/health", get(health_check))
        .merge(protected)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
