//! Weekly timetable API endpoints.

use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use entities::{Timetable, TimetableDays};
use record_store::RecordStore;

use super::ApiJson;
use crate::error::ServerResult;
use crate::middleware::AuthenticatedUser;
use crate::services::timetable;
use crate::state::AppState;

pub async fn get_timetable<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ServerResult<Json<Timetable>> {
    let timetable =
        timetable::get_timetable(&state.store, user.id, state.config.periods_per_day).await?;
    Ok(Json(timetable))
}

pub async fn save_timetable<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(days): ApiJson<TimetableDays>,
) -> ServerResult<Json<Timetable>> {
    let timetable =
        timetable::save_timetable(&state.store, user.id, days, state.config.periods_per_day)
            .await?;
    Ok(Json(timetable))
}

pub async fn clear_timetable<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ServerResult<Json<Timetable>> {
    let timetable =
        timetable::clear_timetable(&state.store, user.id, state.config.periods_per_day).await?;
    Ok(Json(timetable))
}
