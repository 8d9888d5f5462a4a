//! Attendance record API endpoints.

use std::sync::Arc;

use api_types::{
    AttendanceRecordView, DailyUpdateRequest, MarkAttendanceRequest, MessageResponse, RecordInput,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use record_store::RecordStore;

use super::ApiJson;
use crate::error::ServerResult;
use crate::middleware::AuthenticatedUser;
use crate::services::attendance;
use crate::state::AppState;

/// Creates a record from raw counts.
pub async fn create_record<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(input): ApiJson<RecordInput>,
) -> ServerResult<(StatusCode, Json<AttendanceRecordView>)> {
    let record = attendance::create_record(&state.store, user.id, input).await?;
    Ok((StatusCode::CREATED, Json(AttendanceRecordView::from(&record))))
}

/// Lists the caller's records.
pub async fn list_records<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ServerResult<Json<Vec<AttendanceRecordView>>> {
    let records = attendance::list_records(&state.store, user.id).await?;
    Ok(Json(records.iter().map(AttendanceRecordView::from).collect()))
}

/// Gets one record.
pub async fn get_record<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ServerResult<Json<AttendanceRecordView>> {
    let id = attendance::parse_record_id(&id)?;
    let record = attendance::get_record(&state.store, user.id, id).await?;
    Ok(Json(AttendanceRecordView::from(&record)))
}

/// Replaces a record's name and counts.
pub async fn update_record<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<RecordInput>,
) -> ServerResult<Json<AttendanceRecordView>> {
    let id = attendance::parse_record_id(&id)?;
    let record = attendance::update_record(&state.store, user.id, id, input).await?;
    Ok(Json(AttendanceRecordView::from(&record)))
}

/// Deletes a record.
pub async fn delete_record<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ServerResult<Json<MessageResponse>> {
    let id = attendance::parse_record_id(&id)?;
    attendance::delete_record(&state.store, user.id, id).await?;
    Ok(Json(MessageResponse::new("Record deleted successfully")))
}

/// Counts today's class as attended or missed.
pub async fn daily_update<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(request): ApiJson<DailyUpdateRequest>,
) -> ServerResult<Json<AttendanceRecordView>> {
    let record = attendance::daily_update(&state.store, user.id, request).await?;
    Ok(Json(AttendanceRecordView::from(&record)))
}

/// Marks a timetable period.
pub async fn mark_attendance<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(request): ApiJson<MarkAttendanceRequest>,
) -> ServerResult<Json<AttendanceRecordView>> {
    let record = attendance::mark_attendance(
        &state.store,
        user.id,
        request,
        state.config.periods_per_day,
    )
    .await?;
    Ok(Json(AttendanceRecordView::from(&record)))
}
