//! Weekly timetable storage on the user account.

use std::collections::HashSet;

use chrono::Utc;
use entities::{Timetable, TimetableDays, User};
use record_store::RecordStore;
use uuid::Uuid;

use crate::error::{ServerError, ServerResult};

async fn load_user<S: RecordStore>(store: &S, user_id: Uuid) -> ServerResult<User> {
    store
        .get_user(user_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))
}

/// Returns the caller's timetable, resized to `periods_per_day`.
pub async fn get_timetable<S: RecordStore>(
    store: &S,
    user_id: Uuid,
    periods_per_day: usize,
) -> ServerResult<Timetable> {
    let user = load_user(store, user_id).await?;
    Ok(user
        .timetable
        .map(|timetable| timetable.conform(periods_per_day))
        .unwrap_or_else(|| Timetable::empty(periods_per_day)))
}

/// Replaces the caller's timetable.
///
/// Every referenced record must belong to the caller.
pub async fn save_timetable<S: RecordStore>(
    store: &S,
    user_id: Uuid,
    days: TimetableDays,
    periods_per_day: usize,
) -> ServerResult<Timetable> {
    let timetable = Timetable::from_days(days, periods_per_day)?;

    let referenced: HashSet<Uuid> = timetable.record_ids().collect();
    for record_id in referenced {
        if store.get_record(user_id, record_id).await?.is_none() {
            return Err(ServerError::NotFound(format!("Record not found: {record_id}")));
        }
    }

    let mut user = load_user(store, user_id).await?;
    user.timetable = Some(timetable.clone());
    user.updated_at = Utc::now();
    store.update_user(user).await?;

    tracing::info!(user_id = %user_id, "Timetable saved");

    Ok(timetable)
}

/// Removes the caller's timetable.
pub async fn clear_timetable<S: RecordStore>(
    store: &S,
    user_id: Uuid,
    periods_per_day: usize,
) -> ServerResult<Timetable> {
    let mut user = load_user(store, user_id).await?;
    if user.timetable.take().is_some() {
        user.updated_at = Utc::now();
        store.update_user(user).await?;
        tracing::info!(user_id = %user_id, "Timetable cleared");
    }

    Ok(Timetable::empty(periods_per_day))
}
