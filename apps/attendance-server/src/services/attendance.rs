//! Attendance record lifecycle: create, update, daily increments, timetable
//! marks and deletion.
//!
//! Every lookup is scoped to the caller, so a record owned by someone else is
//! reported exactly like a missing one.

use api_types::{DailyUpdateRequest, MarkAttendanceRequest, RecordInput};
use chrono::Utc;
use entities::AttendanceRecord;
use record_store::RecordStore;
use uuid::Uuid;

use crate::error::{ServerError, ServerResult};

/// Parses a record ID from a path segment or request body.
pub fn parse_record_id(raw: &str) -> ServerResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| ServerError::Validation("Invalid ID format".to_string()))
}

/// Loads a record owned by `owner_id`.
pub async fn get_record<S: RecordStore>(
    store: &S,
    owner_id: Uuid,
    id: Uuid,
) -> ServerResult<AttendanceRecord> {
    store
        .get_record(owner_id, id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Record not found".to_string()))
}

/// Lists the caller's records.
pub async fn list_records<S: RecordStore>(
    store: &S,
    owner_id: Uuid,
) -> ServerResult<Vec<AttendanceRecord>> {
    Ok(store.list_records(owner_id).await?)
}

/// Validates the raw counts and stores a new record.
pub async fn create_record<S: RecordStore>(
    store: &S,
    owner_id: Uuid,
    input: RecordInput,
) -> ServerResult<AttendanceRecord> {
    let tally = input.tally()?;
    let record = store
        .create_record(AttendanceRecord::new(owner_id, input.name, tally))
        .await?;

    tracing::info!(
        record_id = %record.id,
        user_id = %owner_id,
        total_classes = tally.total_classes(),
        leaves_taken = tally.leaves_taken(),
        "Attendance record created"
    );

    Ok(record)
}

/// Replaces the name and counts of an existing record. History is untouched.
pub async fn update_record<S: RecordStore>(
    store: &S,
    owner_id: Uuid,
    id: Uuid,
    input: RecordInput,
) -> ServerResult<AttendanceRecord> {
    let tally = input.tally()?;
    let mut record = get_record(store, owner_id, id).await?;
    record.replace(input.name, tally);
    let record = store.update_record(record).await?;

    tracing::info!(record_id = %record.id, user_id = %owner_id, "Attendance record updated");

    Ok(record)
}

/// Counts one more class held without touching the history.
pub async fn daily_update<S: RecordStore>(
    store: &S,
    owner_id: Uuid,
    request: DailyUpdateRequest,
) -> ServerResult<AttendanceRecord> {
    let id = parse_record_id(&request.record_id)?;
    let mut record = get_record(store, owner_id, id).await?;
    record.record_class(request.status)?;
    let record = store.update_record(record).await?;

    tracing::info!(
        record_id = %record.id,
        user_id = %owner_id,
        present = request.status.is_present(),
        "Daily attendance recorded"
    );

    Ok(record)
}

/// Marks one timetable period. A `(date, period)` pair can be marked once.
pub async fn mark_attendance<S: RecordStore>(
    store: &S,
    owner_id: Uuid,
    request: MarkAttendanceRequest,
    periods_per_day: usize,
) -> ServerResult<AttendanceRecord> {
    if usize::from(request.period) >= periods_per_day {
        return Err(ServerError::Validation(format!(
            "period must be below {periods_per_day}"
        )));
    }

    let id = parse_record_id(&request.record_id)?;
    let mut record = get_record(store, owner_id, id).await?;
    record.mark(request.date, request.period, request.status, Utc::now())?;
    let record = store.update_record(record).await?;

    tracing::info!(
        record_id = %record.id,
        user_id = %owner_id,
        date = %request.date,
        period = request.period,
        present = request.status.is_present(),
        "Timetable attendance marked"
    );

    Ok(record)
}

/// Deletes a record and empties any timetable slots that pointed at it.
///
/// Slots are cleared first, so a failed timetable write leaves the record in
/// place.
pub async fn delete_record<S: RecordStore>(store: &S, owner_id: Uuid, id: Uuid) -> ServerResult<()> {
    get_record(store, owner_id, id).await?;

    if let Some(mut user) = store.get_user(owner_id).await? {
        let cleared = user
            .timetable
            .as_mut()
            .map_or(0, |timetable| timetable.clear_record(id));
        if cleared > 0 {
            user.updated_at = Utc::now();
            store.update_user(user).await?;
            tracing::debug!(record_id = %id, cleared, "Cleared timetable slots");
        }
    }

    store.delete_record(owner_id, id).await?;

    tracing::info!(record_id = %id, user_id = %owner_id, "Attendance record deleted");

    Ok(())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use entities::{MarkStatus, Timetable, User, Weekday};
    use projection::Needed;
    use record_store::{MemoryRecordStore, RecordStoreError, RecordStoreResult};

    use super::*;

    /// Memory store whose user writes always fail.
    struct ReadOnlyUsers(MemoryRecordStore);

    #[async_trait]
    impl RecordStore for ReadOnlyUsers {
        async fn create_user(&self, user: User) -> RecordStoreResult<User> {
            self.0.create_user(user).await
        }

        async fn get_user(&self, id: Uuid) -> RecordStoreResult<Option<User>> {
            self.0.get_user(id).await
        }

        async fn get_user_by_username(&self, username: &str) -> RecordStoreResult<Option<User>> {
            self.0.get_user_by_username(username).await
        }

        async fn get_user_by_email(&self, email: &str) -> RecordStoreResult<Option<User>> {
            self.0.get_user_by_email(email).await
        }

        async fn update_user(&self, _user: User) -> RecordStoreResult<User> {
            Err(RecordStoreError::Corrupt("users are read-only".to_string()))
        }

        async fn create_record(
            &self,
            record: AttendanceRecord,
        ) -> RecordStoreResult<AttendanceRecord> {
            self.0.create_record(record).await
        }

        async fn get_record(
            &self,
            owner_id: Uuid,
            id: Uuid,
        ) -> RecordStoreResult<Option<AttendanceRecord>> {
            self.0.get_record(owner_id, id).await
        }

        async fn list_records(&self, owner_id: Uuid) -> RecordStoreResult<Vec<AttendanceRecord>> {
            self.0.list_records(owner_id).await
        }

        async fn update_record(
            &self,
            record: AttendanceRecord,
        ) -> RecordStoreResult<AttendanceRecord> {
            self.0.update_record(record).await
        }

        async fn delete_record(&self, owner_id: Uuid, id: Uuid) -> RecordStoreResult<()> {
            self.0.delete_record(owner_id, id).await
        }
    }

    async fn setup() -> (MemoryRecordStore, Uuid) {
        let store = MemoryRecordStore::new();
        let user = store
            .create_user(User::new("asha", "asha@example.com", "hash"))
            .await
            .unwrap();
        (store, user.id)
    }

    fn mark_request(record_id: Uuid, period: u8, status: MarkStatus) -> MarkAttendanceRequest {
        MarkAttendanceRequest {
            record_id: record_id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
            period,
            status,
        }
    }

    #[tokio::test]
    async fn test_create_record_computes_summary() {
        let (store, owner) = setup().await;

        let record = create_record(&store, owner, RecordInput::new(Some("Maths".into()), 40, 10))
            .await
            .unwrap();

        let summary = record.summary();
        assert_eq!(record.name, "Maths");
        assert_eq!(summary.classes_attended, 30);
        assert_eq!(summary.percentage, 75.0);
        assert_eq!(summary.needed_for_75, Needed::Reached);
        assert_eq!(summary.needed_for_85, Needed::Needs(27));
    }

    #[tokio::test]
    async fn test_create_record_rejects_bad_counts() {
        let (store, owner) = setup().await;

        let result = create_record(&store, owner, RecordInput::new(None, 3, 4)).await;
        assert!(matches!(result, Err(ServerError::Validation(_))));
        assert!(list_records(&store, owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_history() {
        let (store, owner) = setup().await;
        let record = create_record(&store, owner, RecordInput::new(None, 10, 0))
            .await
            .unwrap();
        mark_attendance(&store, owner, mark_request(record.id, 0, MarkStatus::Present), 8)
            .await
            .unwrap();

        let updated = update_record(&store, owner, record.id, RecordInput::new(None, 0, 0))
            .await
            .unwrap();

        assert_eq!(updated.summary().percentage, 0.0);
        assert_eq!(updated.history.len(), 1);
    }

    #[tokio::test]
    async fn test_daily_absent() {
        let (store, owner) = setup().await;
        let record = create_record(&store, owner, RecordInput::new(None, 10, 0))
            .await
            .unwrap();

        let updated = daily_update(
            &store,
            owner,
            DailyUpdateRequest {
                record_id: record.id.to_string(),
                status: MarkStatus::Absent,
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.tally.total_classes(), 11);
        assert_eq!(updated.tally.leaves_taken(), 1);
        assert!(updated.history.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_mark_is_rejected() {
        let (store, owner) = setup().await;
        let record = create_record(&store, owner, RecordInput::new(None, 0, 0))
            .await
            .unwrap();

        mark_attendance(&store, owner, mark_request(record.id, 2, MarkStatus::Present), 8)
            .await
            .unwrap();
        let second =
            mark_attendance(&store, owner, mark_request(record.id, 2, MarkStatus::Absent), 8).await;

        assert!(matches!(second, Err(ServerError::Conflict(_))));
        let stored = get_record(&store, owner, record.id).await.unwrap();
        assert_eq!(stored.history.len(), 1);
        assert_eq!(stored.tally.total_classes(), 1);
        assert_eq!(stored.tally.leaves_taken(), 0);
    }

    #[tokio::test]
    async fn test_mark_period_out_of_range() {
        let (store, owner) = setup().await;
        let record = create_record(&store, owner, RecordInput::new(None, 0, 0))
            .await
            .unwrap();

        let result =
            mark_attendance(&store, owner, mark_request(record.id, 8, MarkStatus::Present), 8).await;
        assert!(matches!(result, Err(ServerError::Validation(_))));
    }

    #[tokio::test]
    async fn test_other_owner_sees_not_found() {
        let (store, owner) = setup().await;
        let intruder = Uuid::new_v4();
        let record = create_record(&store, owner, RecordInput::new(None, 5, 1))
            .await
            .unwrap();

        let update = update_record(&store, intruder, record.id, RecordInput::new(None, 0, 0)).await;
        assert!(matches!(update, Err(ServerError::NotFound(_))));

        let delete = delete_record(&store, intruder, record.id).await;
        assert!(matches!(delete, Err(ServerError::NotFound(_))));

        let stored = get_record(&store, owner, record.id).await.unwrap();
        assert_eq!(stored.tally.total_classes(), 5);
    }

    #[tokio::test]
    async fn test_delete_clears_timetable_slots() {
        let (store, owner) = setup().await;
        let record = create_record(&store, owner, RecordInput::new(None, 5, 1))
            .await
            .unwrap();

        let mut timetable = Timetable::empty(4);
        timetable.set(Weekday::Monday, 1, Some(record.id)).unwrap();
        timetable.set(Weekday::Friday, 3, Some(record.id)).unwrap();
        let user = store.get_user(owner).await.unwrap().unwrap();
        store.update_user(user.with_timetable(timetable)).await.unwrap();

        delete_record(&store, owner, record.id).await.unwrap();

        let user = store.get_user(owner).await.unwrap().unwrap();
        assert_eq!(user.timetable.unwrap().record_ids().count(), 0);
        assert!(matches!(
            get_record(&store, owner, record.id).await,
            Err(ServerError::NotFound(_))
        ));
    }

    #[test]
    fn test_parse_record_id() {
        assert!(parse_record_id("not-a-uuid").is_err());
        let id = Uuid::new_v4();
        assert_eq!(parse_record_id(&id.to_string()).unwrap(), id);
    }

    #[tokio::test]
    async fn test_failed_timetable_cleanup_keeps_record() {
        let memory = MemoryRecordStore::new();
        let user = memory
            .create_user(User::new("asha", "asha@example.com", "hash"))
            .await
            .unwrap();
        let record = create_record(&memory, user.id, RecordInput::new(None, 5, 1))
            .await
            .unwrap();
        let mut timetable = Timetable::empty(2);
        timetable.set(Weekday::Monday, 0, Some(record.id)).unwrap();
        memory.update_user(user.with_timetable(timetable)).await.unwrap();
        let owner = record.owner_id;

        let store = ReadOnlyUsers(memory);
        let result = delete_record(&store, owner, record.id).await;

        assert!(matches!(result, Err(ServerError::Database(_))));
        assert!(get_record(&store, owner, record.id).await.is_ok());
    }
}
