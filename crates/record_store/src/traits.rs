//! Record store trait definitions.

use async_trait::async_trait;
use entities::{AttendanceRecord, User};
use uuid::Uuid;

use crate::RecordStoreResult;

/// Trait for user and attendance record storage.
///
/// Record reads, updates and deletes are scoped by owner: a record that
/// belongs to another user behaves exactly like a missing one.
#[async_trait]
pub trait RecordStore: Send + Sync {
    // =========================================================================
    // User operations
    // =========================================================================

    /// Creates a new user. Fails if the username or email is taken.
    async fn create_user(&self, user: User) -> RecordStoreResult<User>;

    /// Gets a user by ID.
    async fn get_user(&self, id: Uuid) -> RecordStoreResult<Option<User>>;

    /// Gets a user by username.
    async fn get_user_by_username(&self, username: &str) -> RecordStoreResult<Option<User>>;

    /// Gets a user by email.
    async fn get_user_by_email(&self, email: &str) -> RecordStoreResult<Option<User>>;

    /// Updates a user.
    async fn update_user(&self, user: User) -> RecordStoreResult<User>;

    // =========================================================================
    // Attendance record operations
    // =========================================================================

    /// Creates a new record.
    async fn create_record(&self, record: AttendanceRecord) -> RecordStoreResult<AttendanceRecord>;

    /// Gets a record by ID if it belongs to `owner_id`.
    async fn get_record(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> RecordStoreResult<Option<AttendanceRecord>>;

    /// Lists every record owned by `owner_id`, oldest first.
    async fn list_records(&self, owner_id: Uuid) -> RecordStoreResult<Vec<AttendanceRecord>>;

    /// Replaces a stored record. Fails with `NotFound` unless a record with
    /// the same ID and owner exists.
    async fn update_record(&self, record: AttendanceRecord) -> RecordStoreResult<AttendanceRecord>;

    /// Deletes a record owned by `owner_id`.
    async fn delete_record(&self, owner_id: Uuid, id: Uuid) -> RecordStoreResult<()>;
}
