//! In-memory record store implementation.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use entities::{AttendanceRecord, User};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{RecordStore, RecordStoreError, RecordStoreResult};

/// In-memory record store for tests and ephemeral runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryRecordStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    records: Arc<RwLock<HashMap<Uuid, AttendanceRecord>>>,
}

impl MemoryRecordStore {
    /// Creates a new in-memory record store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    // =========================================================================
    // User operations
    // =========================================================================

    async fn create_user(&self, user: User) -> RecordStoreResult<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(RecordStoreError::already_exists("User", user.id.to_string()));
        }
        if users.values().any(|u| u.username == user.username) {
            return Err(RecordStoreError::already_exists("User", user.username));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(RecordStoreError::already_exists("User", user.email));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> RecordStoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> RecordStoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> RecordStoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn update_user(&self, user: User) -> RecordStoreResult<User> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(RecordStoreError::not_found("User", user.id.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    // =========================================================================
    // Attendance record operations
    // =========================================================================

    async fn create_record(&self, record: AttendanceRecord) -> RecordStoreResult<AttendanceRecord> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.id) {
            return Err(RecordStoreError::already_exists(
                "AttendanceRecord",
                record.id.to_string(),
            ));
        }
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get_record(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> RecordStoreResult<Option<AttendanceRecord>> {
        let records = self.records.read().await;
        Ok(records
            .get(&id)
            .filter(|r| r.owner_id == owner_id)
            .cloned())
    }

    async fn list_records(&self, owner_id: Uuid) -> RecordStoreResult<Vec<AttendanceRecord>> {
        let records = self.records.read().await;
        let mut result: Vec<AttendanceRecord> = records
            .values()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(result)
    }

    async fn update_record(&self, record: AttendanceRecord) -> RecordStoreResult<AttendanceRecord> {
        let mut records = self.records.write().await;
        let owned = records
            .get(&record.id)
            .is_some_and(|existing| existing.owner_id == record.owner_id);
        if !owned {
            return Err(RecordStoreError::not_found(
                "AttendanceRecord",
                record.id.to_string(),
            ));
        }
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn delete_record(&self, owner_id: Uuid, id: Uuid) -> RecordStoreResult<()> {
        let mut records = self.records.write().await;
        let owned = records
            .get(&id)
            .is_some_and(|existing| existing.owner_id == owner_id);
        if !owned {
            return Err(RecordStoreError::not_found("AttendanceRecord", id.to_string()));
        }
        records.remove(&id);
        Ok(())
    }
}
