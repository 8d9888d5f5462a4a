//! SQLite record store implementation.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use entities::{AttendanceMark, AttendanceRecord, Timetable, User};
use projection::Tally;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    FromRow, Pool, Sqlite,
};
use uuid::Uuid;

use crate::{RecordStore, RecordStoreError, RecordStoreResult};

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    timetable TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
"#;

const CREATE_RECORDS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS attendance_records (
    id TEXT PRIMARY KEY,
    owner_id TEXT NOT NULL,
    name TEXT NOT NULL,
    total_classes INTEGER NOT NULL,
    leaves_taken INTEGER NOT NULL,
    history TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
"#;

const CREATE_RECORDS_OWNER_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_attendance_records_owner
ON attendance_records (owner_id, created_at)
"#;

const USER_COLUMNS: &str =
    "id, username, email, password_hash, timetable, created_at, updated_at";

const RECORD_COLUMNS: &str =
    "id, owner_id, name, total_classes, leaves_taken, history, created_at, updated_at";

/// Database row for User
#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    username: String,
    email: String,
    password_hash: String,
    timetable: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<UserRow> for User {
    type Error = RecordStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let timetable = row
            .timetable
            .as_deref()
            .map(|json| serde_json::from_str::<Timetable>(json))
            .transpose()?;

        Ok(User {
            id: parse_id(&row.id)?,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            timetable,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

/// Database row for AttendanceRecord
#[derive(Debug, FromRow)]
struct RecordRow {
    id: String,
    owner_id: String,
    name: String,
    total_classes: i64,
    leaves_taken: i64,
    history: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<RecordRow> for AttendanceRecord {
    type Error = RecordStoreError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let total_classes = u32::try_from(row.total_classes)
            .map_err(|_| RecordStoreError::Corrupt(format!("total_classes {}", row.total_classes)))?;
        let leaves_taken = u32::try_from(row.leaves_taken)
            .map_err(|_| RecordStoreError::Corrupt(format!("leaves_taken {}", row.leaves_taken)))?;
        let tally = Tally::new(total_classes, leaves_taken)
            .map_err(|e| RecordStoreError::Corrupt(e.to_string()))?;
        let history: Vec<AttendanceMark> = serde_json::from_str(&row.history)?;

        Ok(AttendanceRecord {
            id: parse_id(&row.id)?,
            owner_id: parse_id(&row.owner_id)?,
            name: row.name,
            tally,
            history,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

fn parse_id(value: &str) -> RecordStoreResult<Uuid> {
    value
        .parse()
        .map_err(|_| RecordStoreError::Corrupt(format!("invalid id {value}")))
}

fn parse_timestamp(value: &str) -> RecordStoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| RecordStoreError::Corrupt(format!("invalid timestamp {value}")))
}

// Fixed-width so that text ordering matches time ordering.
fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn map_unique_violation(e: sqlx::Error, entity_type: &'static str, id: &str) -> RecordStoreError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            RecordStoreError::already_exists(entity_type, id)
        }
        _ => RecordStoreError::Database(e),
    }
}

/// SQLite-backed record store.
#[derive(Debug, Clone)]
pub struct SqliteRecordStore {
    pool: Pool<Sqlite>,
}

impl SqliteRecordStore {
    /// Wraps an existing pool. Call [`SqliteRecordStore::init`] before use.
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Connects to `database_url` and creates the schema.
    ///
    /// In-memory databases are pinned to a single long-lived connection,
    /// since every SQLite connection to `:memory:` opens its own database.
    pub async fn connect(database_url: &str) -> RecordStoreResult<Self> {
        let options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let connect_options =
            SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = options.connect_with(connect_options).await?;
        let store = Self::new(pool);
        store.init().await?;

        tracing::info!("SQLite record store ready");

        Ok(store)
    }

    /// Creates tables and indexes if they do not exist.
    pub async fn init(&self) -> RecordStoreResult<()> {
        for statement in [
            CREATE_USERS_TABLE,
            CREATE_RECORDS_TABLE,
            CREATE_RECORDS_OWNER_INDEX,
        ] {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn fetch_user_where(
        &self,
        column: &str,
        value: &str,
    ) -> RecordStoreResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = ?");
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    // =========================================================================
    // User operations
    // =========================================================================

    async fn create_user(&self, user: User) -> RecordStoreResult<User> {
        let timetable = user
            .timetable
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, timetable, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(timetable)
        .bind(format_timestamp(&user.created_at))
        .bind(format_timestamp(&user.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "User", &user.username))?;

        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> RecordStoreResult<Option<User>> {
        self.fetch_user_where("id", &id.to_string()).await
    }

    async fn get_user_by_username(&self, username: &str) -> RecordStoreResult<Option<User>> {
        self.fetch_user_where("username", username).await
    }

    async fn get_user_by_email(&self, email: &str) -> RecordStoreResult<Option<User>> {
        self.fetch_user_where("email", email).await
    }

    async fn update_user(&self, user: User) -> RecordStoreResult<User> {
        let timetable = user
            .timetable
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = ?, email = ?, password_hash = ?, timetable = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(timetable)
        .bind(format_timestamp(&user.updated_at))
        .bind(user.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "User", &user.username))?;

        if result.rows_affected() == 0 {
            return Err(RecordStoreError::not_found("User", user.id.to_string()));
        }
        Ok(user)
    }

    // =========================================================================
    // Attendance record operations
    // =========================================================================

    async fn create_record(&self, record: AttendanceRecord) -> RecordStoreResult<AttendanceRecord> {
        let history = serde_json::to_string(&record.history)?;

        sqlx::query(
            r#"
            INSERT INTO attendance_records
                (id, owner_id, name, total_classes, leaves_taken, history, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id.to_string())
        .bind(record.owner_id.to_string())
        .bind(&record.name)
        .bind(i64::from(record.tally.total_classes()))
        .bind(i64::from(record.tally.leaves_taken()))
        .bind(history)
        .bind(format_timestamp(&record.created_at))
        .bind(format_timestamp(&record.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "AttendanceRecord", &record.id.to_string()))?;

        Ok(record)
    }

    async fn get_record(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> RecordStoreResult<Option<AttendanceRecord>> {
        let sql =
            format!("SELECT {RECORD_COLUMNS} FROM attendance_records WHERE id = ? AND owner_id = ?");
        let row: Option<RecordRow> = sqlx::query_as(&sql)
            .bind(id.to_string())
            .bind(owner_id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(AttendanceRecord::try_from).transpose()
    }

    async fn list_records(&self, owner_id: Uuid) -> RecordStoreResult<Vec<AttendanceRecord>> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM attendance_records WHERE owner_id = ? ORDER BY created_at, id"
        );
        let rows: Vec<RecordRow> = sqlx::query_as(&sql)
            .bind(owner_id.to_string())
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(AttendanceRecord::try_from).collect()
    }

    async fn update_record(&self, record: AttendanceRecord) -> RecordStoreResult<AttendanceRecord> {
        let history = serde_json::to_string(&record.history)?;

        let result = sqlx::query(
            r#"
            UPDATE attendance_records
            SET name = ?, total_classes = ?, leaves_taken = ?, history = ?, updated_at = ?
            WHERE id = ? AND owner_id = ?
            "#,
        )
        .bind(&record.name)
        .bind(i64::from(record.tally.total_classes()))
        .bind(i64::from(record.tally.leaves_taken()))
        .bind(history)
        .bind(format_timestamp(&record.updated_at))
        .bind(record.id.to_string())
        .bind(record.owner_id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RecordStoreError::not_found(
                "AttendanceRecord",
                record.id.to_string(),
            ));
        }
        Ok(record)
    }

    async fn delete_record(&self, owner_id: Uuid, id: Uuid) -> RecordStoreResult<()> {
        let result = sqlx::query("DELETE FROM attendance_records WHERE id = ? AND owner_id = ?")
            .bind(id.to_string())
            .bind(owner_id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RecordStoreError::not_found("AttendanceRecord", id.to_string()));
        }
        Ok(())
    }
}
