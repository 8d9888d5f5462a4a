//! Attendance record entity definitions.

use chrono::{DateTime, NaiveDate, Utc};
use projection::{AttendanceSummary, ProjectionError, Tally};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Name given to records created without one.
pub const DEFAULT_RECORD_NAME: &str = "Unnamed Record";

/// Whether a class was attended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkStatus {
    Present,
    Absent,
}

impl MarkStatus {
    /// Returns true for `Present`.
    pub fn is_present(self) -> bool {
        matches!(self, Self::Present)
    }
}

/// One immutable entry in a record's attendance history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceMark {
    /// Calendar day of the class.
    pub date: NaiveDate,
    /// Zero-based timetable period.
    pub period: u8,
    /// Attended or missed.
    pub status: MarkStatus,
    /// When the mark was recorded by the server.
    pub time: DateTime<Utc>,
}

/// Errors raised when mutating a record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    /// A mark already exists for this date and period.
    #[error("Attendance already marked for {date} period {period}")]
    DuplicateMark { date: NaiveDate, period: u8 },

    /// The tally rejected the change.
    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

/// One subject's attendance tally owned by a user.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// Owning user. Set at creation and never changed.
    pub owner_id: Uuid,
    /// Subject label.
    pub name: String,
    /// Classes held and missed.
    pub tally: Tally,
    /// Append-only mark history, unique per `(date, period)`.
    pub history: Vec<AttendanceMark>,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl AttendanceRecord {
    /// Creates a new record for `owner_id`.
    pub fn new(owner_id: Uuid, name: Option<String>, tally: Tally) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: normalize_name(name),
            tally,
            history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the name and tally. History is kept.
    pub fn replace(&mut self, name: Option<String>, tally: Tally) {
        self.name = normalize_name(name);
        self.tally = tally;
        self.updated_at = Utc::now();
    }

    /// Counts one more class held, missed unless `status` is present.
    pub fn record_class(&mut self, status: MarkStatus) -> Result<(), RecordError> {
        self.tally.record(status.is_present())?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Returns true if a mark exists for `date` and `period`.
    pub fn has_mark(&self, date: NaiveDate, period: u8) -> bool {
        self.history
            .iter()
            .any(|mark| mark.date == date && mark.period == period)
    }

    /// Appends a mark and counts the class.
    ///
    /// Fails without changing the record when the `(date, period)` pair has
    /// already been marked.
    pub fn mark(
        &mut self,
        date: NaiveDate,
        period: u8,
        status: MarkStatus,
        at: DateTime<Utc>,
    ) -> Result<&AttendanceMark, RecordError> {
        if self.has_mark(date, period) {
            return Err(RecordError::DuplicateMark { date, period });
        }

        self.tally.record(status.is_present())?;
        self.history.push(AttendanceMark {
            date,
            period,
            status,
            time: at,
        });
        self.updated_at = at;

        Ok(&self.history[self.history.len() - 1])
    }

    /// Derived statistics, recomputed from the tally on every call.
    pub fn summary(&self) -> AttendanceSummary {
        self.tally.summary()
    }
}

fn normalize_name(name: Option<String>) -> String {
    match name {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => DEFAULT_RECORD_NAME.to_string(),
    }
}
