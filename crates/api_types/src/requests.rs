//! API request types.

use chrono::NaiveDate;
use entities::MarkStatus;
use projection::Tally;
use serde::{Deserialize, Serialize};

use crate::{require_count, CountInput, InputError};

// ============================================================================
// Auth Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username_or_email: String,
    pub password: String,
}

// ============================================================================
// Record Requests
// ============================================================================

/// Body of `POST /calculate` and `PUT /data/:id`.
///
/// Only raw inputs are read; derived fields sent by a client are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub total_classes: Option<CountInput>,
    #[serde(default)]
    pub leaves_taken: Option<CountInput>,
}

impl RecordInput {
    /// Creates an input from plain counts.
    pub fn new(name: Option<String>, total_classes: u32, leaves_taken: u32) -> Self {
        Self {
            name,
            total_classes: Some(total_classes.into()),
            leaves_taken: Some(leaves_taken.into()),
        }
    }

    /// Validates the counts and builds a tally.
    pub fn tally(&self) -> Result<Tally, InputError> {
        let total_classes = require_count(self.total_classes.as_ref(), "total_classes")?;
        let leaves_taken = require_count(self.leaves_taken.as_ref(), "leaves_taken")?;
        Ok(Tally::new(total_classes, leaves_taken)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyUpdateRequest {
    pub record_id: String,
    pub status: MarkStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    pub record_id: String,
    pub date: NaiveDate,
    pub period: u8,
    pub status: MarkStatus,
}
