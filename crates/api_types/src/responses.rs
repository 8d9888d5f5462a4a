//! API response types.

use chrono::{DateTime, Utc};
use entities::{AttendanceMark, AttendanceRecord, User};
use projection::AttendanceSummary;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    /// Seconds until the token expires.
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// An attendance record with every derived statistic filled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecordView {
    pub id: Uuid,
    pub owner: Uuid,
    pub name: String,
    #[serde(flatten)]
    pub summary: AttendanceSummary,
    #[serde(rename = "attendanceHistory")]
    pub attendance_history: Vec<AttendanceMark>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<&AttendanceRecord> for AttendanceRecordView {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            id: record.id,
            owner: record.owner_id,
            name: record.name.clone(),
            summary: record.summary(),
            attendance_history: record.history.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use projection::Tally;

    use super::*;

    #[test]
    fn test_record_view_json_shape() {
        let record = AttendanceRecord::new(
            Uuid::new_v4(),
            Some("Maths".into()),
            Tally::new(40, 10).unwrap(),
        );
        let value = serde_json::to_value(AttendanceRecordView::from(&record)).unwrap();

        assert_eq!(value["name"], "Maths");
        assert_eq!(value["total_classes"], 40);
        assert_eq!(value["leaves_taken"], 10);
        assert_eq!(value["classes_attended"], 30);
        assert_eq!(value["current_attendance_percentage"], 75.0);
        assert_eq!(value["neededFor75"], serde_json::json!({ "status": "reached" }));
        assert_eq!(
            value["neededFor85"],
            serde_json::json!({ "status": "needs", "classes": 27 })
        );
        assert_eq!(value["standing"], "warning");
        assert_eq!(value["attendanceHistory"], serde_json::json!([]));
        assert_eq!(value["owner"], record.owner_id.to_string());
    }
}
