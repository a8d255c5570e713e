//! Attendance entity model and DTOs.

use moalem_core::types::{CalendarDate, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An attendance row from the `attendance` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attendance {
    pub id: DbId,
    pub student_id: DbId,
    pub class_id: DbId,
    pub date: CalendarDate,
    pub status: String,
    pub notes: Option<String>,
    pub recorded_by: DbId,
    pub recorded_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An attendance row joined with the student's display name and number.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceWithStudent {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub attendance: Attendance,
    pub student_name: String,
    pub student_number: String,
}

/// One student's entry in a bulk attendance submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub student_id: DbId,
    pub status: String,
    pub notes: Option<String>,
}

/// Bulk attendance submission for one class and calendar day.
///
/// `date` stays a string so malformed days are reported with the same
/// message as query parameters.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAttendance {
    pub date: String,
    #[validate(length(min = 1, message = "records must not be empty"))]
    pub records: Vec<AttendanceEntry>,
}

/// DTO for correcting a single attendance entry.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAttendance {
    pub status: String,
    pub notes: Option<String>,
}

/// Per-status totals for one student over a window.
#[derive(Debug, Clone, Copy, Default, FromRow)]
pub struct StatusCounts {
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub excused: i64,
}

/// Recorded and present day counts for one active student.
#[derive(Debug, Clone, FromRow)]
pub struct StudentPresence {
    pub student_id: DbId,
    pub total_days: i64,
    pub present_days: i64,
}
