//! Attendance status constants, validation, and rate aggregation.
//!
//! The database stores statuses as plain text guarded by a CHECK constraint;
//! these constants are the single source of truth for the accepted values.

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

pub const STATUS_PRESENT: &str = "present";
pub const STATUS_ABSENT: &str = "absent";
pub const STATUS_LATE: &str = "late";
pub const STATUS_EXCUSED: &str = "excused";

/// All valid attendance statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_PRESENT, STATUS_ABSENT, STATUS_LATE, STATUS_EXCUSED];

/// Validate that a status string is one of the four recognised values.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown attendance status: '{status}'. Valid statuses: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// Treat blank notes as absent so they are stored as NULL.
pub fn normalize_notes(notes: Option<&str>) -> Option<&str> {
    notes.map(str::trim).filter(|n| !n.is_empty())
}

// ---------------------------------------------------------------------------
// Rates
// ---------------------------------------------------------------------------

/// Percentage of recorded days on which the student was present.
///
/// Returns exactly `0.0` when nothing was recorded.
pub fn attendance_rate(present_days: i64, total_days: i64) -> f64 {
    if total_days <= 0 {
        return 0.0;
    }
    present_days as f64 / total_days as f64 * 100.0
}

/// Mean of per-student rates; `0.0` for an empty class.
pub fn average_rate(rates: &[f64]) -> f64 {
    if rates.is_empty() {
        return 0.0;
    }
    rates.iter().sum::<f64>() / rates.len() as f64
}

/// Per-status totals and the derived attendance rate for one student.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttendanceStats {
    pub total_days: i64,
    pub present_days: i64,
    pub absent_days: i64,
    pub late_days: i64,
    pub excused_days: i64,
    pub attendance_rate: f64,
}

impl AttendanceStats {
    /// Build stats from raw per-status counts.
    pub fn from_counts(present: i64, absent: i64, late: i64, excused: i64) -> Self {
        let total_days = present + absent + late + excused;
        Self {
            total_days,
            present_days: present,
            absent_days: absent,
            late_days: late,
            excused_days: excused,
            attendance_rate: attendance_rate(present, total_days),
        }
    }
}
