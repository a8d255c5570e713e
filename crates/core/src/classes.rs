//! Class configuration rules: semesters and capacity.

use crate::error::CoreError;

pub const SEMESTER_FIRST: &str = "first";
pub const SEMESTER_SECOND: &str = "second";

/// All valid semesters.
pub const VALID_SEMESTERS: &[&str] = &[SEMESTER_FIRST, SEMESTER_SECOND];

/// Smallest allowed `max_students`.
pub const MIN_CAPACITY: i32 = 1;
/// Largest allowed `max_students`.
pub const MAX_CAPACITY: i32 = 50;

/// Validate that a semester string is one of the known semesters.
pub fn validate_semester(semester: &str) -> Result<(), CoreError> {
    if VALID_SEMESTERS.contains(&semester) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown semester: '{semester}'. Valid semesters: {}",
            VALID_SEMESTERS.join(", ")
        )))
    }
}

/// Validate that `max_students` is within `[MIN_CAPACITY, MAX_CAPACITY]`.
pub fn validate_capacity(max_students: i32) -> Result<(), CoreError> {
    if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&max_students) {
        return Err(CoreError::Validation(format!(
            "max_students must be between {MIN_CAPACITY} and {MAX_CAPACITY}, got {max_students}"
        )));
    }
    Ok(())
}

/// Reject enrollment once the active roster has reached the class capacity.
pub fn ensure_seat_available(active_students: i64, max_students: i32) -> Result<(), CoreError> {
    if active_students >= i64::from(max_students) {
        return Err(CoreError::Validation("Class is full".to_string()));
    }
    Ok(())
}
