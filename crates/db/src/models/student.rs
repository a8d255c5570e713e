//! Student entity model and DTOs.

use moalem_core::types::{CalendarDate, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A student row from the `students` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    pub student_number: String,
    pub civil_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub arabic_name: String,
    pub date_of_birth: CalendarDate,
    pub gender: String,
    pub nationality: String,
    pub address: Option<String>,
    pub class_id: DbId,
    pub enrollment_date: CalendarDate,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A student with attendance tallies over a trailing window.
///
/// `class_name` is only populated by single-student lookups.
#[derive(Debug, Clone, FromRow)]
pub struct StudentWithPresence {
    #[sqlx(flatten)]
    pub student: Student,
    pub class_name: Option<String>,
    pub total_days: i64,
    pub present_days: i64,
}

/// Roster counts for one class.
#[derive(Debug, Clone, Copy, Default, FromRow)]
pub struct StudentCounts {
    pub total: i64,
    pub active: i64,
    pub male: i64,
    pub female: i64,
}

/// DTO for enrolling a student into a class.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStudent {
    #[validate(length(min = 1, message = "student_number is required"))]
    pub student_number: String,
    pub civil_id: Option<String>,
    #[validate(length(min = 1, message = "first_name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "arabic_name is required"))]
    pub arabic_name: String,
    pub date_of_birth: CalendarDate,
    pub gender: String,
    #[validate(length(min = 1, message = "nationality is required"))]
    pub nationality: String,
    pub address: Option<String>,
}

/// DTO for updating a student. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateStudent {
    #[validate(length(min = 1, message = "student_number must not be empty"))]
    pub student_number: Option<String>,
    pub civil_id: Option<String>,
    #[validate(length(min = 1, message = "first_name must not be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "last_name must not be empty"))]
    pub last_name: Option<String>,
    #[validate(length(min = 1, message = "arabic_name must not be empty"))]
    pub arabic_name: Option<String>,
    pub date_of_birth: Option<CalendarDate>,
    pub gender: Option<String>,
    #[validate(length(min = 1, message = "nationality must not be empty"))]
    pub nationality: Option<String>,
    pub address: Option<String>,
}
