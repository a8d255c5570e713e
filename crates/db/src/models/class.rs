//! Class entity model and DTOs.

use moalem_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A class row from the `classes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Class {
    pub id: DbId,
    pub name: String,
    pub teacher_id: DbId,
    pub subject_id: DbId,
    pub school_year: String,
    pub semester: String,
    pub class_section: String,
    pub max_students: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A class joined with its subject name and active roster size.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClassSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub class: Class,
    pub subject_name: Option<String>,
    pub student_count: i64,
}

/// DTO for creating a new class.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateClass {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub subject_id: DbId,
    #[validate(length(min = 1, message = "school_year is required"))]
    pub school_year: String,
    pub semester: String,
    #[validate(length(min = 1, message = "class_section is required"))]
    pub class_section: String,
    pub max_students: i32,
}

/// DTO for updating a class. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateClass {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "school_year must not be empty"))]
    pub school_year: Option<String>,
    pub semester: Option<String>,
    #[validate(length(min = 1, message = "class_section must not be empty"))]
    pub class_section: Option<String>,
    pub max_students: Option<i32>,
}
