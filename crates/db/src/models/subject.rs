//! Subject reference data.

use moalem_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A subject row from the `subjects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subject {
    pub id: DbId,
    pub name: String,
    pub name_arabic: String,
    pub code: String,
    pub school_type: String,
    pub grade_level: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
