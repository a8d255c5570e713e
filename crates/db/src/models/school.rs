//! School reference data.

use moalem_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A school row from the `schools` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct School {
    pub id: DbId,
    pub name: String,
    pub district: String,
    pub area: String,
    pub school_type: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
