//! Repository for the `schools` reference table.

use moalem_core::types::DbId;
use sqlx::PgPool;

use crate::models::school::School;

const COLUMNS: &str = "id, name, district, area, school_type, is_active, created_at, updated_at";

/// Read-only access to schools.
pub struct SchoolRepo;

impl SchoolRepo {
    /// List active schools ordered by name.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<School>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM schools WHERE is_active = true ORDER BY name");
        sqlx::query_as::<_, School>(&query).fetch_all(pool).await
    }

    /// Whether an active school with this ID exists.
    pub async fn exists_active(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM schools WHERE id = $1 AND is_active = true)",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }
}
