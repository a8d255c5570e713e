//! Repository for the `subjects` reference table.

use moalem_core::types::DbId;
use sqlx::PgPool;

use crate::models::subject::Subject;

const COLUMNS: &str = "id, name, name_arabic, code, school_type, grade_level, is_active, \
                        created_at, updated_at";

/// Read-only access to subjects.
pub struct SubjectRepo;

impl SubjectRepo {
    /// List active subjects ordered by name.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects WHERE is_active = true ORDER BY name");
        sqlx::query_as::<_, Subject>(&query).fetch_all(pool).await
    }

    /// Whether an active subject with this ID exists.
    pub async fn exists_active(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM subjects WHERE id = $1 AND is_active = true)",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }
}
