//! Repository for the `users` table.

use moalem_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, civil_id, full_name, email, phone, password_hash, school_id, \
                        primary_subject_id, secondary_subject_id, school_type, is_active, \
                        created_at, updated_at";

/// Provides account lookups and registration for teachers.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (civil_id, full_name, email, phone, password_hash, school_id, \
                                primary_subject_id, secondary_subject_id, school_type)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.civil_id)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.password_hash)
            .bind(input.school_id)
            .bind(input.primary_subject_id)
            .bind(input.secondary_subject_id)
            .bind(&input.school_type)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by civil ID (exact match).
    pub async fn find_by_civil_id(
        pool: &PgPool,
        civil_id: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE civil_id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(civil_id)
            .fetch_optional(pool)
            .await
    }
}
