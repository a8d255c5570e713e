//! Repository for the `classes` table.
//!
//! Every teacher-facing lookup is scoped by `teacher_id` and ignores
//! soft-deleted rows, so "missing" and "not yours" look the same.

use moalem_core::types::DbId;
use sqlx::PgPool;

use crate::models::class::{Class, ClassSummary, CreateClass, UpdateClass};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, teacher_id, subject_id, school_year, semester, class_section, \
                        max_students, is_active, created_at, updated_at";

/// Same columns qualified with the `c` alias for joined queries.
const C_COLUMNS: &str = "c.id, c.name, c.teacher_id, c.subject_id, c.school_year, c.semester, \
                          c.class_section, c.max_students, c.is_active, c.created_at, c.updated_at";

/// The uniqueness key of an active class.
pub struct ClassConfig<'a> {
    pub teacher_id: DbId,
    pub subject_id: DbId,
    pub school_year: &'a str,
    pub semester: &'a str,
    pub class_section: &'a str,
}

/// Provides CRUD operations for classes.
pub struct ClassRepo;

impl ClassRepo {
    /// Insert a new class owned by `teacher_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        teacher_id: DbId,
        input: &CreateClass,
    ) -> Result<Class, sqlx::Error> {
        let query = format!(
            "INSERT INTO classes (name, teacher_id, subject_id, school_year, semester, \
                                  class_section, max_students)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Class>(&query)
            .bind(&input.name)
            .bind(teacher_id)
            .bind(input.subject_id)
            .bind(&input.school_year)
            .bind(&input.semester)
            .bind(&input.class_section)
            .bind(input.max_students)
            .fetch_one(pool)
            .await
    }

    /// Find an active class owned by `teacher_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        teacher_id: DbId,
    ) -> Result<Option<Class>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM classes
             WHERE id = $1 AND teacher_id = $2 AND is_active = true"
        );
        sqlx::query_as::<_, Class>(&query)
            .bind(id)
            .bind(teacher_id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active owned class with its subject name and roster size.
    pub async fn find_owned_summary(
        pool: &PgPool,
        id: DbId,
        teacher_id: DbId,
    ) -> Result<Option<ClassSummary>, sqlx::Error> {
        let query = format!(
            "{} WHERE c.id = $1 AND c.teacher_id = $2 AND c.is_active = true",
            summary_select()
        );
        sqlx::query_as::<_, ClassSummary>(&query)
            .bind(id)
            .bind(teacher_id)
            .fetch_optional(pool)
            .await
    }

    /// List the teacher's active classes, newest first.
    pub async fn list_for_teacher(
        pool: &PgPool,
        teacher_id: DbId,
    ) -> Result<Vec<ClassSummary>, sqlx::Error> {
        let query = format!(
            "{} WHERE c.teacher_id = $1 AND c.is_active = true ORDER BY c.created_at DESC",
            summary_select()
        );
        sqlx::query_as::<_, ClassSummary>(&query)
            .bind(teacher_id)
            .fetch_all(pool)
            .await
    }

    /// Whether another active class already uses this configuration.
    ///
    /// `exclude` skips the class being updated.
    pub async fn config_taken(
        pool: &PgPool,
        config: &ClassConfig<'_>,
        exclude: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM classes
                WHERE teacher_id = $1 AND subject_id = $2 AND school_year = $3
                  AND semester = $4 AND class_section = $5 AND is_active = true
                  AND ($6::uuid IS NULL OR id <> $6)
             )",
        )
        .bind(config.teacher_id)
        .bind(config.subject_id)
        .bind(config.school_year)
        .bind(config.semester)
        .bind(config.class_section)
        .bind(exclude)
        .fetch_one(pool)
        .await
    }

    /// Update a class. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no active row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClass,
    ) -> Result<Option<Class>, sqlx::Error> {
        let query = format!(
            "UPDATE classes SET
                name = COALESCE($2, name),
                school_year = COALESCE($3, school_year),
                semester = COALESCE($4, semester),
                class_section = COALESCE($5, class_section),
                max_students = COALESCE($6, max_students)
             WHERE id = $1 AND is_active = true
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Class>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.school_year)
            .bind(&input.semester)
            .bind(&input.class_section)
            .bind(input.max_students)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a class. Returns `true` if the row was updated.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE classes SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn summary_select() -> String {
    format!(
        "SELECT {C_COLUMNS}, s.name AS subject_name,
                (SELECT COUNT(*) FROM students st
                 WHERE st.class_id = c.id AND st.is_active = true) AS student_count
         FROM classes c
         LEFT JOIN subjects s ON s.id = c.subject_id"
    )
}
