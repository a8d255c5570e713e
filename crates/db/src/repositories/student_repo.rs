//! Repository for the `students` table.

use moalem_core::dates::DateWindow;
use moalem_core::types::DbId;
use sqlx::PgPool;

use crate::models::student::{
    CreateStudent, Student, StudentCounts, StudentWithPresence, UpdateStudent,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_number, civil_id, first_name, last_name, arabic_name, \
                        date_of_birth, gender, nationality, address, class_id, enrollment_date, \
                        is_active, created_at, updated_at";

/// Same columns qualified with the `st` alias for joined queries.
const ST_COLUMNS: &str = "st.id, st.student_number, st.civil_id, st.first_name, st.last_name, \
                           st.arabic_name, st.date_of_birth, st.gender, st.nationality, \
                           st.address, st.class_id, st.enrollment_date, st.is_active, \
                           st.created_at, st.updated_at";

/// Attendance tallies for `st` in its own class between `$start` and `$end`.
fn presence_columns(start: u8, end: u8) -> String {
    format!(
        "(SELECT COUNT(*) FROM attendance a
          WHERE a.student_id = st.id AND a.class_id = st.class_id
            AND a.date BETWEEN ${start} AND ${end}) AS total_days,
         (SELECT COUNT(*) FROM attendance a
          WHERE a.student_id = st.id AND a.class_id = st.class_id
            AND a.date BETWEEN ${start} AND ${end} AND a.status = 'present') AS present_days"
    )
}

/// Provides CRUD operations for students.
pub struct StudentRepo;

impl StudentRepo {
    /// Enroll a new student into `class_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        class_id: DbId,
        input: &CreateStudent,
    ) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (student_number, civil_id, first_name, last_name, arabic_name, \
                                   date_of_birth, gender, nationality, address, class_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(&input.student_number)
            .bind(&input.civil_id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.arabic_name)
            .bind(input.date_of_birth)
            .bind(&input.gender)
            .bind(&input.nationality)
            .bind(&input.address)
            .bind(class_id)
            .fetch_one(pool)
            .await
    }

    /// Find an active student whose class is owned by `teacher_id`.
    ///
    /// The class may be soft-deleted.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        teacher_id: DbId,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "SELECT {ST_COLUMNS} FROM students st
             JOIN classes c ON c.id = st.class_id
             WHERE st.id = $1 AND st.is_active = true AND c.teacher_id = $2"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(teacher_id)
            .fetch_optional(pool)
            .await
    }

    /// Like [`Self::find_owned`], with class name and attendance tallies.
    pub async fn find_owned_with_presence(
        pool: &PgPool,
        id: DbId,
        teacher_id: DbId,
        window: &DateWindow,
    ) -> Result<Option<StudentWithPresence>, sqlx::Error> {
        let query = format!(
            "SELECT {ST_COLUMNS}, c.name AS class_name, {}
             FROM students st
             JOIN classes c ON c.id = st.class_id
             WHERE st.id = $1 AND st.is_active = true AND c.teacher_id = $2",
            presence_columns(3, 4)
        );
        sqlx::query_as::<_, StudentWithPresence>(&query)
            .bind(id)
            .bind(teacher_id)
            .bind(window.start)
            .bind(window.end)
            .fetch_optional(pool)
            .await
    }

    /// List a class's active students by student number, with attendance tallies.
    pub async fn list_for_class_with_presence(
        pool: &PgPool,
        class_id: DbId,
        window: &DateWindow,
    ) -> Result<Vec<StudentWithPresence>, sqlx::Error> {
        let query = format!(
            "SELECT {ST_COLUMNS}, NULL::text AS class_name, {}
             FROM students st
             WHERE st.class_id = $1 AND st.is_active = true
             ORDER BY st.student_number",
            presence_columns(2, 3)
        );
        sqlx::query_as::<_, StudentWithPresence>(&query)
            .bind(class_id)
            .bind(window.start)
            .bind(window.end)
            .fetch_all(pool)
            .await
    }

    /// Number of active students enrolled in a class.
    pub async fn count_active_in_class(pool: &PgPool, class_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM students WHERE class_id = $1 AND is_active = true",
        )
        .bind(class_id)
        .fetch_one(pool)
        .await
    }

    /// Whether an active student other than `exclude` holds this number.
    pub async fn number_taken(
        pool: &PgPool,
        student_number: &str,
        exclude: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM students
                WHERE student_number = $1 AND is_active = true
                  AND ($2::uuid IS NULL OR id <> $2)
             )",
        )
        .bind(student_number)
        .bind(exclude)
        .fetch_one(pool)
        .await
    }

    /// Of `ids`, return those that are active students of `class_id`.
    pub async fn active_ids_in_class(
        pool: &PgPool,
        class_id: DbId,
        ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT id FROM students
             WHERE class_id = $1 AND is_active = true AND id = ANY($2)",
        )
        .bind(class_id)
        .bind(ids)
        .fetch_all(pool)
        .await
    }

    /// Total, active, and per-gender active counts for a class.
    pub async fn class_counts(pool: &PgPool, class_id: DbId) -> Result<StudentCounts, sqlx::Error> {
        sqlx::query_as::<_, StudentCounts>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE is_active) AS active,
                    COUNT(*) FILTER (WHERE is_active AND gender = 'male') AS male,
                    COUNT(*) FILTER (WHERE is_active AND gender = 'female') AS female
             FROM students
             WHERE class_id = $1",
        )
        .bind(class_id)
        .fetch_one(pool)
        .await
    }

    /// Update a student. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no active row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStudent,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET
                student_number = COALESCE($2, student_number),
                civil_id = COALESCE($3, civil_id),
                first_name = COALESCE($4, first_name),
                last_name = COALESCE($5, last_name),
                arabic_name = COALESCE($6, arabic_name),
                date_of_birth = COALESCE($7, date_of_birth),
                gender = COALESCE($8, gender),
                nationality = COALESCE($9, nationality),
                address = COALESCE($10, address)
             WHERE id = $1 AND is_active = true
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(&input.student_number)
            .bind(&input.civil_id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.arabic_name)
            .bind(input.date_of_birth)
            .bind(&input.gender)
            .bind(&input.nationality)
            .bind(&input.address)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a student. Attendance history is kept.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE students SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
