//! Repository for the `attendance` table.
//!
//! A (student, class, date) triple has at most one row. The
//! `uq_attendance_student_class_date` constraint is the final guard; callers
//! pre-check with [`AttendanceRepo::exists_for_class_date`] for a friendlier
//! error.

use moalem_core::attendance::normalize_notes;
use moalem_core::dates::DateWindow;
use moalem_core::types::{CalendarDate, DbId};
use sqlx::PgPool;

use crate::models::attendance::{
    Attendance, AttendanceEntry, AttendanceWithStudent, StatusCounts, StudentPresence,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_id, class_id, date, status, notes, recorded_by, recorded_at, \
                        created_at, updated_at";

/// Same columns qualified with the `a` alias for joined queries.
const A_COLUMNS: &str = "a.id, a.student_id, a.class_id, a.date, a.status, a.notes, \
                          a.recorded_by, a.recorded_at, a.created_at, a.updated_at";

/// Provides attendance recording and reporting queries.
pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Whether any attendance has been recorded for the class on `date`.
    pub async fn exists_for_class_date(
        pool: &PgPool,
        class_id: DbId,
        date: CalendarDate,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM attendance WHERE class_id = $1 AND date = $2)",
        )
        .bind(class_id)
        .bind(date)
        .fetch_one(pool)
        .await
    }

    /// Insert one row per entry inside a single transaction.
    ///
    /// Any failure, including a unique violation on a later entry, rolls back
    /// every earlier insert. Returns the new IDs in input order.
    pub async fn create_batch(
        pool: &PgPool,
        class_id: DbId,
        date: CalendarDate,
        recorded_by: DbId,
        entries: &[AttendanceEntry],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut ids = Vec::with_capacity(entries.len());

        for entry in entries {
            let id: DbId = sqlx::query_scalar(
                "INSERT INTO attendance (student_id, class_id, date, status, notes, recorded_by)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 RETURNING id",
            )
            .bind(entry.student_id)
            .bind(class_id)
            .bind(date)
            .bind(&entry.status)
            .bind(normalize_notes(entry.notes.as_deref()))
            .bind(recorded_by)
            .fetch_one(&mut *tx)
            .await?;
            ids.push(id);
        }

        tx.commit().await?;
        tracing::debug!(%class_id, %date, rows = ids.len(), "Attendance batch committed");
        Ok(ids)
    }

    /// Find an attendance row whose class is active and owned by `teacher_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        teacher_id: DbId,
    ) -> Result<Option<Attendance>, sqlx::Error> {
        let query = format!(
            "SELECT {A_COLUMNS} FROM attendance a
             JOIN classes c ON c.id = a.class_id
             WHERE a.id = $1 AND c.teacher_id = $2 AND c.is_active = true"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(id)
            .bind(teacher_id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite status and notes of one row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        status: &str,
        notes: Option<&str>,
    ) -> Result<Option<Attendance>, sqlx::Error> {
        let query = format!(
            "UPDATE attendance SET status = $2, notes = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(id)
            .bind(status)
            .bind(normalize_notes(notes))
            .fetch_optional(pool)
            .await
    }

    /// All rows for a class on one day, ordered by student number.
    ///
    /// Rows of soft-deleted students are included.
    pub async fn list_for_class_date(
        pool: &PgPool,
        class_id: DbId,
        date: CalendarDate,
    ) -> Result<Vec<AttendanceWithStudent>, sqlx::Error> {
        let query = format!(
            "SELECT {A_COLUMNS},
                    st.first_name || ' ' || st.last_name AS student_name,
                    st.student_number
             FROM attendance a
             JOIN students st ON st.id = a.student_id
             WHERE a.class_id = $1 AND a.date = $2
             ORDER BY st.student_number"
        );
        sqlx::query_as::<_, AttendanceWithStudent>(&query)
            .bind(class_id)
            .bind(date)
            .fetch_all(pool)
            .await
    }

    /// A student's rows within the window, newest first.
    pub async fn list_for_student(
        pool: &PgPool,
        student_id: DbId,
        window: &DateWindow,
    ) -> Result<Vec<Attendance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance
             WHERE student_id = $1 AND date BETWEEN $2 AND $3
             ORDER BY date DESC"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(student_id)
            .bind(window.start)
            .bind(window.end)
            .fetch_all(pool)
            .await
    }

    /// Per-status totals for a student within the window.
    pub async fn status_counts_for_student(
        pool: &PgPool,
        student_id: DbId,
        window: &DateWindow,
    ) -> Result<StatusCounts, sqlx::Error> {
        sqlx::query_as::<_, StatusCounts>(
            "SELECT COUNT(*) FILTER (WHERE status = 'present') AS present,
                    COUNT(*) FILTER (WHERE status = 'absent') AS absent,
                    COUNT(*) FILTER (WHERE status = 'late') AS late,
                    COUNT(*) FILTER (WHERE status = 'excused') AS excused
             FROM attendance
             WHERE student_id = $1 AND date BETWEEN $2 AND $3",
        )
        .bind(student_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_one(pool)
        .await
    }

    /// Recorded and present days per active student of the class.
    ///
    /// Students with no rows in the window are returned with zero counts.
    pub async fn presence_for_class(
        pool: &PgPool,
        class_id: DbId,
        window: &DateWindow,
    ) -> Result<Vec<StudentPresence>, sqlx::Error> {
        sqlx::query_as::<_, StudentPresence>(
            "SELECT st.id AS student_id,
                    COUNT(a.id) AS total_days,
                    COUNT(a.id) FILTER (WHERE a.status = 'present') AS present_days
             FROM students st
             LEFT JOIN attendance a
                    ON a.student_id = st.id AND a.class_id = st.class_id
                   AND a.date BETWEEN $2 AND $3
             WHERE st.class_id = $1 AND st.is_active = true
             GROUP BY st.id
             ORDER BY st.student_number",
        )
        .bind(class_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_all(pool)
        .await
    }
}
