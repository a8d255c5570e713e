//! Handlers for recording, correcting, and reporting attendance.
//!
//! A class has at most one attendance submission per calendar day. The
//! existence pre-check gives the common case a clear 409; the
//! `uq_attendance_student_class_date` constraint covers races and duplicate
//! students inside one submission, and the surrounding transaction keeps the
//! batch all-or-nothing.

use axum::extract::State;
use axum::http::StatusCode;
use moalem_core::attendance::{validate_status, AttendanceStats};
use moalem_core::dates::{parse_calendar_date, DateWindow};
use moalem_core::error::CoreError;
use moalem_core::types::{CalendarDate, DbId, Timestamp};
use moalem_db::models::attendance::{
    Attendance, AttendanceWithStudent, CreateAttendance, UpdateAttendance,
};
use moalem_db::repositories::{AttendanceRepo, StudentRepo};
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::handlers::class::owned_class;
use crate::handlers::today;
use crate::middleware::auth::AuthUser;
use crate::query::DateRangeParams;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// Result of a bulk attendance submission.
#[derive(Debug, Serialize)]
pub struct RecordedAttendance {
    pub attendance_ids: Vec<DbId>,
    pub date: CalendarDate,
    pub records_count: usize,
}

/// Payload returned after correcting one entry.
#[derive(Debug, Serialize)]
pub struct UpdatedAttendance {
    pub updated_at: Timestamp,
}

/// Per-student attendance report over a date window.
#[derive(Debug, Serialize)]
pub struct AttendanceReport {
    /// When the report was generated.
    pub date: Timestamp,
    pub stats: AttendanceStats,
    /// Newest first.
    pub attendances: Vec<Attendance>,
}

/// POST /api/classes/{id}/attendance
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(class_id): AppPath<DbId>,
    AppJson(input): AppJson<CreateAttendance>,
) -> AppResult<(StatusCode, AppJson<SuccessResponse<RecordedAttendance>>)> {
    owned_class(&state, class_id, &auth).await?;

    let date = parse_calendar_date(&input.date, "date")?;
    input.validate()?;
    for record in &input.records {
        validate_status(&record.status)?;
    }

    if AttendanceRepo::exists_for_class_date(&state.pool, class_id, date).await? {
        return Err(
            CoreError::Conflict("Attendance already recorded for this date".into()).into(),
        );
    }

    let mut student_ids: Vec<DbId> = input.records.iter().map(|r| r.student_id).collect();
    student_ids.sort_unstable();
    student_ids.dedup();
    let enrolled = StudentRepo::active_ids_in_class(&state.pool, class_id, &student_ids).await?;
    if enrolled.len() != student_ids.len() {
        return Err(CoreError::Validation(
            "One or more students are not enrolled in this class".into(),
        )
        .into());
    }

    let attendance_ids =
        AttendanceRepo::create_batch(&state.pool, class_id, date, auth.user_id, &input.records)
            .await?;
    tracing::info!(
        class_id = %class_id,
        user_id = %auth.user_id,
        %date,
        records = attendance_ids.len(),
        "Attendance recorded"
    );

    let records_count = attendance_ids.len();
    Ok((
        StatusCode::CREATED,
        AppJson(SuccessResponse::with_data(
            "Attendance recorded successfully",
            RecordedAttendance {
                attendance_ids,
                date,
                records_count,
            },
        )),
    ))
}

/// GET /api/classes/{id}/attendance/{date}
pub async fn list_for_date(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath((class_id, raw_date)): AppPath<(DbId, String)>,
) -> AppResult<AppJson<Vec<AttendanceWithStudent>>> {
    owned_class(&state, class_id, &auth).await?;
    let date = parse_calendar_date(&raw_date, "date")?;

    let rows = AttendanceRepo::list_for_class_date(&state.pool, class_id, date).await?;
    Ok(AppJson(rows))
}

/// PUT /api/attendance/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateAttendance>,
) -> AppResult<AppJson<SuccessResponse<UpdatedAttendance>>> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Attendance record",
            id,
        })
    };

    AttendanceRepo::find_owned(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(not_found)?;
    validate_status(&input.status)?;

    let updated = AttendanceRepo::update(&state.pool, id, &input.status, input.notes.as_deref())
        .await?
        .ok_or_else(not_found)?;
    tracing::info!(
        attendance_id = %id,
        user_id = %auth.user_id,
        status = %updated.status,
        "Attendance updated"
    );

    Ok(AppJson(SuccessResponse::with_data(
        "Attendance updated successfully",
        UpdatedAttendance {
            updated_at: updated.updated_at,
        },
    )))
}

/// GET /api/students/{id}/attendance-report?start_date&end_date
pub async fn student_report(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(student_id): AppPath<DbId>,
    AppQuery(params): AppQuery<DateRangeParams>,
) -> AppResult<AppJson<AttendanceReport>> {
    StudentRepo::find_owned(&state.pool, student_id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id: student_id,
        }))?;

    let window = DateWindow::resolve(
        params.start_date.as_deref(),
        params.end_date.as_deref(),
        today(),
    )?;

    let counts =
        AttendanceRepo::status_counts_for_student(&state.pool, student_id, &window).await?;
    let attendances = AttendanceRepo::list_for_student(&state.pool, student_id, &window).await?;

    Ok(AppJson(AttendanceReport {
        date: chrono::Utc::now(),
        stats: AttendanceStats::from_counts(
            counts.present,
            counts.absent,
            counts.late,
            counts.excused,
        ),
        attendances,
    }))
}
