//! Handlers for students, nested under classes for listing and enrollment.

use axum::extract::State;
use axum::http::StatusCode;
use moalem_core::attendance::attendance_rate;
use moalem_core::classes::ensure_seat_available;
use moalem_core::dates::DateWindow;
use moalem_core::error::CoreError;
use moalem_core::students::validate_gender;
use moalem_core::types::DbId;
use moalem_db::models::student::{CreateStudent, Student, StudentWithPresence, UpdateStudent};
use moalem_db::repositories::StudentRepo;
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::handlers::class::owned_class;
use crate::handlers::today;
use crate::middleware::auth::AuthUser;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// A student with their present rate over the trailing window.
#[derive(Debug, Serialize)]
pub struct StudentView {
    #[serde(flatten)]
    pub student: Student,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    pub attendance_rate: f64,
}

impl From<StudentWithPresence> for StudentView {
    fn from(row: StudentWithPresence) -> Self {
        Self {
            attendance_rate: attendance_rate(row.present_days, row.total_days),
            student: row.student,
            class_name: row.class_name,
        }
    }
}

fn student_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Student",
        id,
    })
}

fn number_conflict() -> AppError {
    AppError::Core(CoreError::Conflict("Student number already exists".into()))
}

/// GET /api/classes/{id}/students
pub async fn list_for_class(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(class_id): AppPath<DbId>,
) -> AppResult<AppJson<Vec<StudentView>>> {
    owned_class(&state, class_id, &auth).await?;

    let window = DateWindow::resolve(None, None, today())?;
    let rows = StudentRepo::list_for_class_with_presence(&state.pool, class_id, &window).await?;
    Ok(AppJson(rows.into_iter().map(StudentView::from).collect()))
}

/// POST /api/classes/{id}/students
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(class_id): AppPath<DbId>,
    AppJson(input): AppJson<CreateStudent>,
) -> AppResult<(StatusCode, AppJson<Student>)> {
    let class = owned_class(&state, class_id, &auth).await?;

    input.validate()?;
    validate_gender(&input.gender)?;

    let enrolled = StudentRepo::count_active_in_class(&state.pool, class_id).await?;
    ensure_seat_available(enrolled, class.max_students)?;

    if StudentRepo::number_taken(&state.pool, &input.student_number, None).await? {
        return Err(number_conflict());
    }

    let student = StudentRepo::create(&state.pool, class_id, &input).await?;
    tracing::info!(
        student_id = %student.id,
        class_id = %class_id,
        user_id = %auth.user_id,
        "Student enrolled"
    );

    Ok((StatusCode::CREATED, AppJson(student)))
}

/// GET /api/students/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<AppJson<StudentView>> {
    let window = DateWindow::resolve(None, None, today())?;
    let row = StudentRepo::find_owned_with_presence(&state.pool, id, auth.user_id, &window)
        .await?
        .ok_or_else(|| student_not_found(id))?;
    Ok(AppJson(row.into()))
}

/// PUT /api/students/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateStudent>,
) -> AppResult<AppJson<SuccessResponse<Student>>> {
    let existing = StudentRepo::find_owned(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| student_not_found(id))?;

    input.validate()?;
    if let Some(gender) = &input.gender {
        validate_gender(gender)?;
    }
    if let Some(number) = &input.student_number {
        if *number != existing.student_number
            && StudentRepo::number_taken(&state.pool, number, Some(id)).await?
        {
            return Err(number_conflict());
        }
    }

    let student = StudentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| student_not_found(id))?;
    tracing::info!(student_id = %id, user_id = %auth.user_id, "Student updated");

    Ok(AppJson(SuccessResponse::with_data(
        "Student updated successfully",
        student,
    )))
}

/// DELETE /api/students/{id}
///
/// Soft delete; the student's attendance history is kept.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<AppJson<SuccessResponse<()>>> {
    StudentRepo::find_owned(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| student_not_found(id))?;
    StudentRepo::soft_delete(&state.pool, id).await?;
    tracing::info!(student_id = %id, user_id = %auth.user_id, "Student deleted");
    Ok(AppJson(SuccessResponse::message("Student deleted successfully")))
}
