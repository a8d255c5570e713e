//! Handlers for the `/classes` resource.
//!
//! Every lookup is scoped to the authenticated teacher; a class owned by
//! someone else answers 404 exactly like a missing one.

use axum::extract::State;
use axum::http::StatusCode;
use moalem_core::attendance::{attendance_rate, average_rate};
use moalem_core::classes::{validate_capacity, validate_semester};
use moalem_core::dates::DateWindow;
use moalem_core::error::CoreError;
use moalem_core::types::DbId;
use moalem_db::models::class::{Class, ClassSummary, CreateClass, UpdateClass};
use moalem_db::repositories::class_repo::ClassConfig;
use moalem_db::repositories::{AttendanceRepo, ClassRepo, StudentRepo, SubjectRepo};
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::handlers::today;
use crate::middleware::auth::AuthUser;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// Roster and attendance summary for one class.
#[derive(Debug, Serialize)]
pub struct ClassStats {
    pub total_students: i64,
    pub active_students: i64,
    pub male_students: i64,
    pub female_students: i64,
    /// Mean per-student present rate over the trailing window.
    pub average_attendance: f64,
}

/// Load an active class owned by the caller or fail with 404.
pub(crate) async fn owned_class(
    state: &AppState,
    class_id: DbId,
    auth: &AuthUser,
) -> AppResult<Class> {
    ClassRepo::find_owned(&state.pool, class_id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Class",
            id: class_id,
        }))
}

/// GET /api/classes
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<AppJson<Vec<ClassSummary>>> {
    let classes = ClassRepo::list_for_teacher(&state.pool, auth.user_id).await?;
    Ok(AppJson(classes))
}

/// GET /api/classes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<AppJson<ClassSummary>> {
    let class = ClassRepo::find_owned_summary(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Class",
            id,
        }))?;
    Ok(AppJson(class))
}

/// POST /api/classes
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateClass>,
) -> AppResult<(StatusCode, AppJson<Class>)> {
    input.validate()?;
    validate_semester(&input.semester)?;
    validate_capacity(input.max_students)?;

    if !SubjectRepo::exists_active(&state.pool, input.subject_id).await? {
        return Err(CoreError::Validation("Subject not found".into()).into());
    }

    let config = ClassConfig {
        teacher_id: auth.user_id,
        subject_id: input.subject_id,
        school_year: &input.school_year,
        semester: &input.semester,
        class_section: &input.class_section,
    };
    if ClassRepo::config_taken(&state.pool, &config, None).await? {
        return Err(
            CoreError::Conflict("Class with this configuration already exists".into()).into(),
        );
    }

    let class = ClassRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(class_id = %class.id, user_id = %auth.user_id, "Class created");

    Ok((StatusCode::CREATED, AppJson(class)))
}

/// PUT /api/classes/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateClass>,
) -> AppResult<AppJson<SuccessResponse<Class>>> {
    let existing = owned_class(&state, id, &auth).await?;

    input.validate()?;
    if let Some(semester) = &input.semester {
        validate_semester(semester)?;
    }
    if let Some(max_students) = input.max_students {
        validate_capacity(max_students)?;
    }

    let config = ClassConfig {
        teacher_id: auth.user_id,
        subject_id: existing.subject_id,
        school_year: input.school_year.as_deref().unwrap_or(&existing.school_year),
        semester: input.semester.as_deref().unwrap_or(&existing.semester),
        class_section: input.class_section.as_deref().unwrap_or(&existing.class_section),
    };
    if ClassRepo::config_taken(&state.pool, &config, Some(id)).await? {
        return Err(
            CoreError::Conflict("Class with this configuration already exists".into()).into(),
        );
    }

    let class = ClassRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Class",
            id,
        }))?;
    tracing::info!(class_id = %id, user_id = %auth.user_id, "Class updated");

    Ok(AppJson(SuccessResponse::with_data(
        "Class updated successfully",
        class,
    )))
}

/// DELETE /api/classes/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<AppJson<SuccessResponse<()>>> {
    owned_class(&state, id, &auth).await?;
    ClassRepo::soft_delete(&state.pool, id).await?;
    tracing::info!(class_id = %id, user_id = %auth.user_id, "Class deleted");
    Ok(AppJson(SuccessResponse::message("Class deleted successfully")))
}

/// GET /api/classes/{id}/stats
///
/// Students without any record in the window count as 0% when averaging.
pub async fn stats(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<AppJson<ClassStats>> {
    owned_class(&state, id, &auth).await?;

    let window = DateWindow::resolve(None, None, today())?;
    let counts = StudentRepo::class_counts(&state.pool, id).await?;
    let presence = AttendanceRepo::presence_for_class(&state.pool, id, &window).await?;

    let rates: Vec<f64> = presence
        .iter()
        .map(|p| attendance_rate(p.present_days, p.total_days))
        .collect();

    Ok(AppJson(ClassStats {
        total_students: counts.total,
        active_students: counts.active,
        male_students: counts.male,
        female_students: counts.female,
        average_attendance: average_rate(&rates),
    }))
}
