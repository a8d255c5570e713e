//! Handlers for read-only reference data used by the registration form.

use axum::extract::State;
use moalem_db::models::school::School;
use moalem_db::models::subject::Subject;
use moalem_db::repositories::{SchoolRepo, SubjectRepo};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::state::AppState;

/// GET /api/schools
pub async fn list_schools(State(state): State<AppState>) -> AppResult<AppJson<Vec<School>>> {
    let schools = SchoolRepo::list_active(&state.pool).await?;
    Ok(AppJson(schools))
}

/// GET /api/subjects
pub async fn list_subjects(State(state): State<AppState>) -> AppResult<AppJson<Vec<Subject>>> {
    let subjects = SubjectRepo::list_active(&state.pool).await?;
    Ok(AppJson(subjects))
}
