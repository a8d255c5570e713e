//! Route definitions for the `/students` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{attendance, student};
use crate::state::AppState;

/// Routes mounted at `/students`.
///
/// ```text
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
/// GET    /{id}/attendance-report  -> attendance::student_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(student::get_by_id)
                .put(student::update)
                .delete(student::delete),
        )
        .route("/{id}/attendance-report", get(attendance::student_report))
}
