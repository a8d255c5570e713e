use axum::routing::get;
use axum::Router;

use crate::handlers::reference;
use crate::state::AppState;

/// Public reference lists, merged at the `/api` root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/schools", get(reference::list_schools))
        .route("/subjects", get(reference::list_subjects))
}
