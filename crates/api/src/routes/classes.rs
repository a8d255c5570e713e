//! Route definitions for the `/classes` resource and its nested collections.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{attendance, class, student};
use crate::state::AppState;

/// Routes mounted at `/classes`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
/// GET    /{id}/stats              -> stats
/// GET    /{id}/students           -> student::list_for_class
/// POST   /{id}/students           -> student::create
/// POST   /{id}/attendance         -> attendance::create
/// GET    /{id}/attendance/{date}  -> attendance::list_for_date
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(class::list).post(class::create))
        .route(
            "/{id}",
            get(class::get_by_id).put(class::update).delete(class::delete),
        )
        .route("/{id}/stats", get(class::stats))
        .route(
            "/{id}/students",
            get(student::list_for_class).post(student::create),
        )
        .route("/{id}/attendance", post(attendance::create))
        .route("/{id}/attendance/{date}", get(attendance::list_for_date))
}
