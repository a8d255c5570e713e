use axum::routing::put;
use axum::Router;

use crate::handlers::attendance;
use crate::state::AppState;

/// Routes mounted at `/attendance`.
///
/// ```text
/// PUT /{id} -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", put(attendance::update))
}
