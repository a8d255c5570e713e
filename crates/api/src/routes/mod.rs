pub mod attendance;
pub mod auth;
pub mod classes;
pub mod health;
pub mod reference;
pub mod students;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                        register (public)
/// /auth/login                           login (public)
/// /auth/refresh                         refresh (public)
/// /auth/logout                          logout (requires auth)
/// /auth/me                              current user (requires auth)
///
/// /schools                              list (public)
/// /subjects                             list (public)
///
/// /classes                              list, create
/// /classes/{id}                         get, update, delete
/// /classes/{id}/stats                   roster and attendance summary
/// /classes/{id}/students                list, enroll
/// /classes/{id}/attendance              record a day
/// /classes/{id}/attendance/{date}       records for one day
///
/// /students/{id}                        get, update, delete
/// /students/{id}/attendance-report      per-student report
///
/// /attendance/{id}                      correct one entry
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(reference::router())
        .nest("/classes", classes::router())
        .nest("/students", students::router())
        .nest("/attendance", attendance::router())
}
