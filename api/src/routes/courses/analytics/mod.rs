use axum::{Router, routing::get};
use get::course_overview;
use util::state::AppState;

pub mod get;

/// `/courses/{course_id}/analytics` routes. Access is enforced by the parent router.
pub fn analytics_routes() -> Router<AppState> {
    Router::new().route("/overview", get(course_overview))
}
