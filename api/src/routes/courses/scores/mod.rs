use axum::{
    Router,
    routing::{get, post},
};
use get::list_course_scores;
use post::publish_scores;
use util::state::AppState;

pub mod common;
pub mod get;
pub mod post;

/// `/courses/{course_id}/scores` routes. Access is enforced by the parent router.
pub fn scores_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_course_scores))
        .route("/publish", post(publish_scores))
}
