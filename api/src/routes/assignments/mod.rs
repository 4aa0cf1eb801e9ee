//! # Assignments Routes Module
//!
//! Defines the `/api/assignments/{assignment_id}` endpoint group. Listing and
//! creation are course-scoped and mounted by the courses router.

use crate::routes::submissions::{
    get::list_assignment_submissions,
    post::{batch_grade, create_submission},
};
use axum::{
    Router,
    routing::{get, post},
};
use get::get_assignment;
use patch::update_assignment;
use post::{duplicate_assignment, publish_assignment};
use util::state::AppState;

pub mod common;
pub mod get;
pub mod patch;
pub mod post;

/// Builds the `/assignments` route group.
///
/// - `GET /assignments/{assignment_id}` → `get_assignment`
/// - `PATCH /assignments/{assignment_id}` → `update_assignment` (course staff)
/// - `POST /assignments/{assignment_id}/publish` → `publish_assignment` (course staff)
/// - `POST /assignments/{assignment_id}/duplicate` → `duplicate_assignment` (course staff)
/// - `GET /assignments/{assignment_id}/submissions` → `list_assignment_submissions` (course staff)
/// - `POST /assignments/{assignment_id}/submissions` → `create_submission` (enrolled student)
/// - `POST /assignments/{assignment_id}/submissions/batch-grade` → `batch_grade` (course staff)
pub fn assignments_routes() -> Router<AppState> {
    Router::new()
        .route("/{assignment_id}", get(get_assignment).patch(update_assignment))
        .route("/{assignment_id}/publish", post(publish_assignment))
        .route("/{assignment_id}/duplicate", post(duplicate_assignment))
        .route(
            "/{assignment_id}/submissions",
            get(list_assignment_submissions).post(create_submission),
        )
        .route("/{assignment_id}/submissions/batch-grade", post(batch_grade))
}
