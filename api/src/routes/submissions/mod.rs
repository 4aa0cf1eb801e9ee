//! # Submissions Routes Module
//!
//! Defines `/api/submissions/{submission_id}` routes. Submission intake,
//! per-assignment listing and batch grading are mounted under
//! `/api/assignments/{assignment_id}/submissions` by the assignments router,
//! but their handlers live here.

use axum::{
    Router,
    routing::{get, post},
};
use get::get_submission;
use post::{appeal_submission, grade_submission};
use put::resubmit;
use util::state::AppState;

pub mod common;
pub mod get;
pub mod post;
pub mod put;

/// Builds the `/submissions` route group.
///
/// - `GET /submissions/{submission_id}` → `get_submission`
/// - `PUT /submissions/{submission_id}` → `resubmit` (owner)
/// - `POST /submissions/{submission_id}/grade` → `grade_submission` (course staff)
/// - `POST /submissions/{submission_id}/appeal` → `appeal_submission` (owner)
pub fn submissions_routes() -> Router<AppState> {
    Router::new()
        .route("/{submission_id}", get(get_submission).put(resubmit))
        .route("/{submission_id}/grade", post(grade_submission))
        .route("/{submission_id}/appeal", post(appeal_submission))
}
