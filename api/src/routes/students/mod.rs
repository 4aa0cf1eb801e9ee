//! # Students Routes Module
//!
//! Per-student views under `/api/students/{student_id}`.

use axum::{Router, routing::get};
use get::{list_student_courses, list_student_scores, list_student_submissions};
use util::state::AppState;

pub mod get;

/// Builds the `/students` route group.
///
/// - `GET /students/{student_id}/courses` → `list_student_courses`
/// - `GET /students/{student_id}/submissions` → `list_student_submissions`
/// - `GET /students/{student_id}/scores` → `list_student_scores`
pub fn students_routes() -> Router<AppState> {
    Router::new()
        .route("/{student_id}/courses", get(list_student_courses))
        .route("/{student_id}/submissions", get(list_student_submissions))
        .route("/{student_id}/scores", get(list_student_scores))
}
