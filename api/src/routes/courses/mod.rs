//! # Courses Routes Module
//!
//! Defines the `/api/courses` endpoint group: course CRUD, the publish
//! workflow, student enrollment, course-scoped assignments and analytics.
//!
//! Every route requires authentication. The roster, analytics and score routes are
//! further limited to the course teacher and admins by `allow_course_staff`.

use crate::auth::guards::{allow_authenticated, allow_course_staff};
use crate::routes::assignments::{get::list_course_assignments, post::create_assignment};
use analytics::analytics_routes;
use scores::scores_routes;
use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use delete::drop_course;
use get::{get_course, list_course_students, list_courses};
use post::{create_course, enroll, publish_course};
use put::update_course;
use util::state::AppState;

pub mod analytics;
pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;
pub mod scores;

/// Builds the `/courses` route group.
///
/// - `GET /courses` → `list_courses`
/// - `POST /courses` → `create_course` (teacher/admin)
/// - `GET /courses/{course_id}` → `get_course`
/// - `PUT /courses/{course_id}` → `update_course` (owner/admin)
/// - `POST /courses/{course_id}/publish` → `publish_course` (owner/admin)
/// - `POST /courses/{course_id}/enroll` → `enroll` (student)
/// - `DELETE /courses/{course_id}/enroll` → `drop_course` (student)
/// - `GET /courses/{course_id}/assignments` → `list_course_assignments`
/// - `POST /courses/{course_id}/assignments` → `create_assignment` (owner/admin)
/// - `GET /courses/{course_id}/students` → `list_course_students` (owner/admin)
/// - `GET /courses/{course_id}/analytics/overview` → `course_overview` (owner/admin)
/// - `GET /courses/{course_id}/scores` → `list_course_scores` (owner/admin)
/// - `POST /courses/{course_id}/scores/publish` → `publish_scores` (owner/admin)
pub fn courses_routes(app_state: AppState) -> Router<AppState> {
    let staff_only = Router::new()
        .route("/{course_id}/students", get(list_course_students))
        .nest("/{course_id}/analytics", analytics_routes())
        .nest("/{course_id}/scores", scores_routes())
        .route_layer(from_fn_with_state(app_state, allow_course_staff));

    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route("/{course_id}", get(get_course).put(update_course))
        .route("/{course_id}/publish", post(publish_course))
        .route("/{course_id}/enroll", post(enroll).delete(drop_course))
        .route(
            "/{course_id}/assignments",
            get(list_course_assignments).post(create_assignment),
        )
        .route_layer(from_fn(allow_authenticated))
        .merge(staff_only)
}
