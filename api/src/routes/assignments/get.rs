use crate::auth::AuthUser;
use crate::response::{ApiResult, respond};
use crate::routes::{
    assignments::common::AssignmentResponse,
    common::{ensure_course_staff, find_assignment, find_course},
};
use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::assignment;
use services::error::ServiceError;
use util::state::AppState;

/// GET /api/courses/{course_id}/assignments
///
/// Assignments of a course in creation order. The course teacher and admins see
/// drafts too; everyone else only sees published assignments.
///
/// ### Responses
/// - `200 OK`: List of assignments
/// - `404 Not Found`: Course does not exist
pub async fn list_course_assignments(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(course_id): Path<i64>,
) -> ApiResult<Vec<AssignmentResponse>> {
    let result = async {
        let db = app_state.db();
        let course = find_course(db, course_id).await?;
        let is_staff = ensure_course_staff(&claims, &course).is_ok();

        Ok::<_, ServiceError>(
            assignment::Model::find_by_course(db, course_id)
                .await?
                .into_iter()
                .filter(|a| is_staff || a.published)
                .map(AssignmentResponse::from)
                .collect(),
        )
    }
    .await;

    respond(result, StatusCode::OK, "Assignments retrieved successfully")
}

/// GET /api/assignments/{assignment_id}
///
/// ### Responses
/// - `200 OK`: Assignment found
/// - `404 Not Found`: Assignment does not exist, or is unpublished and the
///   caller is not course staff
pub async fn get_assignment(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(assignment_id): Path<i64>,
) -> ApiResult<AssignmentResponse> {
    let result = async {
        let (assignment, course) = find_assignment(app_state.db(), assignment_id).await?;
        if !assignment.published && ensure_course_staff(&claims, &course).is_err() {
            return Err(ServiceError::not_found("Assignment not found"));
        }
        Ok(AssignmentResponse::from(assignment))
    }
    .await;

    respond(result, StatusCode::OK, "Assignment retrieved successfully")
}
