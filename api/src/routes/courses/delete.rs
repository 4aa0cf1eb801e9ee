use crate::auth::AuthUser;
use crate::response::{ApiResult, respond};
use crate::routes::courses::post::EnrollmentResponse;
use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::course_selection::{self, SelectionStatus};
use services::error::ServiceError;
use util::state::AppState;

/// DELETE /api/courses/{course_id}/enroll
///
/// Drop the calling student's enrollment. The row is kept with status `dropped`.
///
/// ### Responses
/// - `200 OK`: Enrollment dropped
/// - `403 Forbidden`: Caller is not a student
/// - `404 Not Found`: No enrollment record for this course
/// - `409 Conflict`: Enrollment was already dropped
pub async fn drop_course(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(course_id): Path<i64>,
) -> ApiResult<EnrollmentResponse> {
    let result = async {
        if !claims.is_student() {
            return Err(ServiceError::Forbidden("Only students may drop courses".into()));
        }

        let selection = course_selection::Model::find(app_state.db(), course_id, claims.sub)
            .await?
            .ok_or_else(|| ServiceError::not_found("Enrollment not found"))?;
        if selection.status != SelectionStatus::Enrolled {
            return Err(ServiceError::Conflict("Course already dropped".into()));
        }

        let dropped = selection.drop_enrollment(app_state.db()).await?;
        tracing::info!(course_id, student_id = claims.sub, "Enrollment dropped");
        Ok(EnrollmentResponse::from(dropped))
    }
    .await;

    respond(result, StatusCode::OK, "Course dropped successfully")
}
