use crate::auth::AuthUser;
use crate::response::{ApiResult, respond};
use crate::routes::{
    common::{ensure_course_staff, find_assignment, find_submission},
    submissions::common::SubmissionResponse,
};
use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::submission;
use services::error::ServiceError;
use util::state::AppState;

/// GET /api/submissions/{submission_id}
///
/// Visible to the submitting student, the course teacher and admins.
///
/// ### Responses
/// - `200 OK`: Submission found
/// - `403 Forbidden`: Caller may not view this submission
/// - `404 Not Found`: Submission does not exist
pub async fn get_submission(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(submission_id): Path<i64>,
) -> ApiResult<SubmissionResponse> {
    let result = async {
        let db = app_state.db();
        let submission = find_submission(db, submission_id).await?;
        let (assignment, course) = find_assignment(db, submission.assignment_id).await?;

        if submission.student_id != claims.sub {
            ensure_course_staff(&claims, &course).map_err(|_| {
                ServiceError::Forbidden("Not allowed to view this submission".into())
            })?;
        }

        Ok::<_, ServiceError>(
            SubmissionResponse::from(submission).with_assignment_title(Some(assignment.title)),
        )
    }
    .await;

    respond(result, StatusCode::OK, "Submission retrieved successfully")
}

/// GET /api/assignments/{assignment_id}/submissions
///
/// Every submission to an assignment in id order. Course teacher or admin only.
///
/// ### Responses
/// - `200 OK`: List of submissions
/// - `403 Forbidden`: Not the course teacher or an admin
/// - `404 Not Found`: Assignment does not exist
pub async fn list_assignment_submissions(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(assignment_id): Path<i64>,
) -> ApiResult<Vec<SubmissionResponse>> {
    let result = async {
        let db = app_state.db();
        let (_, course) = find_assignment(db, assignment_id).await?;
        ensure_course_staff(&claims, &course)?;

        Ok::<_, ServiceError>(
            submission::Model::find_by_assignment(db, assignment_id)
                .await?
                .into_iter()
                .map(SubmissionResponse::from)
                .collect(),
        )
    }
    .await;

    respond(result, StatusCode::OK, "Submissions retrieved successfully")
}
