use crate::auth::AuthUser;
use crate::response::{ApiResult, respond};
use crate::routes::{
    common::{find_assignment, find_submission},
    submissions::common::{SubmissionBody, SubmissionResponse, ensure_submission_window},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use services::error::ServiceError;
use util::state::AppState;

/// PUT /api/submissions/{submission_id}
///
/// Replace the content of one's own submission. Grading fields are cleared and
/// the status becomes `resubmitted`.
///
/// ### Request Body
/// ```json
/// { "content": "Revised answer", "attachments": ["v2.pdf"] }
/// ```
///
/// ### Responses
/// - `200 OK`: Resubmitted
/// - `400 Bad Request`: Neither content nor attachments given
/// - `403 Forbidden`: Not the submitting student
/// - `404 Not Found`: Submission does not exist
/// - `409 Conflict`: Window closed, resubmission disabled, or limit reached
pub async fn resubmit(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(submission_id): Path<i64>,
    Json(body): Json<SubmissionBody>,
) -> ApiResult<SubmissionResponse> {
    let result = async {
        let db = app_state.db();
        let submission = find_submission(db, submission_id).await?;
        if submission.student_id != claims.sub {
            return Err(ServiceError::Forbidden(
                "Not allowed to update this submission".into(),
            ));
        }

        let (assignment, _) = find_assignment(db, submission.assignment_id).await?;
        ensure_submission_window(&assignment, Utc::now())?;

        if !assignment.allow_resubmit {
            return Err(ServiceError::Conflict(
                "Assignment does not allow resubmission".into(),
            ));
        }
        if assignment
            .max_resubmit
            .is_some_and(|max| submission.resubmit_count >= max)
        {
            return Err(ServiceError::Conflict("Resubmission limit reached".into()));
        }

        let (content, attachments) = body.into_columns()?;
        let updated = submission.resubmit(db, content, attachments).await?;
        tracing::info!(
            submission_id,
            resubmit_count = updated.resubmit_count,
            "Submission resubmitted"
        );
        Ok(SubmissionResponse::from(updated))
    }
    .await;

    respond(result, StatusCode::OK, "Submission updated successfully")
}
