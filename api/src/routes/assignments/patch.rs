use crate::auth::AuthUser;
use crate::response::{ApiResult, respond};
use crate::routes::{
    assignments::common::{AssignmentResponse, ensure_release_before_deadline},
    common::{ensure_course_staff, find_assignment, to_json_text, validate_request},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use db::models::assignment::{self, AssignmentType};
use sea_orm::{ActiveModelTrait, Set};
use serde::Deserialize;
use serde_json::Value;
use services::{error::ServiceError, notification_service::NotificationService};
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAssignmentRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: Option<String>,
    pub assignment_type: Option<AssignmentType>,
    pub deadline: Option<DateTime<Utc>>,
    pub release_at: Option<DateTime<Utc>>,
    pub allow_resubmit: Option<bool>,
    #[validate(range(min = 0, message = "max_resubmit must not be negative"))]
    pub max_resubmit: Option<i32>,
    pub grading_rubric: Option<Value>,
}

/// PATCH /api/assignments/{assignment_id}
///
/// Partially update an assignment. Moving the deadline of a published
/// assignment notifies every enrolled student.
///
/// ### Request Body
/// ```json
/// { "deadline": "2026-11-01T23:59:00Z", "allow_resubmit": true, "max_resubmit": 2 }
/// ```
///
/// ### Responses
/// - `200 OK`: Updated assignment
/// - `400 Bad Request`: Blank title, other validation failure, or release after deadline
/// - `403 Forbidden`: Not the course teacher or an admin
/// - `404 Not Found`: Assignment does not exist
pub async fn update_assignment(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(assignment_id): Path<i64>,
    Json(mut req): Json<UpdateAssignmentRequest>,
) -> ApiResult<AssignmentResponse> {
    let result = async {
        let db = app_state.db();
        let (existing, course) = find_assignment(db, assignment_id).await?;
        ensure_course_staff(&claims, &course)?;
        req.title = req.title.map(|t| t.trim().to_owned());
        validate_request(&req)?;
        ensure_release_before_deadline(
            req.release_at.or(existing.release_at),
            req.deadline.or(existing.deadline),
        )?;

        let deadline_moved = req.deadline.is_some_and(|d| existing.deadline != Some(d));
        let was_published = existing.published;

        let mut active: assignment::ActiveModel = existing.into();
        if let Some(title) = req.title {
            active.title = Set(title);
        }
        if let Some(kind) = req.assignment_type {
            active.assignment_type = Set(kind);
        }
        if let Some(deadline) = req.deadline {
            active.deadline = Set(Some(deadline));
        }
        if let Some(release_at) = req.release_at {
            active.release_at = Set(Some(release_at));
        }
        if let Some(allow) = req.allow_resubmit {
            active.allow_resubmit = Set(allow);
        }
        if let Some(max) = req.max_resubmit {
            active.max_resubmit = Set(Some(max));
        }
        if req.grading_rubric.is_some() {
            active.grading_rubric = Set(to_json_text(req.grading_rubric));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(db).await?;
        tracing::info!(assignment_id, "Assignment updated");

        if was_published && deadline_moved {
            let deadline = updated
                .deadline
                .map(|d| d.to_rfc3339())
                .unwrap_or_default();
            NotificationService::notify_enrolled_students(
                db,
                updated.course_id,
                "assignment",
                "Assignment deadline changed",
                &format!("The deadline for '{}' is now {}", updated.title, deadline),
            )
            .await?;
        }

        Ok::<_, ServiceError>(AssignmentResponse::from(updated))
    }
    .await;

    respond(result, StatusCode::OK, "Assignment updated successfully")
}
