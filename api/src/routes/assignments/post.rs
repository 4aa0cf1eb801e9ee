use crate::auth::AuthUser;
use crate::response::{ApiResult, respond};
use crate::routes::{
    assignments::common::{AssignmentResponse, ensure_release_before_deadline},
    common::{ensure_course_staff, find_assignment, find_course, to_json_text, validate_request},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use db::models::assignment::{self, AssignmentType, NewAssignment};
use serde::Deserialize;
use serde_json::Value;
use services::{error::ServiceError, notification_service::NotificationService};
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAssignmentRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,
    #[serde(default)]
    pub assignment_type: AssignmentType,
    pub deadline: Option<DateTime<Utc>>,
    pub release_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub allow_resubmit: bool,
    #[validate(range(min = 0, message = "max_resubmit must not be negative"))]
    pub max_resubmit: Option<i32>,
    pub grading_rubric: Option<Value>,
}

/// POST /api/courses/{course_id}/assignments
///
/// Create an unpublished assignment in a course.
///
/// ### Request Body
/// ```json
/// {
///   "title": "Lab 1",
///   "assignment_type": "assignment",
///   "deadline": "2026-11-01T23:59:00Z",
///   "allow_resubmit": true,
///   "max_resubmit": 2,
///   "grading_rubric": { "correctness": 70, "style": 30 }
/// }
/// ```
///
/// ### Responses
/// - `201 Created`: Assignment created
/// - `400 Bad Request`: Blank title, other validation failure, or release after deadline
/// - `403 Forbidden`: Not the course teacher or an admin
/// - `404 Not Found`: Course does not exist
pub async fn create_assignment(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(course_id): Path<i64>,
    Json(mut req): Json<CreateAssignmentRequest>,
) -> ApiResult<AssignmentResponse> {
    let result = async {
        let db = app_state.db();
        let course = find_course(db, course_id).await?;
        ensure_course_staff(&claims, &course)?;
        req.title = req.title.trim().to_owned();
        validate_request(&req)?;
        ensure_release_before_deadline(req.release_at, req.deadline)?;

        let created = assignment::Model::create(
            db,
            course_id,
            NewAssignment {
                title: req.title,
                assignment_type: req.assignment_type,
                deadline: req.deadline,
                release_at: req.release_at,
                allow_resubmit: req.allow_resubmit,
                max_resubmit: req.max_resubmit,
                grading_rubric: to_json_text(req.grading_rubric),
            },
        )
        .await?;
        tracing::info!(assignment_id = created.id, course_id, "Assignment created");
        Ok::<_, ServiceError>(AssignmentResponse::from(created))
    }
    .await;

    respond(result, StatusCode::CREATED, "Assignment created successfully")
}

/// POST /api/assignments/{assignment_id}/publish
///
/// Publish an assignment and notify the enrolled students. `release_at`
/// defaults to the publish time when unset.
///
/// ### Responses
/// - `200 OK`: Published
/// - `403 Forbidden`: Not the course teacher or an admin
/// - `404 Not Found`: Assignment does not exist
/// - `409 Conflict`: Already published
pub async fn publish_assignment(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(assignment_id): Path<i64>,
) -> ApiResult<AssignmentResponse> {
    let result = async {
        let db = app_state.db();
        let (existing, course) = find_assignment(db, assignment_id).await?;
        ensure_course_staff(&claims, &course)?;
        if existing.published {
            return Err(ServiceError::Conflict("Assignment is already published".into()));
        }

        let published = existing.publish(db).await?;
        let notified = NotificationService::notify_enrolled_students(
            db,
            course.id,
            "assignment",
            "New assignment published",
            &format!("'{}' is now available in {}", published.title, course.name),
        )
        .await?;
        tracing::info!(assignment_id, notified, "Assignment published");

        Ok(AssignmentResponse::from(published))
    }
    .await;

    respond(result, StatusCode::OK, "Assignment published successfully")
}

#[derive(Debug, Deserialize)]
pub struct DuplicateAssignmentRequest {
    pub target_course_id: i64,
    pub new_title: Option<String>,
}

/// POST /api/assignments/{assignment_id}/duplicate
///
/// Copy an assignment into another course (or the same one) as an unpublished
/// draft. The caller must be staff of both courses.
///
/// ### Request Body
/// ```json
/// { "target_course_id": 9, "new_title": "Lab 1 (2027)" }
/// ```
///
/// ### Responses
/// - `201 Created`: Copy created
/// - `403 Forbidden`: Not staff of the source or target course
/// - `404 Not Found`: Assignment or target course does not exist
pub async fn duplicate_assignment(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(assignment_id): Path<i64>,
    Json(req): Json<DuplicateAssignmentRequest>,
) -> ApiResult<AssignmentResponse> {
    let result = async {
        let db = app_state.db();
        let (source, source_course) = find_assignment(db, assignment_id).await?;
        ensure_course_staff(&claims, &source_course)?;
        let target = find_course(db, req.target_course_id).await?;
        ensure_course_staff(&claims, &target)?;

        let copy = source.duplicate_into(db, target.id, req.new_title).await?;
        tracing::info!(
            source_id = assignment_id,
            copy_id = copy.id,
            target_course_id = target.id,
            "Assignment duplicated"
        );
        Ok::<_, ServiceError>(AssignmentResponse::from(copy))
    }
    .await;

    respond(result, StatusCode::CREATED, "Assignment duplicated successfully")
}
