use crate::auth::AuthUser;
use crate::response::{ApiResult, respond};
use crate::routes::{
    common::{ensure_course_staff, find_assignment, find_submission, validate_request},
    submissions::common::{
        SubmissionBody, SubmissionResponse, ensure_submission_window, rubric_scores_text,
    },
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use db::models::{
    course_selection,
    submission::{self, Column as SubmissionColumn, Entity as SubmissionEntity},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, TransactionTrait};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use services::{error::ServiceError, notification_service::NotificationService};
use std::collections::{HashMap, HashSet};
use util::state::AppState;
use validator::Validate;

/// POST /api/assignments/{assignment_id}/submissions
///
/// Hand in work for an assignment. Students only, one submission per student;
/// later changes go through `PUT /api/submissions/{submission_id}`.
///
/// ### Request Body
/// ```json
/// { "content": "My answer", "attachments": ["report.pdf"] }
/// ```
///
/// ### Responses
/// - `201 Created`: Submission stored with status `submitted`
/// - `400 Bad Request`: Neither content nor attachments given
/// - `403 Forbidden`: Caller is not a student enrolled in the course
/// - `404 Not Found`: Assignment does not exist
/// - `409 Conflict`: Assignment unpublished, not yet released, past its deadline,
///   or a submission already exists
pub async fn create_submission(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(assignment_id): Path<i64>,
    Json(body): Json<SubmissionBody>,
) -> ApiResult<SubmissionResponse> {
    let result = async {
        let db = app_state.db();
        if !claims.is_student() {
            return Err(ServiceError::Forbidden("Only students may submit work".into()));
        }

        let (assignment, course) = find_assignment(db, assignment_id).await?;
        if !course_selection::Model::is_enrolled(db, course.id, claims.sub).await? {
            return Err(ServiceError::Forbidden("You are not enrolled in this course".into()));
        }
        ensure_submission_window(&assignment, Utc::now())?;

        if submission::Model::find_for_student(db, assignment_id, claims.sub)
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict(
                "Submission already exists, please update instead".into(),
            ));
        }

        let (content, attachments) = body.into_columns()?;
        let created =
            submission::Model::create(db, assignment_id, claims.sub, content, attachments).await?;
        tracing::info!(
            submission_id = created.id,
            assignment_id,
            student_id = claims.sub,
            "Submission created"
        );
        Ok(SubmissionResponse::from(created))
    }
    .await;

    respond(result, StatusCode::CREATED, "Submission created successfully")
}

#[derive(Debug, Deserialize, Validate)]
pub struct GradeRequest {
    #[validate(range(min = 0, max = 100, message = "Score must be between 0 and 100"))]
    pub score: i32,
    pub feedback: Option<String>,
    pub rubric_scores: Option<Value>,
    #[serde(default)]
    pub publish: bool,
}

/// POST /api/submissions/{submission_id}/grade
///
/// Record a score. With `publish: true` the submission becomes `graded` and the
/// student is notified; otherwise the score is saved as a draft. Grading closes
/// any open appeal, so the student may appeal the new grade.
///
/// ### Request Body
/// ```json
/// { "score": 85, "feedback": "Good work", "rubric_scores": { "style": 5 }, "publish": true }
/// ```
///
/// ### Responses
/// - `200 OK`: Graded
/// - `400 Bad Request`: Score out of range or malformed rubric scores
/// - `403 Forbidden`: Not the course teacher or an admin
/// - `404 Not Found`: Submission does not exist
pub async fn grade_submission(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(submission_id): Path<i64>,
    Json(req): Json<GradeRequest>,
) -> ApiResult<SubmissionResponse> {
    let result = async {
        let db = app_state.db();
        let submission = find_submission(db, submission_id).await?;
        let (assignment, course) = find_assignment(db, submission.assignment_id).await?;
        ensure_course_staff(&claims, &course)?;
        validate_request(&req)?;
        let rubric = rubric_scores_text(req.rubric_scores)?;

        let txn = db.begin().await?;
        let graded = submission
            .grade(&txn, claims.sub, req.score, req.feedback, rubric, req.publish)
            .await?;
        if req.publish {
            NotificationService::notify_user(
                &txn,
                graded.student_id,
                "submission",
                "Submission graded",
                format!("Your submission for '{}' was graded: {}", assignment.title, req.score),
            )
            .await?;
        }
        txn.commit().await?;
        tracing::info!(submission_id, score = req.score, published = req.publish, "Submission graded");

        Ok::<_, ServiceError>(SubmissionResponse::from(graded))
    }
    .await;

    respond(result, StatusCode::OK, "Submission graded successfully")
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct BatchGradeEntry {
    pub submission_id: i64,
    #[validate(range(min = 0, max = 100, message = "Score must be between 0 and 100"))]
    pub score: i32,
    pub feedback: Option<String>,
    pub rubric_scores: Option<Value>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BatchGradeRequest {
    #[validate(length(min = 1, message = "At least one grade is required"), nested)]
    pub grades: Vec<BatchGradeEntry>,
    #[serde(default)]
    pub publish: bool,
}

/// POST /api/assignments/{assignment_id}/submissions/batch-grade
///
/// Grade several submissions of one assignment. The whole request is checked
/// before anything is written, and the grades are applied in one transaction.
///
/// ### Request Body
/// ```json
/// {
///   "grades": [
///     { "submission_id": 7, "score": 90 },
///     { "submission_id": 8, "score": 55, "feedback": "See comments" }
///   ],
///   "publish": true
/// }
/// ```
///
/// ### Responses
/// - `200 OK`: All submissions graded
/// - `400 Bad Request`: Duplicate ids, unknown ids, ids from another assignment,
///   or invalid scores
/// - `403 Forbidden`: Not the course teacher or an admin
/// - `404 Not Found`: Assignment does not exist
pub async fn batch_grade(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(assignment_id): Path<i64>,
    Json(req): Json<BatchGradeRequest>,
) -> ApiResult<Vec<SubmissionResponse>> {
    let result = async {
        let db = app_state.db();
        let (assignment, course) = find_assignment(db, assignment_id).await?;
        ensure_course_staff(&claims, &course)?;
        validate_request(&req)?;

        let mut seen = HashSet::new();
        if !req.grades.iter().all(|g| seen.insert(g.submission_id)) {
            return Err(ServiceError::BadRequest(
                "Duplicate submission IDs in request".into(),
            ));
        }

        let mut submissions: HashMap<i64, submission::Model> = SubmissionEntity::find()
            .filter(SubmissionColumn::Id.is_in(seen.iter().copied()))
            .all(db)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();
        if submissions.len() != seen.len() {
            return Err(ServiceError::BadRequest("Some submissions not found".into()));
        }
        if submissions.values().any(|s| s.assignment_id != assignment_id) {
            return Err(ServiceError::BadRequest(
                "Submission does not belong to this assignment".into(),
            ));
        }

        let mut graded = Vec::with_capacity(req.grades.len());
        let mut staged = Vec::with_capacity(req.grades.len());
        for entry in req.grades {
            let rubric = rubric_scores_text(entry.rubric_scores)?;
            staged.push((entry.submission_id, entry.score, entry.feedback, rubric));
        }

        let txn = db.begin().await?;
        for (submission_id, score, feedback, rubric) in staged {
            let Some(submission) = submissions.remove(&submission_id) else {
                continue;
            };
            let updated = submission
                .grade(&txn, claims.sub, score, feedback, rubric, req.publish)
                .await?;
            if req.publish {
                NotificationService::notify_user(
                    &txn,
                    updated.student_id,
                    "submission",
                    "Submission graded",
                    format!("Your submission for '{}' was graded: {}", assignment.title, score),
                )
                .await?;
            }
            graded.push(SubmissionResponse::from(updated));
        }
        txn.commit().await?;

        tracing::info!(assignment_id, count = graded.len(), "Batch grading applied");
        Ok::<_, ServiceError>(graded)
    }
    .await;

    respond(result, StatusCode::OK, "Submissions graded successfully")
}

#[derive(Debug, Deserialize, Validate)]
pub struct AppealRequest {
    #[validate(length(min = 1, max = 2000, message = "Appeal reason must be between 1 and 2000 characters"))]
    pub reason: String,
}

/// POST /api/submissions/{submission_id}/appeal
///
/// Contest a published grade. Only the submitting student may appeal, once per
/// grade; regrading reopens the right to appeal. The course teacher is notified.
///
/// ### Request Body
/// ```json
/// { "reason": "Question 3 was marked against the wrong rubric" }
/// ```
///
/// ### Responses
/// - `200 OK`: Appeal recorded
/// - `400 Bad Request`: Empty or whitespace-only reason
/// - `403 Forbidden`: Not the submitting student
/// - `404 Not Found`: Submission does not exist
/// - `409 Conflict`: Not graded yet, or already appealed
pub async fn appeal_submission(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(submission_id): Path<i64>,
    Json(mut req): Json<AppealRequest>,
) -> ApiResult<SubmissionResponse> {
    let result = async {
        let db = app_state.db();
        let submission = find_submission(db, submission_id).await?;
        if submission.student_id != claims.sub {
            return Err(ServiceError::Forbidden(
                "Not allowed to appeal this submission".into(),
            ));
        }
        req.reason = req.reason.trim().to_owned();
        validate_request(&req)?;

        if submission.has_open_appeal() {
            return Err(ServiceError::Conflict("Submission already appealed".into()));
        }
        if !submission.is_graded() || submission.score.is_none() {
            return Err(ServiceError::Conflict(
                "Submission has not been graded or published".into(),
            ));
        }

        let (assignment, course) = find_assignment(db, submission.assignment_id).await?;
        let appealed = submission.appeal(db, &req.reason).await?;

        NotificationService::notify_user(
            db,
            course.teacher_id,
            "submission",
            "Grade appeal",
            format!(
                "Student {} appealed the grade for '{}'",
                appealed.student_id, assignment.title
            ),
        )
        .await?;
        tracing::info!(submission_id, "Submission appealed");

        Ok::<_, ServiceError>(SubmissionResponse::from(appealed))
    }
    .await;

    respond(result, StatusCode::OK, "Appeal submitted successfully")
}
