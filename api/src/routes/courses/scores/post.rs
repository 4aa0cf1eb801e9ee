use crate::response::{ApiResult, respond};
use crate::routes::{common::validate_request, courses::scores::common::ScoreResponse};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use db::models::{course_selection, score};
use sea_orm::TransactionTrait;
use serde::{Deserialize, Serialize};
use services::error::ServiceError;
use std::collections::HashSet;
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct ScoreEntry {
    pub student_id: i64,
    #[validate(length(min = 1, max = 64, message = "Component must be between 1 and 64 characters"))]
    pub component: String,
    #[validate(range(min = 0, message = "Score value must not be negative"))]
    pub value: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PublishScoresRequest {
    /// Release time; defaults to now.
    pub publish_at: Option<DateTime<Utc>>,
    #[validate(length(min = 1, message = "At least one score is required"), nested)]
    pub scores: Vec<ScoreEntry>,
}

/// POST /api/courses/{course_id}/scores/publish
///
/// Release component scores for enrolled students. Each entry overwrites any
/// earlier score for the same student and component. All entries are written
/// in one transaction.
///
/// ### Request Body
/// ```json
/// {
///   "publish_at": "2026-12-20T09:00:00Z",
///   "scores": [
///     { "student_id": 5, "component": "midterm", "value": 78 },
///     { "student_id": 6, "component": "midterm", "value": 91 }
///   ]
/// }
/// ```
///
/// ### Responses
/// - `201 Created`: Scores written
/// - `400 Bad Request`: Validation failure, duplicate entries, or a student
///   not enrolled in the course
/// - `403 Forbidden`: Not the course teacher or an admin
/// - `404 Not Found`: Course does not exist
pub async fn publish_scores(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    Json(mut req): Json<PublishScoresRequest>,
) -> ApiResult<Vec<ScoreResponse>> {
    let result = async {
        let db = app_state.db();
        for entry in &mut req.scores {
            entry.component = entry.component.trim().to_owned();
        }
        for entry in &req.scores {
            validate_request(entry)?;
        }
        validate_request(&req)?;

        let mut seen = HashSet::new();
        if !req
            .scores
            .iter()
            .all(|e| seen.insert((e.student_id, e.component.as_str())))
        {
            return Err(ServiceError::BadRequest(
                "Duplicate student and component in request".into(),
            ));
        }

        let enrolled: HashSet<i64> = course_selection::Model::enrolled_student_ids(db, course_id)
            .await?
            .into_iter()
            .collect();
        if let Some(entry) = req.scores.iter().find(|e| !enrolled.contains(&e.student_id)) {
            return Err(ServiceError::BadRequest(format!(
                "Student {} is not enrolled in this course",
                entry.student_id
            )));
        }

        let released_at = req.publish_at.unwrap_or_else(Utc::now);
        let txn = db.begin().await?;
        let mut written = Vec::with_capacity(req.scores.len());
        for entry in &req.scores {
            let saved = score::Model::upsert(
                &txn,
                entry.student_id,
                course_id,
                &entry.component,
                entry.value,
                released_at,
            )
            .await?;
            written.push(ScoreResponse::from(saved));
        }
        txn.commit().await?;

        tracing::info!(course_id, count = written.len(), "Scores published");
        Ok::<_, ServiceError>(written)
    }
    .await;

    respond(result, StatusCode::CREATED, "Scores published successfully")
}
