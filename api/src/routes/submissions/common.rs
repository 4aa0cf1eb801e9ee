use crate::routes::common::from_json_text;
use chrono::{DateTime, Utc};
use db::models::{assignment, submission};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use services::error::ServiceError;

#[derive(Debug, Serialize, Default)]
pub struct SubmissionResponse {
    pub id: i64,
    pub assignment_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment_title: Option<String>,
    pub student_id: i64,
    pub status: String,
    pub content: Option<String>,
    pub attachments: Vec<String>,
    pub score: Option<i32>,
    pub feedback: Option<String>,
    pub rubric_scores: Option<Value>,
    pub appeal_reason: Option<String>,
    pub appealed_at: Option<String>,
    pub graded_by: Option<i64>,
    pub resubmit_count: i32,
    pub submitted_at: Option<String>,
    pub graded_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl SubmissionResponse {
    pub fn with_assignment_title(mut self, title: Option<String>) -> Self {
        self.assignment_title = title;
        self
    }
}

impl From<submission::Model> for SubmissionResponse {
    fn from(s: submission::Model) -> Self {
        Self {
            id: s.id,
            assignment_id: s.assignment_id,
            assignment_title: None,
            student_id: s.student_id,
            status: s.status.to_string(),
            content: s.content,
            attachments: s
                .attachments
                .as_deref()
                .and_then(|a| serde_json::from_str(a).ok())
                .unwrap_or_default(),
            score: s.score,
            feedback: s.feedback,
            rubric_scores: from_json_text(s.rubric_scores.as_deref()),
            appeal_reason: s.appeal_reason,
            appealed_at: s.appealed_at.map(|t| t.to_rfc3339()),
            graded_by: s.graded_by,
            resubmit_count: s.resubmit_count,
            submitted_at: s.submitted_at.map(|t| t.to_rfc3339()),
            graded_at: s.graded_at.map(|t| t.to_rfc3339()),
            created_at: s.created_at.to_rfc3339(),
            updated_at: s.updated_at.to_rfc3339(),
        }
    }
}

/// Content of a submission or resubmission.
#[derive(Debug, Deserialize, Default)]
pub struct SubmissionBody {
    pub content: Option<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
}

impl SubmissionBody {
    /// Splits the body into stored columns. Rejects a body with neither text nor attachments.
    pub fn into_columns(self) -> Result<(Option<String>, Option<String>), ServiceError> {
        let content = self.content.filter(|c| !c.trim().is_empty());
        if content.is_none() && self.attachments.is_empty() {
            return Err(ServiceError::BadRequest(
                "Submission must include content or attachments".into(),
            ));
        }
        let attachments = if self.attachments.is_empty() {
            None
        } else {
            Some(
                serde_json::to_string(&self.attachments)
                    .map_err(|e| ServiceError::Internal(e.to_string()))?,
            )
        };
        Ok((content, attachments))
    }
}

/// Submission window checks, in the order students hit them.
pub fn ensure_submission_window(
    assignment: &assignment::Model,
    now: DateTime<Utc>,
) -> Result<(), ServiceError> {
    if !assignment.published {
        return Err(ServiceError::Conflict("Assignment is not published".into()));
    }
    if assignment.release_at.is_some_and(|r| r > now) {
        return Err(ServiceError::Conflict(
            "Assignment is not yet open for submission".into(),
        ));
    }
    if assignment.deadline_passed(now) {
        return Err(ServiceError::Conflict(
            "Assignment submission deadline has passed".into(),
        ));
    }
    Ok(())
}

/// Rubric scores must be a JSON object of criterion to points.
pub fn rubric_scores_text(value: Option<Value>) -> Result<Option<String>, ServiceError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v @ Value::Object(_)) => Ok(Some(v.to_string())),
        Some(_) => Err(ServiceError::BadRequest("Invalid rubric scores format".into())),
    }
}
