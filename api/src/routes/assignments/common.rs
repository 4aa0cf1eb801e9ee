use crate::routes::common::from_json_text;
use chrono::{DateTime, Utc};
use db::models::assignment;
use serde::Serialize;
use serde_json::Value;
use services::error::ServiceError;

#[derive(Debug, Serialize, Default)]
pub struct AssignmentResponse {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub assignment_type: String,
    pub deadline: Option<String>,
    pub release_at: Option<String>,
    pub published: bool,
    pub published_at: Option<String>,
    pub allow_resubmit: bool,
    pub max_resubmit: Option<i32>,
    pub grading_rubric: Option<Value>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<assignment::Model> for AssignmentResponse {
    fn from(a: assignment::Model) -> Self {
        Self {
            id: a.id,
            course_id: a.course_id,
            title: a.title,
            assignment_type: a.assignment_type.to_string(),
            deadline: a.deadline.map(|t| t.to_rfc3339()),
            release_at: a.release_at.map(|t| t.to_rfc3339()),
            published: a.published,
            published_at: a.published_at.map(|t| t.to_rfc3339()),
            allow_resubmit: a.allow_resubmit,
            max_resubmit: a.max_resubmit,
            grading_rubric: from_json_text(a.grading_rubric.as_deref()),
            created_at: a.created_at.to_rfc3339(),
            updated_at: a.updated_at.to_rfc3339(),
        }
    }
}

pub fn ensure_release_before_deadline(
    release_at: Option<DateTime<Utc>>,
    deadline: Option<DateTime<Utc>>,
) -> Result<(), ServiceError> {
    match (release_at, deadline) {
        (Some(release), Some(deadline)) if release > deadline => Err(ServiceError::BadRequest(
            "Release time must not be after the deadline".into(),
        )),
        _ => Ok(()),
    }
}
