//! Helpers shared by several route groups.

use crate::auth::Claims;
use db::models::{
    assignment::{self, Entity as AssignmentEntity},
    course::{self, Entity as CourseEntity},
    submission::{self, Entity as SubmissionEntity},
};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde_json::Value;
use services::error::ServiceError;
use validator::{Validate, ValidationErrors};

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Runs `validator` rules and converts failures into a `400`.
pub fn validate_request<T: Validate>(req: &T) -> Result<(), ServiceError> {
    req.validate()
        .map_err(|e| ServiceError::BadRequest(format_validation_errors(&e)))
}

pub async fn find_course(db: &DatabaseConnection, course_id: i64) -> Result<course::Model, ServiceError> {
    CourseEntity::find_by_id(course_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Course not found"))
}

/// Loads an assignment together with its course.
pub async fn find_assignment(
    db: &DatabaseConnection,
    assignment_id: i64,
) -> Result<(assignment::Model, course::Model), ServiceError> {
    let assignment = AssignmentEntity::find_by_id(assignment_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Assignment not found"))?;
    let course = find_course(db, assignment.course_id).await?;
    Ok((assignment, course))
}

pub async fn find_submission(
    db: &DatabaseConnection,
    submission_id: i64,
) -> Result<submission::Model, ServiceError> {
    SubmissionEntity::find_by_id(submission_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Submission not found"))
}

/// Course owner or admin.
pub fn ensure_course_staff(claims: &Claims, course: &course::Model) -> Result<(), ServiceError> {
    if claims.is_admin() || course.is_owner(claims.sub) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(
            "Only the course teacher or an admin may do this".into(),
        ))
    }
}

pub fn to_json_text(value: Option<Value>) -> Option<String> {
    value.filter(|v| !v.is_null()).map(|v| v.to_string())
}

pub fn from_json_text(text: Option<&str>) -> Option<Value> {
    text.and_then(|t| serde_json::from_str(t).ok())
}
