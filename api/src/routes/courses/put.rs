use crate::auth::AuthUser;
use crate::response::{ApiResult, respond};
use crate::routes::{
    common::{ensure_course_staff, find_course, validate_request},
    courses::common::CourseResponse,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use db::models::course;
use sea_orm::{ActiveModelTrait, Set};
use serde::Deserialize;
use services::error::ServiceError;
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, max = 255, message = "Course name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    pub semester: Option<String>,
    #[validate(range(min = 0, max = 20, message = "Credit must be between 0 and 20"))]
    pub credit: Option<i32>,
    #[validate(range(min = 1, message = "Enroll limit must be positive"))]
    pub enroll_limit: Option<i32>,
}

/// PUT /api/courses/{course_id}
///
/// Update course details. Only provided fields change. Status transitions go
/// through the publish/approval workflow instead.
///
/// ### Responses
/// - `200 OK`: Updated course
/// - `400 Bad Request`: Validation failure
/// - `403 Forbidden`: Not the course teacher or an admin
/// - `404 Not Found`: Course does not exist
pub async fn update_course(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(course_id): Path<i64>,
    Json(req): Json<UpdateCourseRequest>,
) -> ApiResult<CourseResponse> {
    let result = async {
        let db = app_state.db();
        let existing = find_course(db, course_id).await?;
        ensure_course_staff(&claims, &existing)?;
        validate_request(&req)?;

        let mut active: course::ActiveModel = existing.into();
        if let Some(name) = req.name {
            active.name = Set(name.trim().to_owned());
        }
        if let Some(semester) = req.semester {
            active.semester = Set(Some(semester));
        }
        if let Some(credit) = req.credit {
            active.credit = Set(Some(credit));
        }
        if let Some(limit) = req.enroll_limit {
            active.enroll_limit = Set(Some(limit));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(db).await?;
        tracing::info!(course_id, "Course updated");
        Ok::<_, ServiceError>(CourseResponse::from(updated))
    }
    .await;

    respond(result, StatusCode::OK, "Course updated successfully")
}
