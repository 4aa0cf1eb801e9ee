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
use db::models::{
    approval_request::{self, ApprovalType},
    course::{self, CourseStatus},
    course_selection::{self, SelectionStatus},
    user::{Entity as UserEntity, UserRole},
};
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use serde::{Deserialize, Serialize};
use services::error::ServiceError;
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 255, message = "Course name must be between 1 and 255 characters"))]
    pub name: String,
    pub semester: Option<String>,
    #[validate(range(min = 0, max = 20, message = "Credit must be between 0 and 20"))]
    pub credit: Option<i32>,
    #[validate(range(min = 1, message = "Enroll limit must be positive"))]
    pub enroll_limit: Option<i32>,
    /// Admins may create a course on behalf of a teacher.
    pub teacher_id: Option<i64>,
}

/// POST /api/courses
///
/// Create a course in `draft` status. Teachers create courses for themselves;
/// admins may pass `teacher_id` to assign another teacher.
///
/// ### Request Body
/// ```json
/// { "name": "Databases", "semester": "2026-FALL", "credit": 3, "enroll_limit": 40 }
/// ```
///
/// ### Responses
/// - `201 Created`: Course created
/// - `400 Bad Request`: Validation failure or `teacher_id` is not a teacher
/// - `403 Forbidden`: Caller is a student
pub async fn create_course(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<CreateCourseRequest>,
) -> ApiResult<CourseResponse> {
    let result = async {
        if !claims.is_staff() {
            return Err(ServiceError::Forbidden(
                "Only teachers or admins may create courses".into(),
            ));
        }
        validate_request(&req)?;

        let teacher_id = match req.teacher_id {
            Some(id) if id != claims.sub => {
                if !claims.is_admin() {
                    return Err(ServiceError::Forbidden(
                        "Only admins may create courses for other teachers".into(),
                    ));
                }
                let teacher = UserEntity::find_by_id(id)
                    .one(app_state.db())
                    .await?
                    .ok_or_else(|| ServiceError::BadRequest("Teacher not found".into()))?;
                if teacher.role != UserRole::Teacher {
                    return Err(ServiceError::BadRequest("teacher_id must refer to a teacher".into()));
                }
                id
            }
            _ => claims.sub,
        };

        let course = course::Model::create(
            app_state.db(),
            teacher_id,
            req.name.trim(),
            req.semester,
            req.credit,
            req.enroll_limit,
        )
        .await?;
        tracing::info!(course_id = course.id, teacher_id, "Course created");
        Ok(CourseResponse::from(course))
    }
    .await;

    respond(result, StatusCode::CREATED, "Course created successfully")
}

#[derive(Debug, Serialize, Default)]
pub struct PublishCourseResponse {
    pub course: CourseResponse,
    pub approval_id: i64,
}

/// POST /api/courses/{course_id}/publish
///
/// Submit a course for admin review. The course moves to `pending_review` and a
/// `course_publish` approval request is filed.
///
/// ### Responses
/// - `200 OK`: Review requested
/// - `403 Forbidden`: Not the course teacher or an admin
/// - `404 Not Found`: Course does not exist
/// - `409 Conflict`: Course is already published or awaiting review
pub async fn publish_course(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(course_id): Path<i64>,
) -> ApiResult<PublishCourseResponse> {
    let result = async {
        let db = app_state.db();
        let course = find_course(db, course_id).await?;
        ensure_course_staff(&claims, &course)?;

        match course.status {
            CourseStatus::Published => {
                return Err(ServiceError::Conflict("Course is already published".into()));
            }
            CourseStatus::PendingReview => {
                return Err(ServiceError::Conflict("Course is already awaiting review".into()));
            }
            CourseStatus::Draft | CourseStatus::Archived => {}
        }

        let txn = db.begin().await?;
        let approval = approval_request::Model::create(
            &txn,
            ApprovalType::CoursePublish,
            claims.sub,
            Some(serde_json::json!({ "course_id": course_id }).to_string()),
        )
        .await?;
        let course = course::Model::set_status(&txn, course_id, CourseStatus::PendingReview).await?;
        txn.commit().await?;

        tracing::info!(course_id, approval_id = approval.id, "Course submitted for review");
        Ok::<_, ServiceError>(PublishCourseResponse {
            course: CourseResponse::from(course),
            approval_id: approval.id,
        })
    }
    .await;

    respond(result, StatusCode::OK, "Course submitted for review")
}

#[derive(Debug, Serialize, Default)]
pub struct EnrollmentResponse {
    pub course_id: i64,
    pub student_id: i64,
    pub status: String,
    pub enrolled_at: String,
}

impl From<course_selection::Model> for EnrollmentResponse {
    fn from(selection: course_selection::Model) -> Self {
        Self {
            course_id: selection.course_id,
            student_id: selection.student_id,
            status: selection.status.to_string(),
            enrolled_at: selection.selected_at.to_rfc3339(),
        }
    }
}

/// POST /api/courses/{course_id}/enroll
///
/// Enroll the calling student. A previously dropped enrollment is reactivated.
///
/// ### Responses
/// - `200 OK`: Enrolled
/// - `403 Forbidden`: Caller is not a student
/// - `404 Not Found`: Course does not exist
/// - `409 Conflict`: Course not published, already enrolled, or full
pub async fn enroll(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(course_id): Path<i64>,
) -> ApiResult<EnrollmentResponse> {
    respond(
        enroll_student(app_state.db(), course_id, claims.sub, claims.is_student()).await,
        StatusCode::OK,
        "Enrolled successfully",
    )
}

async fn enroll_student(
    db: &DatabaseConnection,
    course_id: i64,
    student_id: i64,
    is_student: bool,
) -> Result<EnrollmentResponse, ServiceError> {
    if !is_student {
        return Err(ServiceError::Forbidden("Only students may enroll in courses".into()));
    }

    let course = find_course(db, course_id).await?;
    if !course.is_published() {
        return Err(ServiceError::Conflict("Course is not open for enrollment".into()));
    }

    if let Some(existing) = course_selection::Model::find(db, course_id, student_id).await? {
        if existing.status == SelectionStatus::Enrolled {
            return Err(ServiceError::Conflict("Already enrolled in this course".into()));
        }
    }

    if let Some(limit) = course.enroll_limit {
        let enrolled = course_selection::Model::count_enrolled(db, course_id).await?;
        if enrolled >= u64::try_from(limit).unwrap_or(0) {
            return Err(ServiceError::Conflict("Course enrollment limit reached".into()));
        }
    }

    let selection = course_selection::Model::enroll(db, course_id, student_id).await?;
    tracing::info!(course_id, student_id, "Student enrolled");
    Ok(EnrollmentResponse::from(selection))
}
