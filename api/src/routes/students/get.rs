use crate::auth::{AuthUser, Claims};
use crate::response::{ApiResult, respond};
use crate::routes::{courses::scores::common::ScoreResponse, submissions::common::SubmissionResponse};
use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::{
    assignment::{self, Column as AssignmentColumn, Entity as AssignmentEntity},
    course::{Column as CourseColumn, Entity as CourseEntity},
    course_selection, score,
    submission::{self, Column as SubmissionColumn, Entity as SubmissionEntity},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use services::error::ServiceError;
use std::collections::{HashMap, HashSet};
use util::state::AppState;

#[derive(Debug, Serialize, Default)]
pub struct StudentCourse {
    pub course_id: i64,
    pub name: String,
    pub status: String,
    pub selection_status: String,
    pub selected_at: String,
    pub total_assignments: usize,
    pub completed_assignments: usize,
    pub pending_assignments: usize,
}

/// GET /api/students/{student_id}/courses
///
/// Courses the student is currently enrolled in, with assignment progress.
/// `completed_assignments` counts assignments with a graded submission.
///
/// Students may only view themselves; teachers and admins may view anyone.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "course_id": 3,
///       "name": "Databases",
///       "status": "published",
///       "selection_status": "enrolled",
///       "selected_at": "...",
///       "total_assignments": 4,
///       "completed_assignments": 1,
///       "pending_assignments": 3
///     }
///   ],
///   "message": "Student courses retrieved successfully"
/// }
/// ```
/// - `403 Forbidden`: A student asking for someone else
pub async fn list_student_courses(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(student_id): Path<i64>,
) -> ApiResult<Vec<StudentCourse>> {
    respond(
        fetch_student_courses(app_state.db(), &claims, student_id).await,
        StatusCode::OK,
        "Student courses retrieved successfully",
    )
}

async fn fetch_student_courses(
    db: &DatabaseConnection,
    claims: &Claims,
    student_id: i64,
) -> Result<Vec<StudentCourse>, ServiceError> {
    if claims.sub != student_id && !claims.is_staff() {
        return Err(ServiceError::Forbidden("Not allowed to view courses".into()));
    }

    let selections = course_selection::Model::courses_for_student(db, student_id).await?;
    let mut courses = Vec::with_capacity(selections.len());

    for selection in selections {
        let Some(course) = CourseEntity::find_by_id(selection.course_id).one(db).await? else {
            continue;
        };

        let assignments = assignment::Model::find_by_course(db, course.id).await?;
        let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
        let graded: HashSet<i64> = submission::Model::find_by_assignments(db, &assignment_ids)
            .await?
            .into_iter()
            .filter(|s| s.student_id == student_id && s.is_graded())
            .map(|s| s.assignment_id)
            .collect();

        let total = assignments.len();
        courses.push(StudentCourse {
            course_id: course.id,
            name: course.name,
            status: course.status.to_string(),
            selection_status: selection.status.to_string(),
            selected_at: selection.selected_at.to_rfc3339(),
            total_assignments: total,
            completed_assignments: graded.len(),
            pending_assignments: total.saturating_sub(graded.len()),
        });
    }

    Ok(courses)
}

/// GET /api/students/{student_id}/submissions
///
/// Submissions of one student, newest first.
///
/// - Students may only list their own.
/// - Teachers see only submissions to assignments in courses they teach.
/// - Admins see everything.
///
/// ### Responses
/// - `200 OK`: List of submissions
/// - `403 Forbidden`: A student asking for someone else
pub async fn list_student_submissions(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(student_id): Path<i64>,
) -> ApiResult<Vec<SubmissionResponse>> {
    respond(
        fetch_student_submissions(app_state.db(), &claims, student_id).await,
        StatusCode::OK,
        "Student submissions retrieved successfully",
    )
}

async fn fetch_student_submissions(
    db: &DatabaseConnection,
    claims: &Claims,
    student_id: i64,
) -> Result<Vec<SubmissionResponse>, ServiceError> {
    if claims.is_student() && claims.sub != student_id {
        return Err(ServiceError::Forbidden("Not allowed to view these submissions".into()));
    }

    let mut query = SubmissionEntity::find()
        .filter(SubmissionColumn::StudentId.eq(student_id))
        .order_by_desc(SubmissionColumn::UpdatedAt)
        .order_by_desc(SubmissionColumn::Id);

    if !claims.is_admin() && !claims.is_student() {
        let course_ids: Vec<i64> = CourseEntity::find()
            .filter(CourseColumn::TeacherId.eq(claims.sub))
            .all(db)
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();
        let assignment_ids: Vec<i64> = AssignmentEntity::find()
            .filter(AssignmentColumn::CourseId.is_in(course_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|a| a.id)
            .collect();
        query = query.filter(SubmissionColumn::AssignmentId.is_in(assignment_ids));
    }

    let submissions = query.all(db).await?;
    let titles: HashMap<i64, String> = AssignmentEntity::find()
        .filter(AssignmentColumn::Id.is_in(submissions.iter().map(|s| s.assignment_id)))
        .all(db)
        .await?
        .into_iter()
        .map(|a| (a.id, a.title))
        .collect();

    Ok(submissions
        .into_iter()
        .map(|s| {
            let title = titles.get(&s.assignment_id).cloned();
            SubmissionResponse::from(s).with_assignment_title(title)
        })
        .collect())
}

/// GET /api/students/{student_id}/scores
///
/// Released component scores of one student across all courses. Students may
/// only view their own; teachers and admins may view anyone.
///
/// ### Responses
/// - `200 OK`: List of scores
/// - `403 Forbidden`: A student asking for someone else
pub async fn list_student_scores(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(student_id): Path<i64>,
) -> ApiResult<Vec<ScoreResponse>> {
    let result = async {
        if claims.sub != student_id && !claims.is_staff() {
            return Err(ServiceError::Forbidden("Not allowed to view scores".into()));
        }
        let scores = score::Model::find_by_student(app_state.db(), student_id).await?;
        Ok(scores.into_iter().map(ScoreResponse::from).collect())
    }
    .await;

    respond(result, StatusCode::OK, "Student scores retrieved successfully")
}
