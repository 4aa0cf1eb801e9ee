use crate::auth::{AuthUser, Claims};
use crate::response::{ApiResult, respond};
use axum::{Extension, extract::State, http::StatusCode};
use chrono::Utc;
use db::models::{
    approval_request,
    assignment,
    course::{self, Entity as CourseEntity},
    course_selection,
    submission::{self, SubmissionStatus},
    user::UserRole,
};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::Serialize;
use services::error::ServiceError;
use std::collections::HashMap;
use util::state::AppState;

#[derive(Debug, Serialize, Default)]
pub struct TodoItem {
    #[serde(rename = "type")]
    pub todo_type: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub due_at: Option<String>,
    pub course_id: Option<i64>,
    pub assignment_id: Option<i64>,
}

/// GET /api/todos
///
/// Outstanding work for the caller:
///
/// - Students: released assignments in enrolled courses that are not handed
///   in or still await a grade. `status` is `pending` (nothing handed in) or `submitted`.
/// - Teachers: assignments in their courses with submissions awaiting a grade.
/// - Admins: one entry when approval requests are pending.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "type": "assignment",
///       "title": "Lab 2",
///       "description": "Databases",
///       "status": "pending",
///       "due_at": "2026-11-01T23:59:00+00:00",
///       "course_id": 3,
///       "assignment_id": 12
///     }
///   ],
///   "message": "Todos retrieved successfully"
/// }
/// ```
pub async fn list_todos(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> ApiResult<Vec<TodoItem>> {
    respond(
        collect_todos(app_state.db(), &claims).await,
        StatusCode::OK,
        "Todos retrieved successfully",
    )
}

async fn collect_todos(db: &DatabaseConnection, claims: &Claims) -> Result<Vec<TodoItem>, ServiceError> {
    match claims.role {
        UserRole::Student => student_todos(db, claims.sub).await,
        UserRole::Teacher => teacher_todos(db, claims.sub).await,
        UserRole::Admin => admin_todos(db).await,
    }
}

async fn student_todos(db: &DatabaseConnection, student_id: i64) -> Result<Vec<TodoItem>, ServiceError> {
    let now = Utc::now();
    let mut todos = Vec::new();

    for selection in course_selection::Model::courses_for_student(db, student_id).await? {
        let Some(course) = CourseEntity::find_by_id(selection.course_id).one(db).await? else {
            continue;
        };

        let assignments: Vec<assignment::Model> = assignment::Model::find_by_course(db, course.id)
            .await?
            .into_iter()
            .filter(|a| a.published && a.release_at.is_none_or(|r| r <= now))
            .collect();
        let ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
        let mine: HashMap<i64, submission::Model> = submission::Model::find_by_assignments(db, &ids)
            .await?
            .into_iter()
            .filter(|s| s.student_id == student_id)
            .map(|s| (s.assignment_id, s))
            .collect();

        for assignment in assignments {
            let status = match mine.get(&assignment.id) {
                None => "pending",
                Some(s) if awaiting_grade(s) => "submitted",
                Some(_) => continue,
            };
            todos.push(TodoItem {
                todo_type: "assignment".into(),
                title: assignment.title,
                description: course.name.clone(),
                status: status.into(),
                due_at: assignment.deadline.map(|d| d.to_rfc3339()),
                course_id: Some(course.id),
                assignment_id: Some(assignment.id),
            });
        }
    }

    Ok(todos)
}

async fn teacher_todos(db: &DatabaseConnection, teacher_id: i64) -> Result<Vec<TodoItem>, ServiceError> {
    let mut todos = Vec::new();

    for course in course::Model::find_by_teacher(db, teacher_id).await? {
        for assignment in assignment::Model::find_by_course(db, course.id).await? {
            let waiting = submission::Model::find_by_assignment(db, assignment.id)
                .await?
                .iter()
                .filter(|s| awaiting_grade(s))
                .count();
            if waiting == 0 {
                continue;
            }
            todos.push(TodoItem {
                todo_type: "grading".into(),
                title: assignment.title,
                description: format!("{waiting} submission(s) awaiting grading in {}", course.name),
                status: "pending".into(),
                due_at: None,
                course_id: Some(course.id),
                assignment_id: Some(assignment.id),
            });
        }
    }

    Ok(todos)
}

fn awaiting_grade(submission: &submission::Model) -> bool {
    matches!(
        submission.status,
        SubmissionStatus::Submitted | SubmissionStatus::Resubmitted
    )
}

async fn admin_todos(db: &DatabaseConnection) -> Result<Vec<TodoItem>, ServiceError> {
    let pending = approval_request::Model::count_pending(db).await?;
    if pending == 0 {
        return Ok(Vec::new());
    }

    Ok(vec![TodoItem {
        todo_type: "approval".into(),
        title: "Pending approvals".into(),
        description: format!("{pending} approval request(s) awaiting review"),
        status: "pending".into(),
        ..Default::default()
    }])
}
