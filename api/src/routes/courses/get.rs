use crate::response::{ApiResult, respond};
use crate::routes::{
    common::find_course,
    courses::common::{CourseListItem, CourseMetrics, CourseResponse},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use db::models::{
    assignment::{Column as AssignmentColumn, Entity as AssignmentEntity},
    course::{Column as CourseColumn, CourseStatus, Entity as CourseEntity},
    course_selection,
    user::Entity as UserEntity,
};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use serde::{Deserialize, Serialize};
use services::error::ServiceError;
use std::collections::HashMap;
use util::{paging::Paging, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ListCoursesQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub query: Option<String>,
    pub teacher_id: Option<i64>,
    pub status: Option<CourseStatus>,
    pub sort: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct CoursesListResponse {
    pub courses: Vec<CourseListItem>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// GET /api/courses
///
/// Paginated course catalogue.
///
/// ### Query Parameters
/// - `page`, `per_page` (optional): 1-based page, page size clamped to 1..=100 (default 20)
/// - `query` (optional): partial match on the course name
/// - `teacher_id` (optional): only courses taught by this user
/// - `status` (optional): `draft`, `pending_review`, `published` or `archived`
/// - `sort` (optional): `name` or `created_at`, `-` prefix for descending (default `-created_at`)
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "courses": [
///       {
///         "id": 3,
///         "name": "Databases",
///         "semester": "2026-FALL",
///         "credit": 3,
///         "status": "published",
///         "enroll_limit": 40,
///         "teacher_id": 2,
///         "created_at": "...",
///         "updated_at": "...",
///         "metrics": { "enrolled_count": 12, "assignments": 4 }
///       }
///     ],
///     "page": 1,
///     "per_page": 20,
///     "total": 1
///   },
///   "message": "Courses retrieved successfully"
/// }
/// ```
pub async fn list_courses(
    State(app_state): State<AppState>,
    Query(query): Query<ListCoursesQuery>,
) -> ApiResult<CoursesListResponse> {
    respond(
        fetch_courses(app_state.db(), query).await,
        StatusCode::OK,
        "Courses retrieved successfully",
    )
}

async fn fetch_courses(
    db: &DatabaseConnection,
    query: ListCoursesQuery,
) -> Result<CoursesListResponse, ServiceError> {
    let paging = Paging::new(query.page, query.per_page);
    let mut condition = Condition::all();

    if let Some(q) = query.query.as_deref().filter(|q| !q.trim().is_empty()) {
        condition = condition.add(CourseColumn::Name.contains(q.trim()));
    }
    if let Some(teacher_id) = query.teacher_id {
        condition = condition.add(CourseColumn::TeacherId.eq(teacher_id));
    }
    if let Some(status) = query.status {
        condition = condition.add(CourseColumn::Status.eq(status));
    }

    let sort = query.sort.as_deref().unwrap_or("-created_at");
    let (field, desc) = match sort.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (sort, false),
    };
    let column = match field {
        "name" => CourseColumn::Name,
        _ => CourseColumn::CreatedAt,
    };

    let mut query_builder = CourseEntity::find().filter(condition);
    query_builder = if desc {
        query_builder.order_by_desc(column)
    } else {
        query_builder.order_by_asc(column)
    };
    query_builder = query_builder.order_by_desc(CourseColumn::Id);

    let paginator = query_builder.paginate(db, paging.per_page);
    let total = paginator.num_items().await?;
    let page = paginator.fetch_page(paging.index()).await?;

    let mut courses = Vec::with_capacity(page.len());
    for course in page {
        let metrics = CourseMetrics {
            enrolled_count: course_selection::Model::count_enrolled(db, course.id).await?,
            assignments: AssignmentEntity::find()
                .filter(AssignmentColumn::CourseId.eq(course.id))
                .count(db)
                .await?,
        };
        courses.push(CourseListItem {
            course: CourseResponse::from(course),
            metrics,
        });
    }

    Ok(CoursesListResponse {
        courses,
        page: paging.page,
        per_page: paging.per_page,
        total,
    })
}

/// GET /api/courses/{course_id}
///
/// ### Responses
/// - `200 OK`: Course found
/// - `404 Not Found`: Course does not exist
pub async fn get_course(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> ApiResult<CourseResponse> {
    respond(
        find_course(app_state.db(), course_id)
            .await
            .map(CourseResponse::from),
        StatusCode::OK,
        "Course retrieved successfully",
    )
}

#[derive(Debug, Serialize, Default)]
pub struct CourseStudent {
    pub student_id: i64,
    pub username: String,
    pub email: String,
    pub status: String,
    pub enrolled_at: String,
}

/// GET /api/courses/{course_id}/students
///
/// Roster of actively enrolled students, in enrollment order.
/// Restricted to the course teacher and admins.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     { "student_id": 5, "username": "alice", "email": "alice@example.com", "status": "enrolled", "enrolled_at": "..." }
///   ],
///   "message": "Students retrieved successfully"
/// }
/// ```
/// - `403 Forbidden`: Not the course teacher
/// - `404 Not Found`: Course does not exist
pub async fn list_course_students(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> ApiResult<Vec<CourseStudent>> {
    respond(
        fetch_roster(app_state.db(), course_id).await,
        StatusCode::OK,
        "Students retrieved successfully",
    )
}

async fn fetch_roster(
    db: &DatabaseConnection,
    course_id: i64,
) -> Result<Vec<CourseStudent>, ServiceError> {
    let selections = course_selection::Model::enrolled_in_course(db, course_id).await?;
    let ids: Vec<i64> = selections.iter().map(|s| s.student_id).collect();
    let users: HashMap<i64, _> = UserEntity::find()
        .filter(db::models::user::Column::Id.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    Ok(selections
        .into_iter()
        .filter_map(|s| {
            users.get(&s.student_id).map(|u| CourseStudent {
                student_id: s.student_id,
                username: u.username.clone(),
                email: u.email.clone(),
                status: s.status.to_string(),
                enrolled_at: s.selected_at.to_rfc3339(),
            })
        })
        .collect())
}
