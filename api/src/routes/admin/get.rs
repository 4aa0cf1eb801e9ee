use crate::response::{ApiResult, respond};
use axum::{extract::State, http::StatusCode};
use db::models::{
    approval_request,
    assignment::Entity as AssignmentEntity,
    course::{Column as CourseColumn, CourseStatus, Entity as CourseEntity},
    user::Entity as UserEntity,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;
use services::error::ServiceError;
use util::state::AppState;

#[derive(Debug, Serialize, Default)]
pub struct PlatformMetrics {
    pub total_users: u64,
    pub total_courses: u64,
    pub active_courses: u64,
    pub total_assignments: u64,
    pub pending_approvals: u64,
}

/// GET /api/admin/metrics
///
/// Headline counts for the admin dashboard. `active_courses` counts published
/// courses.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "total_users": 120,
///     "total_courses": 9,
///     "active_courses": 6,
///     "total_assignments": 41,
///     "pending_approvals": 2
///   },
///   "message": "Metrics retrieved successfully"
/// }
/// ```
/// - `403 Forbidden`: Caller is not an admin
pub async fn platform_metrics(State(app_state): State<AppState>) -> ApiResult<PlatformMetrics> {
    respond(
        collect_metrics(app_state.db()).await,
        StatusCode::OK,
        "Metrics retrieved successfully",
    )
}

async fn collect_metrics(db: &DatabaseConnection) -> Result<PlatformMetrics, ServiceError> {
    Ok(PlatformMetrics {
        total_users: UserEntity::find().count(db).await?,
        total_courses: CourseEntity::find().count(db).await?,
        active_courses: CourseEntity::find()
            .filter(CourseColumn::Status.eq(CourseStatus::Published))
            .count(db)
            .await?,
        total_assignments: AssignmentEntity::find().count(db).await?,
        pending_approvals: approval_request::Model::count_pending(db).await?,
    })
}
