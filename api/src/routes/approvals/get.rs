use crate::response::{ApiResult, respond};
use crate::routes::approvals::ApprovalResponse;
use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use db::models::approval_request::{ApprovalStatus, ApprovalType, Column, Entity};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use serde::{Deserialize, Serialize};
use services::error::ServiceError;
use util::{paging::Paging, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ListApprovalsQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub status: Option<ApprovalStatus>,
    pub approval_type: Option<ApprovalType>,
}

#[derive(Debug, Serialize, Default)]
pub struct ApprovalsListResponse {
    pub approvals: Vec<ApprovalResponse>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// GET /api/approvals
///
/// Paginated approval requests, newest first.
///
/// ### Query Parameters
/// - `page`, `per_page` (optional)
/// - `status` (optional): `pending`, `approved` or `rejected`
/// - `approval_type` (optional): `course_publish`
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "approvals": [
///       {
///         "id": 4,
///         "approval_type": "course_publish",
///         "status": "pending",
///         "applicant_id": 2,
///         "payload": { "course_id": 3 },
///         "processed_by": null,
///         "comment": null,
///         "processed_at": null,
///         "created_at": "...",
///         "updated_at": "..."
///       }
///     ],
///     "page": 1,
///     "per_page": 20,
///     "total": 1
///   },
///   "message": "Approvals retrieved successfully"
/// }
/// ```
pub async fn list_approvals(
    State(app_state): State<AppState>,
    Query(query): Query<ListApprovalsQuery>,
) -> ApiResult<ApprovalsListResponse> {
    respond(
        fetch_approvals(app_state.db(), query).await,
        StatusCode::OK,
        "Approvals retrieved successfully",
    )
}

async fn fetch_approvals(
    db: &DatabaseConnection,
    query: ListApprovalsQuery,
) -> Result<ApprovalsListResponse, ServiceError> {
    let paging = Paging::new(query.page, query.per_page);
    let mut condition = Condition::all();
    if let Some(status) = query.status {
        condition = condition.add(Column::Status.eq(status));
    }
    if let Some(kind) = query.approval_type {
        condition = condition.add(Column::ApprovalType.eq(kind));
    }

    let paginator = Entity::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .paginate(db, paging.per_page);
    let total = paginator.num_items().await?;
    let approvals = paginator
        .fetch_page(paging.index())
        .await?
        .into_iter()
        .map(ApprovalResponse::from)
        .collect();

    Ok(ApprovalsListResponse {
        approvals,
        page: paging.page,
        per_page: paging.per_page,
        total,
    })
}
