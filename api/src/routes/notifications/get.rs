use crate::auth::{AuthUser, Claims};
use crate::response::{ApiResult, respond};
use crate::routes::notifications::NotificationResponse;
use axum::{
    Extension,
    extract::{Query, State},
    http::StatusCode,
};
use db::models::notification::{Column, Entity, NotificationStatus};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use serde::{Deserialize, Serialize};
use services::error::ServiceError;
use util::{paging::Paging, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ListNotificationsQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub target_type: Option<String>,
    pub status: Option<NotificationStatus>,
}

#[derive(Debug, Serialize, Default)]
pub struct NotificationsListResponse {
    pub notifications: Vec<NotificationResponse>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// GET /api/notifications
///
/// Notifications visible to the caller, newest first. Admins see every
/// notification; everyone else sees broadcasts plus their own.
///
/// ### Query Parameters
/// - `page`, `per_page` (optional)
/// - `target_type` (optional): e.g. `announcement`, `assignment`, `submission`, `system`
/// - `status` (optional): `draft` or `sent`
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "notifications": [
///       {
///         "id": 12,
///         "target_type": "assignment",
///         "recipient_id": 5,
///         "title": "New assignment published",
///         "content": "'Lab 1' is now available in Databases",
///         "channels": ["inbox"],
///         "status": "sent",
///         "sent_at": "...",
///         "created_at": "..."
///       }
///     ],
///     "page": 1,
///     "per_page": 20,
///     "total": 1
///   },
///   "message": "Notifications retrieved successfully"
/// }
/// ```
pub async fn list_notifications(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Query(query): Query<ListNotificationsQuery>,
) -> ApiResult<NotificationsListResponse> {
    respond(
        fetch_notifications(app_state.db(), &claims, query).await,
        StatusCode::OK,
        "Notifications retrieved successfully",
    )
}

async fn fetch_notifications(
    db: &DatabaseConnection,
    claims: &Claims,
    query: ListNotificationsQuery,
) -> Result<NotificationsListResponse, ServiceError> {
    let paging = Paging::new(query.page, query.per_page);
    let mut condition = Condition::all();

    if !claims.is_admin() {
        condition = condition.add(
            Condition::any()
                .add(Column::RecipientId.is_null())
                .add(Column::RecipientId.eq(claims.sub)),
        );
    }
    if let Some(target_type) = query.target_type.as_deref().filter(|t| !t.is_empty()) {
        condition = condition.add(Column::TargetType.eq(target_type));
    }
    if let Some(status) = query.status {
        condition = condition.add(Column::Status.eq(status));
    }

    let paginator = Entity::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .paginate(db, paging.per_page);
    let total = paginator.num_items().await?;
    let notifications = paginator
        .fetch_page(paging.index())
        .await?
        .into_iter()
        .map(NotificationResponse::from)
        .collect();

    Ok(NotificationsListResponse {
        notifications,
        page: paging.page,
        per_page: paging.per_page,
        total,
    })
}
