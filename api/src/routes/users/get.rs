use crate::auth::AuthUser;
use crate::response::{ApiResult, respond};
use crate::routes::users::common::{PreferencesResponse, UserResponse};
use axum::{
    Extension,
    extract::{Path, Query, State},
    http::StatusCode,
};
use db::models::{
    user::{Column as UserColumn, Entity as UserEntity, UserRole, UserStatus},
    user_preference,
};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use serde::{Deserialize, Serialize};
use services::error::ServiceError;
use util::{paging::Paging, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub sort: Option<String>,
    pub query: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}

#[derive(Debug, Serialize, Default)]
pub struct UsersListResponse {
    pub users: Vec<UserResponse>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// GET /api/users
///
/// Retrieve a paginated list of users with optional filtering and sorting.
/// Requires admin privileges.
///
/// ### Query Parameters
/// - `page` (optional): Page number (default: 1, min: 1)
/// - `per_page` (optional): Items per page (default: 20, clamped to 1..=100)
/// - `query` (optional): Case-insensitive partial match against email OR username
/// - `role` (optional): `student`, `teacher` or `admin`
/// - `status` (optional): `active` or `disabled`
/// - `sort` (optional): Comma-separated sort fields (`username`, `email`, `created_at`). Use `-` prefix for descending
///
/// ### Examples
/// ```http
/// GET /api/users?page=2&per_page=10
/// GET /api/users?query=ali&role=teacher
/// GET /api/users?sort=email,-created_at
/// ```
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "users": [
///       {
///         "id": 1,
///         "username": "alice",
///         "email": "alice@example.com",
///         "role": "student",
///         "status": "active",
///         "created_at": "2026-05-23T18:00:00Z",
///         "updated_at": "2026-05-23T18:00:00Z"
///       }
///     ],
///     "page": 1,
///     "per_page": 10,
///     "total": 135
///   },
///   "message": "Users retrieved successfully"
/// }
/// ```
///
/// - `401 Unauthorized` - Missing or invalid JWT
/// - `403 Forbidden` - Authenticated but not admin user
pub async fn list_users(
    State(app_state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> ApiResult<UsersListResponse> {
    respond(
        fetch_users(app_state.db(), query).await,
        StatusCode::OK,
        "Users retrieved successfully",
    )
}

async fn fetch_users(
    db: &DatabaseConnection,
    query: ListUsersQuery,
) -> Result<UsersListResponse, ServiceError> {
    let paging = Paging::new(query.page, query.per_page);
    let mut condition = Condition::all();

    if let Some(q) = query.query.as_deref().filter(|q| !q.trim().is_empty()) {
        let needle = q.trim().to_lowercase();
        condition = condition.add(
            Condition::any()
                .add(UserColumn::Email.contains(&needle))
                .add(UserColumn::Username.contains(&needle)),
        );
    }
    if let Some(role) = query.role {
        condition = condition.add(UserColumn::Role.eq(role));
    }
    if let Some(status) = query.status {
        condition = condition.add(UserColumn::Status.eq(status));
    }

    let mut query_builder = UserEntity::find().filter(condition);

    match &query.sort {
        Some(sort_param) => {
            for sort_field in sort_param.split(',') {
                let (field, desc) = match sort_field.strip_prefix('-') {
                    Some(rest) => (rest, true),
                    None => (sort_field, false),
                };
                let column = match field {
                    "username" => UserColumn::Username,
                    "email" => UserColumn::Email,
                    "created_at" => UserColumn::CreatedAt,
                    _ => continue,
                };
                query_builder = if desc {
                    query_builder.order_by_desc(column)
                } else {
                    query_builder.order_by_asc(column)
                };
            }
        }
        None => query_builder = query_builder.order_by_asc(UserColumn::Id),
    }

    let paginator = query_builder.paginate(db, paging.per_page);
    let total = paginator.num_items().await?;
    let users = paginator
        .fetch_page(paging.index())
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(UsersListResponse {
        users,
        page: paging.page,
        per_page: paging.per_page,
        total,
    })
}

/// GET /api/users/{user_id}
///
/// Fetch a single user by ID. Requires admin privileges.
///
/// ### Responses
/// - `200 OK`: User found
/// - `404 Not Found`: User does not exist
pub async fn get_user(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<UserResponse> {
    let result = async {
        UserEntity::find_by_id(user_id)
            .one(app_state.db())
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| ServiceError::not_found("User not found"))
    }
    .await;

    respond(result, StatusCode::OK, "User retrieved successfully")
}

/// GET /api/users/me/preferences
///
/// The caller's preferences. Users who never saved any get the defaults:
/// `zh-CN`, email on, SMS off, AI assistant on.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "language": "zh-CN",
///     "email_notifications": true,
///     "sms_notifications": false,
///     "ai_assistant_enabled": true
///   },
///   "message": "Preferences retrieved successfully"
/// }
/// ```
pub async fn get_preferences(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> ApiResult<PreferencesResponse> {
    let result = user_preference::Model::get_or_default(app_state.db(), claims.sub)
        .await
        .map(PreferencesResponse::from)
        .map_err(ServiceError::from);

    respond(result, StatusCode::OK, "Preferences retrieved successfully")
}
