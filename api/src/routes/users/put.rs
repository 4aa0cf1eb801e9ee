use crate::response::{ApiResult, respond};
use crate::routes::{common::validate_request, users::common::UserResponse};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use db::models::user::{self, Entity as UserEntity, UserRole, UserStatus};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::Deserialize;
use services::error::ServiceError;
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}

/// PUT /api/users/{user_id}
///
/// Update a user's email, role or status. Requires admin privileges.
///
/// ### Request Body
/// ```json
/// { "email": "new@example.com", "role": "teacher", "status": "disabled" }
/// ```
///
/// ### Responses
/// - `200 OK`: Updated user
/// - `400 Bad Request`: Validation failure
/// - `404 Not Found`: User does not exist
/// - `409 Conflict`: Email already used by another account
pub async fn update_user(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    respond(
        apply_update(app_state.db(), user_id, req).await,
        StatusCode::OK,
        "User updated successfully",
    )
}

async fn apply_update(
    db: &DatabaseConnection,
    user_id: i64,
    req: UpdateUserRequest,
) -> Result<UserResponse, ServiceError> {
    validate_request(&req)?;

    let existing = UserEntity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("User not found"))?;

    let mut active: user::ActiveModel = existing.clone().into();

    if let Some(email) = req.email {
        let email = email.trim().to_lowercase();
        if email != existing.email && user::Model::email_taken(db, &email).await? {
            return Err(ServiceError::Conflict(
                "A user with this email already exists".into(),
            ));
        }
        active.email = Set(email);
    }
    if let Some(role) = req.role {
        active.role = Set(role);
    }
    if let Some(status) = req.status {
        active.status = Set(status);
    }
    active.updated_at = Set(Utc::now());

    let updated = active.update(db).await?;
    tracing::info!(user_id, "User updated");
    Ok(UserResponse::from(updated))
}
