use crate::auth::AuthUser;
use crate::response::{ApiResult, respond};
use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::user::Entity as UserEntity;
use sea_orm::EntityTrait;
use services::error::ServiceError;
use util::state::AppState;

/// DELETE /api/users/{user_id}
///
/// Delete a user. Admins cannot delete their own account.
///
/// ### Responses
/// - `200 OK`: User deleted
/// - `403 Forbidden`: Attempt to delete self
/// - `404 Not Found`: User does not exist
pub async fn delete_user(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(user_id): Path<i64>,
) -> ApiResult<()> {
    let result = async {
        if claims.sub == user_id {
            return Err(ServiceError::Forbidden(
                "You cannot delete your own account".into(),
            ));
        }
        let deleted = UserEntity::delete_by_id(user_id).exec(app_state.db()).await?;
        if deleted.rows_affected == 0 {
            return Err(ServiceError::not_found("User not found"));
        }
        tracing::info!(user_id, by = claims.sub, "User deleted");
        Ok(())
    }
    .await;

    respond(result, StatusCode::OK, "User deleted successfully")
}
