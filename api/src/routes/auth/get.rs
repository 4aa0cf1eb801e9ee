use crate::auth::AuthUser;
use crate::response::{ApiResult, respond};
use crate::routes::auth::common::UserProfile;
use axum::{extract::State, http::StatusCode};
use db::models::user::Entity as UserEntity;
use sea_orm::EntityTrait;
use services::error::ServiceError;
use util::state::AppState;

/// GET /auth/me
///
/// Returns the profile of the authenticated user.
///
/// ### Responses
/// - `200 OK` with a `UserProfile`
/// - `401 Unauthorized` (missing or invalid token)
/// - `404 Not Found` (user was deleted after the token was issued)
pub async fn get_me(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> ApiResult<UserProfile> {
    let result = async {
        UserEntity::find_by_id(claims.sub)
            .one(app_state.db())
            .await?
            .map(UserProfile::from)
            .ok_or_else(|| ServiceError::not_found("User not found"))
    }
    .await;

    respond(result, StatusCode::OK, "User retrieved successfully")
}
