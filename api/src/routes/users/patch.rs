use crate::auth::AuthUser;
use crate::response::{ApiResult, respond};
use crate::routes::{common::validate_request, users::common::PreferencesResponse};
use axum::{Extension, Json, extract::State, http::StatusCode};
use db::models::user_preference::{self, PreferenceChanges};
use serde::Deserialize;
use services::error::ServiceError;
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePreferencesRequest {
    #[validate(length(min = 1, max = 8, message = "Language must be 1-8 characters"))]
    pub language: Option<String>,
    pub email_notifications: Option<bool>,
    pub sms_notifications: Option<bool>,
    pub ai_assistant_enabled: Option<bool>,
}

/// PATCH /api/users/me/preferences
///
/// Update any subset of the caller's preferences. Omitted fields keep their
/// current value.
///
/// ### Request Body
/// ```json
/// { "language": "en-US", "sms_notifications": true }
/// ```
///
/// ### Responses
/// - `200 OK`: Preferences after the update
/// - `400 Bad Request`: Language empty or longer than 8 characters
pub async fn update_preferences(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(mut req): Json<UpdatePreferencesRequest>,
) -> ApiResult<PreferencesResponse> {
    let result = async {
        req.language = req.language.map(|l| l.trim().to_owned());
        validate_request(&req)?;

        let changes = PreferenceChanges {
            language: req.language,
            email_notifications: req.email_notifications,
            sms_notifications: req.sms_notifications,
            ai_assistant_enabled: req.ai_assistant_enabled,
        };
        let saved = user_preference::Model::update_for(app_state.db(), claims.sub, changes).await?;
        tracing::info!(user_id = claims.sub, "Preferences updated");
        Ok::<_, ServiceError>(PreferencesResponse::from(saved))
    }
    .await;

    respond(result, StatusCode::OK, "Preferences updated successfully")
}
