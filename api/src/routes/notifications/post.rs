use crate::auth::AuthUser;
use crate::response::{ApiResult, respond};
use crate::routes::{common::validate_request, notifications::NotificationResponse};
use axum::{Extension, Json, extract::State, http::StatusCode};
use db::models::notification::{self, Channel};
use serde::Deserialize;
use services::error::ServiceError;
use util::state::AppState;
use validator::Validate;

fn default_target_type() -> String {
    "announcement".to_string()
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,
    pub content: Option<String>,
    #[serde(default = "default_target_type")]
    #[validate(length(min = 1, max = 50, message = "Target type must be between 1 and 50 characters"))]
    pub target_type: String,
    #[serde(default)]
    pub channels: Vec<Channel>,
}

/// POST /api/notifications
///
/// Send a broadcast announcement to every user. Teachers and admins only.
/// Channels default to `["inbox"]`; other channels are recorded but not delivered.
///
/// ### Request Body
/// ```json
/// { "title": "Maintenance", "content": "Down at 22:00", "channels": ["inbox", "email"] }
/// ```
///
/// ### Responses
/// - `201 Created`: Broadcast stored with status `sent`
/// - `400 Bad Request`: Validation failure
/// - `403 Forbidden`: Caller is a student
pub async fn create_notification(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<CreateNotificationRequest>,
) -> ApiResult<NotificationResponse> {
    let result = async {
        if !claims.is_staff() {
            return Err(ServiceError::Forbidden(
                "Teacher or admin access required".into(),
            ));
        }
        validate_request(&req)?;

        let channels = if req.channels.is_empty() {
            vec![Channel::Inbox]
        } else {
            req.channels
        };
        let created = notification::Model::create_sent(
            app_state.db(),
            &req.target_type,
            None,
            req.title.trim(),
            req.content,
            &channels,
        )
        .await?;
        tracing::info!(notification_id = created.id, sender = claims.sub, "Broadcast sent");
        Ok(NotificationResponse::from(created))
    }
    .await;

    respond(result, StatusCode::CREATED, "Notification sent successfully")
}
