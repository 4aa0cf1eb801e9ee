//! # Notifications Routes Module
//!
//! Inbox listing and broadcast announcements under `/api/notifications`.

use axum::{Router, routing::get};
use get::list_notifications;
use post::create_notification;
use util::state::AppState;

pub mod get;
pub mod post;

/// Builds the `/notifications` route group.
///
/// - `GET /notifications` → `list_notifications`
/// - `POST /notifications` → `create_notification` (teacher/admin)
pub fn notifications_routes() -> Router<AppState> {
    Router::new().route("/", get(list_notifications).post(create_notification))
}

#[derive(Debug, serde::Serialize, Default)]
pub struct NotificationResponse {
    pub id: i64,
    pub target_type: String,
    pub recipient_id: Option<i64>,
    pub title: String,
    pub content: Option<String>,
    pub channels: Vec<db::models::notification::Channel>,
    pub status: String,
    pub sent_at: Option<String>,
    pub created_at: String,
}

impl From<db::models::notification::Model> for NotificationResponse {
    fn from(n: db::models::notification::Model) -> Self {
        Self {
            id: n.id,
            channels: n.channel_list(),
            target_type: n.target_type,
            recipient_id: n.recipient_id,
            title: n.title,
            content: n.content,
            status: n.status.to_string(),
            sent_at: n.sent_at.map(|t| t.to_rfc3339()),
            created_at: n.created_at.to_rfc3339(),
        }
    }
}
