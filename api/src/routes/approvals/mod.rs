//! # Approvals Routes Module
//!
//! Admin review queue under `/api/approvals`. The whole group sits behind the
//! `allow_admin` guard.

use axum::{
    Router,
    routing::{get, post},
};
use get::list_approvals;
use post::decide_approval;
use util::state::AppState;

pub mod get;
pub mod post;

/// Builds the `/approvals` route group.
///
/// - `GET /approvals` → `list_approvals`
/// - `POST /approvals/{approval_id}/decision` → `decide_approval`
pub fn approvals_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_approvals))
        .route("/{approval_id}/decision", post(decide_approval))
}

#[derive(Debug, serde::Serialize, Default)]
pub struct ApprovalResponse {
    pub id: i64,
    pub approval_type: String,
    pub status: String,
    pub applicant_id: i64,
    pub payload: Option<serde_json::Value>,
    pub processed_by: Option<i64>,
    pub comment: Option<String>,
    pub processed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<db::models::approval_request::Model> for ApprovalResponse {
    fn from(a: db::models::approval_request::Model) -> Self {
        Self {
            id: a.id,
            approval_type: a.approval_type.to_string(),
            status: a.status.to_string(),
            applicant_id: a.applicant_id,
            payload: crate::routes::common::from_json_text(a.payload.as_deref()),
            processed_by: a.processed_by,
            comment: a.comment,
            processed_at: a.processed_at.map(|t| t.to_rfc3339()),
            created_at: a.created_at.to_rfc3339(),
            updated_at: a.updated_at.to_rfc3339(),
        }
    }
}
