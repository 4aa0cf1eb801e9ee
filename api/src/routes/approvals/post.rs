use crate::auth::AuthUser;
use crate::response::{ApiResult, respond};
use crate::routes::approvals::ApprovalResponse;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::{
    approval_request::{ApprovalStatus, ApprovalType, Entity as ApprovalEntity},
    course::{self, CourseStatus},
};
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use serde::Deserialize;
use services::{error::ServiceError, notification_service::NotificationService};
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub status: ApprovalStatus,
    pub comment: Option<String>,
}

/// POST /api/approvals/{approval_id}/decision
///
/// Approve or reject a pending request. For `course_publish` requests an
/// approval publishes the course and a rejection returns it to `draft`. The
/// applicant is notified either way. All writes commit together or not at all.
///
/// ### Request Body
/// ```json
/// { "status": "approved", "comment": "Looks good" }
/// ```
///
/// ### Responses
/// - `200 OK`: Decision recorded
/// - `400 Bad Request`: `status` is `pending`
/// - `404 Not Found`: Approval request does not exist
/// - `409 Conflict`: Request was already processed
pub async fn decide_approval(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(approval_id): Path<i64>,
    Json(req): Json<DecisionRequest>,
) -> ApiResult<ApprovalResponse> {
    respond(
        apply_decision(app_state.db(), approval_id, claims.sub, req).await,
        StatusCode::OK,
        "Approval processed successfully",
    )
}

async fn apply_decision(
    db: &DatabaseConnection,
    approval_id: i64,
    reviewer_id: i64,
    req: DecisionRequest,
) -> Result<ApprovalResponse, ServiceError> {
    if req.status == ApprovalStatus::Pending {
        return Err(ServiceError::BadRequest(
            "Decision must be approved or rejected".into(),
        ));
    }

    let txn = db.begin().await?;

    let approval = ApprovalEntity::find_by_id(approval_id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("Approval request not found"))?;
    if !approval.is_pending() {
        return Err(ServiceError::Conflict("Approval request already processed".into()));
    }

    let course_id = if approval.approval_type == ApprovalType::CoursePublish {
        Some(approval.course_id().ok_or_else(|| {
            ServiceError::BadRequest("Approval payload is missing course_id".into())
        })?)
    } else {
        None
    };
    let applicant_id = approval.applicant_id;

    let decided = approval
        .decide(&txn, req.status, reviewer_id, req.comment)
        .await?
        .ok_or_else(|| ServiceError::Conflict("Approval request already processed".into()))?;

    if let Some(course_id) = course_id {
        let next = match req.status {
            ApprovalStatus::Approved => CourseStatus::Published,
            _ => CourseStatus::Draft,
        };
        let course = course::Model::set_status(&txn, course_id, next).await?;
        NotificationService::notify_user(
            &txn,
            applicant_id,
            "system",
            "Course review completed",
            format!("Course '{}' was {}", course.name, req.status),
        )
        .await?;
    }

    txn.commit().await?;
    tracing::info!(approval_id, status = %decided.status, reviewer_id, "Approval decided");
    Ok(ApprovalResponse::from(decided))
}
