#[cfg(test)]
mod tests {
    use crate::helpers::{body_json, create_user, make_test_app, send, token_for};
    use axum::http::StatusCode;
    use db::models::{
        approval_request::{self, ApprovalStatus, ApprovalType, Entity as ApprovalEntity},
        course::{self, CourseStatus, Entity as CourseEntity},
        notification::Entity as NotificationEntity,
        user::UserRole,
    };
    use sea_orm::EntityTrait;
    use serde_json::json;

    async fn request_review(app: &axum::Router, token: &str, course_id: i64) -> i64 {
        let (_, json) = body_json(
            send(app, "POST", &format!("/api/courses/{course_id}/publish"), Some(token), None).await,
        )
        .await;
        json["data"]["approval_id"].as_i64().unwrap()
    }

    /// Test Case: Admin approves a course publish request
    #[tokio::test]
    async fn test_approve_course_publish() {
        let (app, app_state) = make_test_app().await;
        let admin = create_user(&app_state, "admin", UserRole::Admin).await;
        let teacher = create_user(&app_state, "teacher", UserRole::Teacher).await;
        let draft = course::Model::create(app_state.db(), teacher.id, "Ethics", None, None, None)
            .await
            .unwrap();
        let approval_id = request_review(&app, &token_for(&teacher), draft.id).await;
        let admin_token = token_for(&admin);

        let (status, json) = body_json(
            send(&app, "GET", "/api/approvals?status=pending", Some(&admin_token), None).await,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["total"], 1);
        assert_eq!(json["data"]["approvals"][0]["approval_type"], "course_publish");
        assert_eq!(json["data"]["approvals"][0]["payload"]["course_id"], draft.id);

        let (status, _) = body_json(
            send(&app, "GET", "/api/approvals", Some(&token_for(&teacher)), None).await,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let uri = format!("/api/approvals/{approval_id}/decision");
        let (status, _) = body_json(
            send(&app, "POST", &uri, Some(&admin_token), Some(json!({"status": "pending"}))).await,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = body_json(
            send(&app, "POST", &uri, Some(&admin_token), Some(json!({"status": "approved", "comment": "ok"}))).await,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "approved");
        assert_eq!(json["data"]["processed_by"], admin.id);

        let stored = CourseEntity::find_by_id(draft.id).one(app_state.db()).await.unwrap().unwrap();
        assert_eq!(stored.status, CourseStatus::Published);

        let (status, json) = body_json(
            send(&app, "POST", &uri, Some(&admin_token), Some(json!({"status": "rejected"}))).await,
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "Approval request already processed");
    }

    /// Test Case: Rejection returns the course to draft
    #[tokio::test]
    async fn test_reject_course_publish() {
        let (app, app_state) = make_test_app().await;
        let admin = create_user(&app_state, "admin", UserRole::Admin).await;
        let teacher = create_user(&app_state, "teacher", UserRole::Teacher).await;
        let draft = course::Model::create(app_state.db(), teacher.id, "Ethics", None, None, None)
            .await
            .unwrap();
        let approval_id = request_review(&app, &token_for(&teacher), draft.id).await;

        let (status, _) = body_json(
            send(
                &app,
                "POST",
                &format!("/api/approvals/{approval_id}/decision"),
                Some(&token_for(&admin)),
                Some(json!({"status": "rejected", "comment": "Needs a syllabus"})),
            )
            .await,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let stored = CourseEntity::find_by_id(draft.id).one(app_state.db()).await.unwrap().unwrap();
        assert_eq!(stored.status, CourseStatus::Draft);
    }

    /// Test Case: A decision that fails partway leaves the request pending
    #[tokio::test]
    async fn test_failed_decision_rolls_back() {
        let (app, app_state) = make_test_app().await;
        let admin = create_user(&app_state, "admin", UserRole::Admin).await;
        let teacher = create_user(&app_state, "teacher", UserRole::Teacher).await;
        let orphan = approval_request::Model::create(
            app_state.db(),
            ApprovalType::CoursePublish,
            teacher.id,
            Some(r#"{"course_id":9999}"#.into()),
        )
        .await
        .unwrap();

        let (status, json) = body_json(
            send(
                &app,
                "POST",
                &format!("/api/approvals/{}/decision", orphan.id),
                Some(&token_for(&admin)),
                Some(json!({"status": "approved"})),
            )
            .await,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["success"], false);

        let stored = ApprovalEntity::find_by_id(orphan.id)
            .one(app_state.db())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, ApprovalStatus::Pending);
        assert!(stored.processed_by.is_none());
        assert!(
            NotificationEntity::find()
                .all(app_state.db())
                .await
                .unwrap()
                .is_empty()
        );
    }
}
