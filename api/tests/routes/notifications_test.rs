#[cfg(test)]
mod tests {
    use crate::helpers::{body_json, create_user, make_test_app, send, token_for};
    use axum::http::StatusCode;
    use db::models::user::UserRole;
    use serde_json::json;
    use services::notification_service::NotificationService;

    /// Test Case: Staff broadcast; students cannot
    #[tokio::test]
    async fn test_create_broadcast() {
        let (app, app_state) = make_test_app().await;
        let teacher = create_user(&app_state, "teacher", UserRole::Teacher).await;
        let student = create_user(&app_state, "student", UserRole::Student).await;
        let body = json!({"title": "Maintenance", "content": "Down at 22:00"});

        let (status, json) = body_json(
            send(&app, "POST", "/api/notifications", Some(&token_for(&teacher)), Some(body.clone())).await,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(json["data"]["recipient_id"].is_null());
        assert_eq!(json["data"]["target_type"], "announcement");
        assert_eq!(json["data"]["channels"], json!(["inbox"]));
        assert_eq!(json["data"]["status"], "sent");

        let (status, _) = body_json(
            send(&app, "POST", "/api/notifications", Some(&token_for(&student)), Some(body)).await,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = body_json(
            send(&app, "POST", "/api/notifications", Some(&token_for(&teacher)), Some(json!({"title": ""}))).await,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    /// Test Case: Inbox shows broadcasts plus own messages
    #[tokio::test]
    async fn test_list_notifications_visibility() {
        let (app, app_state) = make_test_app().await;
        let admin = create_user(&app_state, "admin", UserRole::Admin).await;
        let alice = create_user(&app_state, "alice", UserRole::Student).await;
        let bob = create_user(&app_state, "bob", UserRole::Student).await;

        send(
            &app,
            "POST",
            "/api/notifications",
            Some(&token_for(&admin)),
            Some(json!({"title": "Welcome", "channels": ["inbox", "email"]})),
        )
        .await;
        NotificationService::notify_user(app_state.db(), alice.id, "submission", "Graded", "90")
            .await
            .unwrap();
        NotificationService::notify_user(app_state.db(), bob.id, "submission", "Graded", "75")
            .await
            .unwrap();

        let (status, json) = body_json(
            send(&app, "GET", "/api/notifications", Some(&token_for(&alice)), None).await,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["total"], 2);
        let recipients: Vec<_> = json["data"]["notifications"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["recipient_id"].as_i64())
            .collect();
        assert!(recipients.contains(&Some(alice.id)));
        assert!(!recipients.contains(&Some(bob.id)));

        let (_, json) = body_json(
            send(&app, "GET", "/api/notifications?target_type=submission", Some(&token_for(&alice)), None).await,
        )
        .await;
        assert_eq!(json["data"]["total"], 1);

        let (_, json) = body_json(
            send(&app, "GET", "/api/notifications", Some(&token_for(&admin)), None).await,
        )
        .await;
        assert_eq!(json["data"]["total"], 3);
    }
}
