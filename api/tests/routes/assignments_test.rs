#[cfg(test)]
mod tests {
    use crate::helpers::{body_json, create_user, make_test_app, published_course, send, token_for};
    use axum::http::StatusCode;
    use chrono::{Duration, Utc};
    use db::models::{
        notification::{Column as NotificationColumn, Entity as NotificationEntity},
        user::UserRole,
    };
    use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
    use serde_json::json;

    async fn inbox_count(app_state: &util::state::AppState, user_id: i64) -> usize {
        NotificationEntity::find()
            .filter(NotificationColumn::RecipientId.eq(user_id))
            .all(app_state.db())
            .await
            .unwrap()
            .len()
    }

    /// Test Case: Create, publish and update an assignment
    #[tokio::test]
    async fn test_assignment_lifecycle() {
        let (app, app_state) = make_test_app().await;
        let teacher = create_user(&app_state, "teacher", UserRole::Teacher).await;
        let student = create_user(&app_state, "student", UserRole::Student).await;
        let course = published_course(&app_state, teacher.id, "Databases", None).await;
        send(&app, "POST", &format!("/api/courses/{}/enroll", course.id), Some(&token_for(&student)), None).await;
        let teacher_token = token_for(&teacher);
        let student_token = token_for(&student);

        let deadline = Utc::now() + Duration::days(7);
        let body = json!({
            "title": "Lab 1",
            "deadline": deadline.to_rfc3339(),
            "allow_resubmit": true,
            "grading_rubric": {"correctness": 70, "style": 30}
        });
        let list_uri = format!("/api/courses/{}/assignments", course.id);
        let (status, json) =
            body_json(send(&app, "POST", &list_uri, Some(&teacher_token), Some(body)).await).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["published"], false);
        assert_eq!(json["data"]["assignment_type"], "assignment");
        assert_eq!(json["data"]["grading_rubric"]["style"], 30);
        let assignment_id = json["data"]["id"].as_i64().unwrap();
        let uri = format!("/api/assignments/{assignment_id}");

        // Drafts are hidden from students
        let (_, json) = body_json(send(&app, "GET", &list_uri, Some(&student_token), None).await).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 0);
        let (status, _) = body_json(send(&app, "GET", &uri, Some(&student_token), None).await).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let publish_uri = format!("{uri}/publish");
        let (status, json) =
            body_json(send(&app, "POST", &publish_uri, Some(&teacher_token), None).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["published"], true);
        assert!(json["data"]["release_at"].is_string());
        assert_eq!(inbox_count(&app_state, student.id).await, 1);

        let (status, _) =
            body_json(send(&app, "POST", &publish_uri, Some(&teacher_token), None).await).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, json) = body_json(send(&app, "GET", &uri, Some(&student_token), None).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["title"], "Lab 1");

        let moved = json!({"deadline": (deadline + Duration::days(2)).to_rfc3339()});
        let (status, _) =
            body_json(send(&app, "PATCH", &uri, Some(&teacher_token), Some(moved)).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(inbox_count(&app_state, student.id).await, 2);

        let (status, _) = body_json(
            send(&app, "PATCH", &uri, Some(&student_token), Some(json!({"title": "Mine"}))).await,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    /// Test Case: Release time after the deadline is rejected
    #[tokio::test]
    async fn test_create_assignment_release_after_deadline() {
        let (app, app_state) = make_test_app().await;
        let teacher = create_user(&app_state, "teacher", UserRole::Teacher).await;
        let course = published_course(&app_state, teacher.id, "Databases", None).await;

        let now = Utc::now();
        let body = json!({
            "title": "Backwards",
            "release_at": (now + Duration::days(3)).to_rfc3339(),
            "deadline": (now + Duration::days(1)).to_rfc3339()
        });
        let (status, json) = body_json(
            send(
                &app,
                "POST",
                &format!("/api/courses/{}/assignments", course.id),
                Some(&token_for(&teacher)),
                Some(body),
            )
            .await,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Release time must not be after the deadline");
    }

    /// Test Case: Whitespace-only titles are rejected on create and update
    #[tokio::test]
    async fn test_blank_title_rejected() {
        let (app, app_state) = make_test_app().await;
        let teacher = create_user(&app_state, "teacher", UserRole::Teacher).await;
        let course = published_course(&app_state, teacher.id, "Databases", None).await;
        let token = token_for(&teacher);
        let create_uri = format!("/api/courses/{}/assignments", course.id);

        let (status, json) = body_json(
            send(&app, "POST", &create_uri, Some(&token), Some(json!({"title": "   "}))).await,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);

        let (status, json) = body_json(
            send(&app, "POST", &create_uri, Some(&token), Some(json!({"title": "  Lab 1  "}))).await,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["title"], "Lab 1");
        let id = json["data"]["id"].as_i64().unwrap();

        let (status, _) = body_json(
            send(&app, "PATCH", &format!("/api/assignments/{id}"), Some(&token), Some(json!({"title": " \t "}))).await,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    /// Test Case: Duplicate into own and foreign courses
    #[tokio::test]
    async fn test_duplicate_assignment() {
        let (app, app_state) = make_test_app().await;
        let teacher = create_user(&app_state, "teacher", UserRole::Teacher).await;
        let other = create_user(&app_state, "other", UserRole::Teacher).await;
        let source = published_course(&app_state, teacher.id, "Source", None).await;
        let target = published_course(&app_state, teacher.id, "Target", None).await;
        let foreign = published_course(&app_state, other.id, "Foreign", None).await;
        let token = token_for(&teacher);

        let (_, json) = body_json(
            send(
                &app,
                "POST",
                &format!("/api/courses/{}/assignments", source.id),
                Some(&token),
                Some(json!({"title": "Essay"})),
            )
            .await,
        )
        .await;
        let id = json["data"]["id"].as_i64().unwrap();
        let uri = format!("/api/assignments/{id}/duplicate");

        let (status, json) = body_json(
            send(&app, "POST", &uri, Some(&token), Some(json!({"target_course_id": target.id}))).await,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["title"], "Essay (copy)");
        assert_eq!(json["data"]["course_id"], target.id);
        assert_eq!(json["data"]["published"], false);

        let (status, _) = body_json(
            send(&app, "POST", &uri, Some(&token), Some(json!({"target_course_id": foreign.id}))).await,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
