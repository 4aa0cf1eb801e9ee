#[cfg(test)]
mod tests {
    use crate::helpers::{body_json, create_user, make_test_app, published_course, send, token_for};
    use axum::http::StatusCode;
    use chrono::{Duration, Utc};
    use db::models::{
        approval_request::{self, ApprovalType},
        assignment::{self, NewAssignment},
        course_selection, submission,
        user::UserRole,
    };
    use serde_json::Value;

    fn titles(json: &Value) -> Vec<String> {
        json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["title"].as_str().unwrap().to_owned())
            .collect()
    }

    /// Test Case: Student and teacher todos follow submission state
    #[tokio::test]
    async fn test_student_and_teacher_todos() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let teacher = create_user(&app_state, "teacher", UserRole::Teacher).await;
        let student = create_user(&app_state, "student", UserRole::Student).await;
        let course = published_course(&app_state, teacher.id, "Databases", None).await;
        course_selection::Model::enroll(db, course.id, student.id).await.unwrap();

        let mut published = Vec::new();
        for title in ["Lab 1", "Lab 2"] {
            let a = assignment::Model::create(
                db,
                course.id,
                NewAssignment {
                    title: title.into(),
                    deadline: Some(Utc::now() + Duration::days(3)),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .publish(db)
            .await
            .unwrap();
            published.push(a);
        }
        assignment::Model::create(
            db,
            course.id,
            NewAssignment {
                title: "Draft lab".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let handed_in = submission::Model::create(db, published[1].id, student.id, Some("answer".into()), None)
            .await
            .unwrap();

        let (status, json) =
            body_json(send(&app, "GET", "/api/todos", Some(&token_for(&student)), None).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(titles(&json), vec!["Lab 1", "Lab 2"]);
        assert_eq!(json["data"][0]["type"], "assignment");
        assert_eq!(json["data"][0]["status"], "pending");
        assert_eq!(json["data"][0]["description"], "Databases");
        assert!(json["data"][0]["due_at"].is_string());
        assert_eq!(json["data"][1]["status"], "submitted");

        let (status, json) =
            body_json(send(&app, "GET", "/api/todos", Some(&token_for(&teacher)), None).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(titles(&json), vec!["Lab 2"]);
        assert_eq!(json["data"][0]["type"], "grading");
        assert_eq!(
            json["data"][0]["description"],
            "1 submission(s) awaiting grading in Databases"
        );

        handed_in
            .grade(db, teacher.id, 90, None, None, true)
            .await
            .unwrap();

        let (_, json) =
            body_json(send(&app, "GET", "/api/todos", Some(&token_for(&student)), None).await).await;
        assert_eq!(titles(&json), vec!["Lab 1"]);
        let (_, json) =
            body_json(send(&app, "GET", "/api/todos", Some(&token_for(&teacher)), None).await).await;
        assert!(json["data"].as_array().unwrap().is_empty());
    }

    /// Test Case: Admins see a single entry while approvals are pending
    #[tokio::test]
    async fn test_admin_todos() {
        let (app, app_state) = make_test_app().await;
        let admin = create_user(&app_state, "admin", UserRole::Admin).await;
        let teacher = create_user(&app_state, "teacher", UserRole::Teacher).await;
        let token = token_for(&admin);

        let (_, json) = body_json(send(&app, "GET", "/api/todos", Some(&token), None).await).await;
        assert!(json["data"].as_array().unwrap().is_empty());

        for _ in 0..2 {
            approval_request::Model::create(
                app_state.db(),
                ApprovalType::CoursePublish,
                teacher.id,
                Some(r#"{"course_id":1}"#.into()),
            )
            .await
            .unwrap();
        }

        let (status, json) = body_json(send(&app, "GET", "/api/todos", Some(&token), None).await).await;
        assert_eq!(status, StatusCode::OK);
        let todos = json["data"].as_array().unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0]["type"], "approval");
        assert_eq!(todos[0]["description"], "2 approval request(s) awaiting review");

        let response = send(&app, "GET", "/api/todos", None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
