#[cfg(test)]
mod tests {
    use crate::helpers::{body_json, create_user, make_test_app, published_course, send, token_for};
    use axum::http::StatusCode;
    use chrono::{Duration, Utc};
    use db::models::{
        assignment::{self, NewAssignment},
        course_selection,
        user::{self, UserRole},
    };
    use serde_json::json;
    use util::state::AppState;

    struct Fixture {
        teacher: user::Model,
        student: user::Model,
        outsider: user::Model,
        assignment: assignment::Model,
    }

    async fn setup(app_state: &AppState, max_resubmit: Option<i32>) -> Fixture {
        let teacher = create_user(app_state, "teacher", UserRole::Teacher).await;
        let student = create_user(app_state, "student", UserRole::Student).await;
        let outsider = create_user(app_state, "outsider", UserRole::Student).await;
        let course = published_course(app_state, teacher.id, "Databases", None).await;
        course_selection::Model::enroll(app_state.db(), course.id, student.id)
            .await
            .unwrap();

        let assignment = assignment::Model::create(
            app_state.db(),
            course.id,
            NewAssignment {
                title: "Lab 1".into(),
                deadline: Some(Utc::now() + Duration::days(7)),
                allow_resubmit: true,
                max_resubmit,
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .publish(app_state.db())
        .await
        .unwrap();

        Fixture { teacher, student, outsider, assignment }
    }

    /// Test Case: Submission intake rules
    #[tokio::test]
    async fn test_create_submission() {
        let (app, app_state) = make_test_app().await;
        let f = setup(&app_state, None).await;
        let uri = format!("/api/assignments/{}/submissions", f.assignment.id);
        let body = json!({"content": "My answer", "attachments": ["report.pdf"]});

        let (status, json) = body_json(
            send(&app, "POST", &uri, Some(&token_for(&f.outsider)), Some(body.clone())).await,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["message"], "You are not enrolled in this course");

        let (status, json) = body_json(
            send(&app, "POST", &uri, Some(&token_for(&f.student)), Some(body.clone())).await,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["status"], "submitted");
        assert_eq!(json["data"]["attachments"][0], "report.pdf");
        assert!(json["data"]["submitted_at"].is_string());

        let (status, json) = body_json(
            send(&app, "POST", &uri, Some(&token_for(&f.student)), Some(body)).await,
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "Submission already exists, please update instead");
    }

    /// Test Case: Submitting to an unpublished or closed assignment
    #[tokio::test]
    async fn test_submission_window() {
        let (app, app_state) = make_test_app().await;
        let f = setup(&app_state, None).await;
        let token = token_for(&f.student);

        let draft = assignment::Model::create(
            app_state.db(),
            f.assignment.course_id,
            NewAssignment { title: "Draft".into(), ..Default::default() },
        )
        .await
        .unwrap();
        let (status, json) = body_json(
            send(
                &app,
                "POST",
                &format!("/api/assignments/{}/submissions", draft.id),
                Some(&token),
                Some(json!({"content": "early"})),
            )
            .await,
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "Assignment is not published");

        let closed = assignment::Model::create(
            app_state.db(),
            f.assignment.course_id,
            NewAssignment {
                title: "Closed".into(),
                release_at: Some(Utc::now() - Duration::days(3)),
                deadline: Some(Utc::now() - Duration::days(1)),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .publish(app_state.db())
        .await
        .unwrap();
        let (status, json) = body_json(
            send(
                &app,
                "POST",
                &format!("/api/assignments/{}/submissions", closed.id),
                Some(&token),
                Some(json!({"content": "late"})),
            )
            .await,
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "Assignment submission deadline has passed");
    }

    /// Test Case: Resubmission respects the limit and ownership
    #[tokio::test]
    async fn test_resubmit() {
        let (app, app_state) = make_test_app().await;
        let f = setup(&app_state, Some(1)).await;
        let (_, json) = body_json(
            send(
                &app,
                "POST",
                &format!("/api/assignments/{}/submissions", f.assignment.id),
                Some(&token_for(&f.student)),
                Some(json!({"content": "v1"})),
            )
            .await,
        )
        .await;
        let uri = format!("/api/submissions/{}", json["data"]["id"].as_i64().unwrap());

        let (status, _) = body_json(
            send(&app, "PUT", &uri, Some(&token_for(&f.outsider)), Some(json!({"content": "mine"}))).await,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, json) = body_json(
            send(&app, "PUT", &uri, Some(&token_for(&f.student)), Some(json!({"content": "v2"}))).await,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "resubmitted");
        assert_eq!(json["data"]["resubmit_count"], 1);
        assert_eq!(json["data"]["content"], "v2");

        let (status, json) = body_json(
            send(&app, "PUT", &uri, Some(&token_for(&f.student)), Some(json!({"content": "v3"}))).await,
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "Resubmission limit reached");
    }

    /// Test Case: Grade, view and appeal
    #[tokio::test]
    async fn test_grade_and_appeal() {
        let (app, app_state) = make_test_app().await;
        let f = setup(&app_state, None).await;
        let student_token = token_for(&f.student);
        let teacher_token = token_for(&f.teacher);
        let (_, json) = body_json(
            send(
                &app,
                "POST",
                &format!("/api/assignments/{}/submissions", f.assignment.id),
                Some(&student_token),
                Some(json!({"content": "answer"})),
            )
            .await,
        )
        .await;
        let id = json["data"]["id"].as_i64().unwrap();
        let grade_uri = format!("/api/submissions/{id}/grade");
        let appeal_uri = format!("/api/submissions/{id}/appeal");
        let reason = json!({"reason": "Question 3 was marked wrongly"});

        let (status, json) =
            body_json(send(&app, "POST", &appeal_uri, Some(&student_token), Some(reason.clone())).await).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "Submission has not been graded or published");

        let (status, _) = body_json(
            send(&app, "POST", &grade_uri, Some(&teacher_token), Some(json!({"score": 120}))).await,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = body_json(
            send(&app, "POST", &grade_uri, Some(&teacher_token), Some(json!({"score": 80, "rubric_scores": [1, 2]}))).await,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Invalid rubric scores format");

        let (status, _) = body_json(
            send(&app, "POST", &grade_uri, Some(&student_token), Some(json!({"score": 100}))).await,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, json) = body_json(
            send(
                &app,
                "POST",
                &grade_uri,
                Some(&teacher_token),
                Some(json!({"score": 85, "feedback": "Good", "rubric_scores": {"style": 5}, "publish": true})),
            )
            .await,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "graded");
        assert_eq!(json["data"]["score"], 85);
        assert_eq!(json["data"]["rubric_scores"]["style"], 5);

        let view_uri = format!("/api/submissions/{id}");
        let (status, json) = body_json(send(&app, "GET", &view_uri, Some(&student_token), None).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["assignment_title"], "Lab 1");
        let (status, _) =
            body_json(send(&app, "GET", &view_uri, Some(&token_for(&f.outsider)), None).await).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, json) =
            body_json(send(&app, "POST", &appeal_uri, Some(&student_token), Some(reason.clone())).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "appealed");

        let (status, json) =
            body_json(send(&app, "POST", &appeal_uri, Some(&student_token), Some(reason)).await).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "Submission already appealed");
    }

    /// Test Case: Regrading an appealed submission allows a fresh appeal
    #[tokio::test]
    async fn test_regrade_reopens_appeal() {
        let (app, app_state) = make_test_app().await;
        let f = setup(&app_state, None).await;
        let student_token = token_for(&f.student);
        let teacher_token = token_for(&f.teacher);
        let (_, json) = body_json(
            send(
                &app,
                "POST",
                &format!("/api/assignments/{}/submissions", f.assignment.id),
                Some(&student_token),
                Some(json!({"content": "answer"})),
            )
            .await,
        )
        .await;
        let id = json["data"]["id"].as_i64().unwrap();
        let grade_uri = format!("/api/submissions/{id}/grade");
        let appeal_uri = format!("/api/submissions/{id}/appeal");

        let (status, _) = body_json(
            send(&app, "POST", &grade_uri, Some(&teacher_token), Some(json!({"score": 50, "publish": true}))).await,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = body_json(
            send(&app, "POST", &appeal_uri, Some(&student_token), Some(json!({"reason": "   "}))).await,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);

        let (status, json) = body_json(
            send(&app, "POST", &appeal_uri, Some(&student_token), Some(json!({"reason": "  wrong rubric  "}))).await,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["appeal_reason"], "wrong rubric");
        assert!(json["data"]["appealed_at"].is_string());

        let (status, json) = body_json(
            send(&app, "POST", &grade_uri, Some(&teacher_token), Some(json!({"score": 80, "publish": true}))).await,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "graded");
        assert_eq!(json["data"]["graded_by"], f.teacher.id);
        assert!(json["data"]["appeal_reason"].is_null());
        assert!(json["data"]["appealed_at"].is_null());

        let (status, json) = body_json(
            send(&app, "POST", &appeal_uri, Some(&student_token), Some(json!({"reason": "still wrong"}))).await,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "appealed");
        assert_eq!(json["data"]["appeal_reason"], "still wrong");
    }

    /// Test Case: Batch grading validates the whole request first
    #[tokio::test]
    async fn test_batch_grade() {
        let (app, app_state) = make_test_app().await;
        let f = setup(&app_state, None).await;
        let (_, json) = body_json(
            send(
                &app,
                "POST",
                &format!("/api/assignments/{}/submissions", f.assignment.id),
                Some(&token_for(&f.student)),
                Some(json!({"content": "answer"})),
            )
            .await,
        )
        .await;
        let id = json["data"]["id"].as_i64().unwrap();
        let uri = format!("/api/assignments/{}/submissions/batch-grade", f.assignment.id);
        let token = token_for(&f.teacher);

        let dup = json!({"grades": [{"submission_id": id, "score": 70}, {"submission_id": id, "score": 80}]});
        let (status, json) = body_json(send(&app, "POST", &uri, Some(&token), Some(dup)).await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Duplicate submission IDs in request");

        let missing = json!({"grades": [{"submission_id": id, "score": 70}, {"submission_id": 9999, "score": 80}]});
        let (status, json) = body_json(send(&app, "POST", &uri, Some(&token), Some(missing)).await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Some submissions not found");

        let ok = json!({"grades": [{"submission_id": id, "score": 70}], "publish": true});
        let (status, json) = body_json(send(&app, "POST", &uri, Some(&token), Some(ok)).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"][0]["score"], 70);
        assert_eq!(json["data"][0]["status"], "graded");
        assert_eq!(json["data"][0]["graded_by"], f.teacher.id);

        let list_uri = format!("/api/assignments/{}/submissions", f.assignment.id);
        let (status, json) = body_json(send(&app, "GET", &list_uri, Some(&token), None).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
    }

    /// Test Case: Student submission history visibility
    #[tokio::test]
    async fn test_student_submissions_visibility() {
        let (app, app_state) = make_test_app().await;
        let f = setup(&app_state, None).await;
        let stranger = create_user(&app_state, "stranger", UserRole::Teacher).await;
        send(
            &app,
            "POST",
            &format!("/api/assignments/{}/submissions", f.assignment.id),
            Some(&token_for(&f.student)),
            Some(json!({"content": "answer"})),
        )
        .await;
        let uri = format!("/api/students/{}/submissions", f.student.id);

        let (status, json) = body_json(send(&app, "GET", &uri, Some(&token_for(&f.student)), None).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().unwrap().len(), 1);

        let (status, json) = body_json(send(&app, "GET", &uri, Some(&token_for(&f.teacher)), None).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().unwrap().len(), 1);

        let (status, json) = body_json(send(&app, "GET", &uri, Some(&token_for(&stranger)), None).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().unwrap().len(), 0);

        let (status, _) = body_json(send(&app, "GET", &uri, Some(&token_for(&f.outsider)), None).await).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
