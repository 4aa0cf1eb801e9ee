#[cfg(test)]
mod tests {
    use crate::helpers::{body_json, create_user, make_test_app, published_course, send, token_for};
    use axum::http::StatusCode;
    use db::models::{
        course::{self, CourseStatus},
        user::UserRole,
    };
    use sea_orm::EntityTrait;
    use serde_json::json;

    /// Test Case: Teacher creates a draft course; students cannot
    #[tokio::test]
    async fn test_create_course() {
        let (app, app_state) = make_test_app().await;
        let teacher = create_user(&app_state, "teacher", UserRole::Teacher).await;
        let student = create_user(&app_state, "student", UserRole::Student).await;

        let body = json!({"name": "Databases", "semester": "2026-FALL", "credit": 3, "enroll_limit": 40});
        let (status, json) = body_json(
            send(&app, "POST", "/api/courses", Some(&token_for(&teacher)), Some(body.clone())).await,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["status"], "draft");
        assert_eq!(json["data"]["teacher_id"], teacher.id);

        let (status, _) = body_json(
            send(&app, "POST", "/api/courses", Some(&token_for(&student)), Some(body)).await,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let response = send(&app, "GET", "/api/courses", None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    /// Test Case: Only the owner may update a course
    #[tokio::test]
    async fn test_update_course_ownership() {
        let (app, app_state) = make_test_app().await;
        let owner = create_user(&app_state, "owner", UserRole::Teacher).await;
        let other = create_user(&app_state, "other", UserRole::Teacher).await;
        let course = published_course(&app_state, owner.id, "Networks", None).await;
        let uri = format!("/api/courses/{}", course.id);

        let (status, json) = body_json(
            send(&app, "PUT", &uri, Some(&token_for(&other)), Some(json!({"name": "Hijacked"}))).await,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["success"], false);

        let (status, json) = body_json(
            send(&app, "PUT", &uri, Some(&token_for(&owner)), Some(json!({"name": "Networks II"}))).await,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["name"], "Networks II");

        let (status, _) = body_json(
            send(&app, "GET", "/api/courses/9999", Some(&token_for(&owner)), None).await,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    /// Test Case: Enrollment rules (published only, no duplicates, limit)
    #[tokio::test]
    async fn test_enrollment_rules() {
        let (app, app_state) = make_test_app().await;
        let teacher = create_user(&app_state, "teacher", UserRole::Teacher).await;
        let s1 = create_user(&app_state, "s1", UserRole::Student).await;
        let s2 = create_user(&app_state, "s2", UserRole::Student).await;

        let draft = course::Model::create(app_state.db(), teacher.id, "Draft", None, None, None)
            .await
            .unwrap();
        let (status, json) = body_json(
            send(&app, "POST", &format!("/api/courses/{}/enroll", draft.id), Some(&token_for(&s1)), None).await,
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "Course is not open for enrollment");

        let course = published_course(&app_state, teacher.id, "Small", Some(1)).await;
        let enroll_uri = format!("/api/courses/{}/enroll", course.id);

        let (status, json) =
            body_json(send(&app, "POST", &enroll_uri, Some(&token_for(&s1)), None).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "enrolled");

        let (status, json) =
            body_json(send(&app, "POST", &enroll_uri, Some(&token_for(&s1)), None).await).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "Already enrolled in this course");

        let (status, json) =
            body_json(send(&app, "POST", &enroll_uri, Some(&token_for(&s2)), None).await).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "Course enrollment limit reached");

        let (status, _) =
            body_json(send(&app, "POST", &enroll_uri, Some(&token_for(&teacher)), None).await).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    /// Test Case: Dropping and re-enrolling reuses the selection
    #[tokio::test]
    async fn test_drop_and_reenroll() {
        let (app, app_state) = make_test_app().await;
        let teacher = create_user(&app_state, "teacher", UserRole::Teacher).await;
        let student = create_user(&app_state, "student", UserRole::Student).await;
        let course = published_course(&app_state, teacher.id, "Compilers", Some(1)).await;
        let uri = format!("/api/courses/{}/enroll", course.id);
        let token = token_for(&student);

        let (status, _) = body_json(send(&app, "DELETE", &uri, Some(&token), None).await).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        send(&app, "POST", &uri, Some(&token), None).await;
        let (status, json) = body_json(send(&app, "DELETE", &uri, Some(&token), None).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "dropped");

        let (status, _) = body_json(send(&app, "DELETE", &uri, Some(&token), None).await).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, json) = body_json(send(&app, "POST", &uri, Some(&token), None).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "enrolled");
    }

    /// Test Case: Listing carries metrics and filters by status
    #[tokio::test]
    async fn test_list_courses_with_metrics() {
        let (app, app_state) = make_test_app().await;
        let teacher = create_user(&app_state, "teacher", UserRole::Teacher).await;
        let student = create_user(&app_state, "student", UserRole::Student).await;
        let open = published_course(&app_state, teacher.id, "Open", None).await;
        course::Model::create(app_state.db(), teacher.id, "Hidden", None, None, None)
            .await
            .unwrap();

        send(&app, "POST", &format!("/api/courses/{}/enroll", open.id), Some(&token_for(&student)), None).await;

        let (status, json) = body_json(
            send(&app, "GET", "/api/courses?status=published", Some(&token_for(&student)), None).await,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["total"], 1);
        let item = &json["data"]["courses"][0];
        assert_eq!(item["name"], "Open");
        assert_eq!(item["metrics"]["enrolled_count"], 1);
        assert_eq!(item["metrics"]["assignments"], 0);
    }

    /// Test Case: Roster is limited to course staff
    #[tokio::test]
    async fn test_course_roster_access() {
        let (app, app_state) = make_test_app().await;
        let owner = create_user(&app_state, "owner", UserRole::Teacher).await;
        let other = create_user(&app_state, "other", UserRole::Teacher).await;
        let student = create_user(&app_state, "student", UserRole::Student).await;
        let course = published_course(&app_state, owner.id, "Graphics", None).await;
        send(&app, "POST", &format!("/api/courses/{}/enroll", course.id), Some(&token_for(&student)), None).await;

        let uri = format!("/api/courses/{}/students", course.id);
        let (status, _) = body_json(send(&app, "GET", &uri, Some(&token_for(&other)), None).await).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, _) = body_json(send(&app, "GET", &uri, Some(&token_for(&student)), None).await).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, json) = body_json(send(&app, "GET", &uri, Some(&token_for(&owner)), None).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"][0]["student_id"], student.id);
        assert_eq!(json["data"][0]["username"], "student");
    }

    /// Test Case: Publishing files an approval request
    #[tokio::test]
    async fn test_publish_course_requests_review() {
        let (app, app_state) = make_test_app().await;
        let teacher = create_user(&app_state, "teacher", UserRole::Teacher).await;
        let draft = course::Model::create(app_state.db(), teacher.id, "Ethics", None, None, None)
            .await
            .unwrap();
        let uri = format!("/api/courses/{}/publish", draft.id);

        let (status, json) = body_json(send(&app, "POST", &uri, Some(&token_for(&teacher)), None).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["course"]["status"], "pending_review");
        assert!(json["data"]["approval_id"].as_i64().is_some());

        let (status, json) = body_json(send(&app, "POST", &uri, Some(&token_for(&teacher)), None).await).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "Course is already awaiting review");

        let stored = course::Entity::find_by_id(draft.id).one(app_state.db()).await.unwrap().unwrap();
        assert_eq!(stored.status, CourseStatus::PendingReview);
    }

    /// Test Case: Student course view reports assignment progress
    #[tokio::test]
    async fn test_student_courses() {
        let (app, app_state) = make_test_app().await;
        let teacher = create_user(&app_state, "teacher", UserRole::Teacher).await;
        let student = create_user(&app_state, "student", UserRole::Student).await;
        let peer = create_user(&app_state, "peer", UserRole::Student).await;
        let course = published_course(&app_state, teacher.id, "Algorithms", None).await;
        send(&app, "POST", &format!("/api/courses/{}/enroll", course.id), Some(&token_for(&student)), None).await;

        let uri = format!("/api/students/{}/courses", student.id);
        let (status, json) = body_json(send(&app, "GET", &uri, Some(&token_for(&student)), None).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"][0]["course_id"], course.id);
        assert_eq!(json["data"][0]["total_assignments"], 0);

        let (status, _) = body_json(send(&app, "GET", &uri, Some(&token_for(&peer)), None).await).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = body_json(send(&app, "GET", &uri, Some(&token_for(&teacher)), None).await).await;
        assert_eq!(status, StatusCode::OK);
    }
}
