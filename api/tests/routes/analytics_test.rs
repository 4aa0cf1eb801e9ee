#[cfg(test)]
mod tests {
    use crate::helpers::{body_json, create_user, make_test_app, published_course, send, token_for};
    use axum::http::StatusCode;
    use chrono::{Duration, Utc};
    use db::models::{
        assignment::{self, NewAssignment},
        course_selection, submission,
        user::UserRole,
    };
    use services::course_analytics_service::{EXCELLENT_INSIGHT, NO_ASSIGNMENTS_INSIGHT};

    /// Test Case: Only course staff may read analytics
    #[tokio::test]
    async fn test_analytics_access() {
        let (app, app_state) = make_test_app().await;
        let owner = create_user(&app_state, "owner", UserRole::Teacher).await;
        let other = create_user(&app_state, "other", UserRole::Teacher).await;
        let student = create_user(&app_state, "student", UserRole::Student).await;
        let admin = create_user(&app_state, "admin", UserRole::Admin).await;
        let course = published_course(&app_state, owner.id, "Databases", None).await;
        let uri = format!("/api/courses/{}/analytics/overview", course.id);

        let response = send(&app, "GET", &uri, None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let (status, _) = body_json(send(&app, "GET", &uri, Some(&token_for(&student)), None).await).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, _) = body_json(send(&app, "GET", &uri, Some(&token_for(&other)), None).await).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, json) = body_json(
            send(&app, "GET", "/api/courses/4242/analytics/overview", Some(&token_for(&admin)), None).await,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Course not found");

        let (status, json) = body_json(send(&app, "GET", &uri, Some(&token_for(&admin)), None).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Course analytics retrieved successfully");
    }

    /// Test Case: A course without assignments reports the roster size and a single insight
    #[tokio::test]
    async fn test_analytics_without_assignments() {
        let (app, app_state) = make_test_app().await;
        let owner = create_user(&app_state, "owner", UserRole::Teacher).await;
        let student = create_user(&app_state, "student", UserRole::Student).await;
        let course = published_course(&app_state, owner.id, "Empty", None).await;
        course_selection::Model::enroll(app_state.db(), course.id, student.id)
            .await
            .unwrap();

        let uri = format!("/api/courses/{}/analytics/overview", course.id);
        let (status, json) = body_json(send(&app, "GET", &uri, Some(&token_for(&owner)), None).await).await;
        assert_eq!(status, StatusCode::OK);
        let data = &json["data"];
        assert_eq!(data["enrolledStudents"], 1);
        assert_eq!(data["totalAssignments"], 0);
        assert_eq!(data["completionRate"], 0.0);
        assert!(data["averageScore"].is_null());
        assert_eq!(data["insights"][0], NO_ASSIGNMENTS_INSIGHT);
    }

    /// Test Case: Graded and missing work feed the report
    #[tokio::test]
    async fn test_analytics_overview() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let owner = create_user(&app_state, "owner", UserRole::Teacher).await;
        let strong = create_user(&app_state, "strong", UserRole::Student).await;
        let idle = create_user(&app_state, "idle", UserRole::Student).await;
        let course = published_course(&app_state, owner.id, "Algorithms", None).await;
        course_selection::Model::enroll(db, course.id, strong.id).await.unwrap();
        course_selection::Model::enroll(db, course.id, idle.id).await.unwrap();

        let lab = assignment::Model::create(
            db,
            course.id,
            NewAssignment {
                title: "Lab 1".into(),
                deadline: Some(Utc::now() + Duration::days(7)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        submission::Model::create(db, lab.id, strong.id, Some("answer".into()), None)
            .await
            .unwrap()
            .grade(db, owner.id, 90, None, None, true)
            .await
            .unwrap();

        let uri = format!("/api/courses/{}/analytics/overview", course.id);
        let (status, json) = body_json(send(&app, "GET", &uri, Some(&token_for(&owner)), None).await).await;
        assert_eq!(status, StatusCode::OK);

        let data = &json["data"];
        assert_eq!(data["enrolledStudents"], 2);
        assert_eq!(data["totalAssignments"], 1);
        assert_eq!(data["gradedSubmissions"], 1);
        assert_eq!(data["pendingSubmissions"], 0);
        assert_eq!(data["completionRate"], 0.5);
        assert_eq!(data["averageScore"], 90.0);
        assert_eq!(data["medianScore"], 90.0);
        assert_eq!(data["overdueStudents"].as_array().unwrap().len(), 0);
        assert_eq!(data["difficultAssignments"].as_array().unwrap().len(), 0);
        assert_eq!(data["atRiskStudents"][0], idle.id.to_string());
        assert_eq!(data["atRiskStudents"].as_array().unwrap().len(), 1);
        assert_eq!(data["insights"][0], EXCELLENT_INSIGHT);
        assert_eq!(data["insights"][1], "1 student(s) are academically at risk.");
    }
}
