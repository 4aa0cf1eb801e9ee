#[cfg(test)]
mod tests {
    use crate::helpers::{body_json, create_user, make_test_app, send, token_for};
    use axum::http::StatusCode;
    use db::models::user::UserRole;
    use serde_json::json;

    /// Test Case: Successful registration issues a student token
    #[tokio::test]
    async fn test_register_success() {
        let (app, _) = make_test_app().await;

        let body = json!({"username": "alice", "email": "alice@example.com", "password": "password123"});
        let (status, json) =
            body_json(send(&app, "POST", "/api/auth/register", None, Some(body)).await).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "User registered successfully");
        assert_eq!(json["data"]["token_type"], "Bearer");
        assert!(!json["data"]["token"].as_str().unwrap().is_empty());
        assert_eq!(json["data"]["user"]["role"], "student");
    }

    /// Test Case: Duplicate username is rejected
    #[tokio::test]
    async fn test_register_duplicate_username() {
        let (app, app_state) = make_test_app().await;
        create_user(&app_state, "alice", UserRole::Student).await;

        let body = json!({"username": "alice", "email": "other@example.com", "password": "password123"});
        let (status, json) =
            body_json(send(&app, "POST", "/api/auth/register", None, Some(body)).await).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "A user with this username already exists");
    }

    /// Test Case: Invalid email fails validation
    #[tokio::test]
    async fn test_register_invalid_email() {
        let (app, _) = make_test_app().await;

        let body = json!({"username": "bob", "email": "not-an-email", "password": "password123"});
        let (status, json) =
            body_json(send(&app, "POST", "/api/auth/register", None, Some(body)).await).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Invalid email format");
    }

    /// Test Case: Login by email and wrong password
    #[tokio::test]
    async fn test_login() {
        let (app, app_state) = make_test_app().await;
        create_user(&app_state, "carol", UserRole::Teacher).await;

        let ok = json!({"identifier": "carol@example.com", "password": "password123"});
        let (status, json) = body_json(send(&app, "POST", "/api/auth/login", None, Some(ok)).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["user"]["username"], "carol");
        assert_eq!(json["data"]["user"]["role"], "teacher");

        let bad = json!({"identifier": "carol", "password": "wrong-password"});
        let (status, json) = body_json(send(&app, "POST", "/api/auth/login", None, Some(bad)).await).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["message"], "Invalid credentials");
    }

    /// Test Case: /auth/me requires a valid token
    #[tokio::test]
    async fn test_me() {
        let (app, app_state) = make_test_app().await;
        let user = create_user(&app_state, "dave", UserRole::Student).await;

        let (status, json) =
            body_json(send(&app, "GET", "/api/auth/me", Some(&token_for(&user)), None).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["id"], user.id);

        let response = send(&app, "GET", "/api/auth/me", None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = send(&app, "GET", "/api/auth/me", Some("garbage"), None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
