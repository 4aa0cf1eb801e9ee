#[cfg(test)]
mod tests {
    use api::auth::{AuthUser, Claims};
    use axum::{extract::FromRequestParts, http::Request};
    use chrono::{Duration, Utc};
    use db::models::user::UserRole;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use util::config;

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims_expiring_in(minutes: i64, role: UserRole) -> Claims {
        Claims {
            sub: 7,
            role,
            exp: (Utc::now() + Duration::minutes(minutes)).timestamp() as usize,
        }
    }

    async fn extract(header: Option<String>) -> Result<AuthUser, axum::http::StatusCode> {
        let mut builder = Request::builder();
        if let Some(value) = header {
            builder = builder.header("Authorization", value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        AuthUser::from_request_parts(&mut parts, &())
            .await
            .map_err(|(status, _)| status)
    }

    /// Test Case: A token signed with the configured secret yields its claims
    #[tokio::test]
    async fn test_valid_token() {
        let token = sign(&claims_expiring_in(60, UserRole::Teacher), &config::jwt_secret());

        let AuthUser(claims) = extract(Some(format!("Bearer {token}"))).await.unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, UserRole::Teacher);
        assert!(claims.is_staff());
        assert!(!claims.is_admin());
    }

    /// Test Case: A token signed with another secret is rejected
    #[tokio::test]
    async fn test_invalid_token_wrong_secret() {
        let token = sign(&claims_expiring_in(60, UserRole::Admin), "not-the-server-secret");

        let status = extract(Some(format!("Bearer {token}"))).await.unwrap_err();
        assert_eq!(status, axum::http::StatusCode::UNAUTHORIZED);
    }

    /// Test Case: An expired token is rejected
    #[tokio::test]
    async fn test_expired_token() {
        let token = sign(&claims_expiring_in(-120, UserRole::Student), &config::jwt_secret());

        let status = extract(Some(format!("Bearer {token}"))).await.unwrap_err();
        assert_eq!(status, axum::http::StatusCode::UNAUTHORIZED);
    }

    /// Test Case: Missing or non-bearer Authorization headers are rejected
    #[tokio::test]
    async fn test_missing_or_malformed_header() {
        assert_eq!(
            extract(None).await.unwrap_err(),
            axum::http::StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            extract(Some("Basic dXNlcjpwYXNz".into())).await.unwrap_err(),
            axum::http::StatusCode::UNAUTHORIZED
        );
    }
}
