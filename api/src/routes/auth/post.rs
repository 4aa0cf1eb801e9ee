use crate::auth::generate_jwt;
use crate::response::{ApiResponse, ApiResult, error_response, respond};
use crate::routes::auth::common::{AuthResponse, UserProfile};
use crate::routes::common::validate_request;
use axum::{Json, extract::State, http::StatusCode};
use db::models::user::{self, UserRole};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use services::error::ServiceError;
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 64, message = "Username must be 3-64 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

fn issue_token(user: user::Model) -> Result<AuthResponse, ServiceError> {
    let (token, expires_at) = generate_jwt(user.id, user.role).map_err(|e| {
        tracing::error!(error = %e, user_id = user.id, "Token encoding failed");
        ServiceError::Internal("Could not issue token".into())
    })?;

    Ok(AuthResponse {
        token,
        token_type: "Bearer".into(),
        expires_at,
        user: UserProfile::from(user),
    })
}

/// POST /auth/register
///
/// Register a new student account and issue a JWT.
///
/// ### Request Body
/// ```json
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "strongpassword"
/// }
/// ```
///
/// ### Responses
///
/// - `201 Created`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "token": "jwt_token_here",
///     "token_type": "Bearer",
///     "expires_at": "2026-05-23T11:00:00Z",
///     "user": { "id": 1, "username": "alice", "email": "alice@example.com", "role": "student", "status": "active", "created_at": "..." }
///   },
///   "message": "User registered successfully"
/// }
/// ```
///
/// - `400 Bad Request` (validation failure)
/// - `409 Conflict` (username or email already taken)
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<AuthResponse> {
    respond(
        register_user(app_state.db(), req).await,
        StatusCode::CREATED,
        "User registered successfully",
    )
}

async fn register_user(
    db: &DatabaseConnection,
    req: RegisterRequest,
) -> Result<AuthResponse, ServiceError> {
    validate_request(&req)?;

    if user::Model::username_taken(db, &req.username).await? {
        return Err(ServiceError::Conflict(
            "A user with this username already exists".into(),
        ));
    }
    if user::Model::email_taken(db, &req.email).await? {
        return Err(ServiceError::Conflict(
            "A user with this email already exists".into(),
        ));
    }

    let user =
        user::Model::create(db, &req.username, &req.email, &req.password, UserRole::Student)
            .await?;
    tracing::info!(user_id = user.id, "User registered");

    issue_token(user)
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username or email.
    #[validate(length(min = 1, message = "Username or email is required"))]
    pub identifier: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// POST /auth/login
///
/// Authenticate with a username or email and issue a JWT.
///
/// ### Request Body
/// ```json
/// {
///   "identifier": "alice@example.com",
///   "password": "strongpassword"
/// }
/// ```
///
/// ### Responses
///
/// - `200 OK` with the same payload as `/auth/register`
/// - `401 Unauthorized` (unknown user or wrong password)
/// - `403 Forbidden` (account disabled)
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<AuthResponse> {
    if let Err(e) = validate_request(&req) {
        return error_response(e);
    }

    let user = match user::Model::get_by_identifier(app_state.db(), &req.identifier).await {
        Ok(Some(user)) if user.verify_password(&req.password) => user,
        Ok(_) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Invalid credentials")),
            );
        }
        Err(e) => return error_response(e.into()),
    };

    if !user.is_active() {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Account is disabled")),
        );
    }

    respond(issue_token(user), StatusCode::OK, "Login successful")
}
