use crate::response::{ApiResponse, ApiResult, error_response};
use crate::routes::{
    common::{format_validation_errors, validate_request},
    users::common::UserResponse,
};
use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use db::models::user::{self, UserRole, UserStatus};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use services::error::ServiceError;
use std::collections::HashSet;
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct NewUserEntry {
    #[validate(length(min = 3, max = 64, message = "Username must be 3-64 characters"))]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUsersRequest {
    #[validate(length(min = 1, message = "At least one user is required"))]
    pub users: Vec<NewUserEntry>,
}

#[derive(Debug, Serialize, Default)]
pub struct RowError {
    pub index: usize,
    pub username: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Serialize, Default)]
pub struct CreateUsersResponse {
    pub created: Vec<UserResponse>,
    pub errors: Vec<RowError>,
}

/// POST /api/users
///
/// Create several accounts at once. Requires admin privileges.
///
/// Every entry is checked before anything is written. If any entry fails,
/// nothing is created and `errors` lists each failing entry by its index.
/// `role` defaults to `student` and `status` to `active`.
///
/// ### Request Body
/// ```json
/// {
///   "users": [
///     { "username": "alice", "email": "alice@example.com", "password": "secret123" },
///     { "username": "bob", "email": "bob@example.com", "password": "secret123", "role": "teacher" }
///   ]
/// }
/// ```
///
/// ### Responses
/// - `201 Created`: All users created; `errors` is empty
/// - `400 Bad Request`: Empty list, or at least one entry failed
/// ```json
/// {
///   "success": false,
///   "data": {
///     "created": [],
///     "errors": [
///       { "index": 1, "username": "bob", "email": "bob@example.com", "message": "Username already exists" }
///     ]
///   },
///   "message": "No users were created"
/// }
/// ```
pub async fn create_users(
    State(app_state): State<AppState>,
    Json(req): Json<CreateUsersRequest>,
) -> ApiResult<CreateUsersResponse> {
    let db = app_state.db();

    if let Err(e) = validate_request(&req) {
        return error_response(e);
    }

    let errors = match check_entries(db, &req.users).await {
        Ok(errors) => errors,
        Err(e) => return error_response(e),
    };
    if !errors.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse {
                success: false,
                data: CreateUsersResponse {
                    created: Vec::new(),
                    errors,
                },
                message: "No users were created".into(),
            }),
        );
    }

    match insert_all(db, req.users).await {
        Ok(created) => {
            tracing::info!(count = created.len(), "Users created in bulk");
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    CreateUsersResponse {
                        created,
                        errors: Vec::new(),
                    },
                    "Users created successfully",
                )),
            )
        }
        Err(e) => error_response(e),
    }
}

/// One error per failing entry; the first problem found wins.
async fn check_entries(
    db: &DatabaseConnection,
    entries: &[NewUserEntry],
) -> Result<Vec<RowError>, ServiceError> {
    let mut errors = Vec::new();
    let mut usernames = HashSet::new();
    let mut emails = HashSet::new();

    for (index, entry) in entries.iter().enumerate() {
        let username = entry.username.trim().to_lowercase();
        let email = entry.email.trim().to_lowercase();

        let message = if let Err(e) = entry.validate() {
            Some(format_validation_errors(&e))
        } else if !usernames.insert(username.clone()) {
            Some("Duplicate username in request".to_owned())
        } else if !emails.insert(email.clone()) {
            Some("Duplicate email in request".to_owned())
        } else if user::Model::username_taken(db, &username).await? {
            Some("Username already exists".to_owned())
        } else if user::Model::email_taken(db, &email).await? {
            Some("Email already exists".to_owned())
        } else {
            None
        };

        if let Some(message) = message {
            errors.push(RowError {
                index,
                username: entry.username.clone(),
                email: entry.email.clone(),
                message,
            });
        }
    }

    Ok(errors)
}

async fn insert_all(
    db: &DatabaseConnection,
    entries: Vec<NewUserEntry>,
) -> Result<Vec<UserResponse>, ServiceError> {
    let txn = db.begin().await?;
    let mut created = Vec::with_capacity(entries.len());

    for entry in entries {
        let role = entry.role.unwrap_or(UserRole::Student);
        let mut model =
            user::Model::create(&txn, &entry.username, &entry.email, &entry.password, role).await?;

        if let Some(status) = entry.status.filter(|s| *s != model.status) {
            let mut active: user::ActiveModel = model.into();
            active.status = Set(status);
            active.updated_at = Set(Utc::now());
            model = active.update(&txn).await?;
        }
        created.push(UserResponse::from(model));
    }

    txn.commit().await?;
    Ok(created)
}
