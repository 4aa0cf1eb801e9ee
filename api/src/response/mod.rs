use axum::{Json, http::StatusCode};
use serde::Serialize;
use services::error::ServiceError;

/// Standardized API response wrapper for all outgoing JSON responses.
///
/// This struct enforces a consistent response structure across all endpoints:
/// ```json
/// {
///   "success": true,
///   "data": { ... },
///   "message": "Some message"
/// }
/// ```
///
/// - `T` is the type of the `data` payload.
/// - `success` is a boolean indicating operation status.
/// - `message` provides a human-readable context string.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Constructs a success response with the given data and message.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Constructs an error response with a message and default `data`.
    ///
    /// # Requires
    /// - `T` must implement `Default`, since error responses do not include useful data.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}

/// Status code and JSON body pair returned by every handler.
pub type ApiResult<T> = (StatusCode, Json<ApiResponse<T>>);

/// Maps a service failure onto its HTTP status and an error envelope.
///
/// Database failures are logged and reported without their details.
pub fn error_response<T>(err: ServiceError) -> ApiResult<T>
where
    T: Serialize + Default,
{
    let status = match &err {
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
        ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ServiceError::Db(e) => {
            tracing::error!(error = %e, "Database error");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let message = match err {
        ServiceError::Db(_) => "Database error".to_string(),
        other => other.to_string(),
    };

    (status, Json(ApiResponse::error(message)))
}

/// Collapses a handler result into a response, using `status` on success.
pub fn respond<T>(
    result: Result<T, ServiceError>,
    status: StatusCode,
    message: &str,
) -> ApiResult<T>
where
    T: Serialize + Default,
{
    match result {
        Ok(data) => (status, Json(ApiResponse::success(data, message))),
        Err(err) => error_response(err),
    }
}
