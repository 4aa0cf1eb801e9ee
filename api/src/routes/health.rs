use crate::response::ApiResponse;
use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde::Serialize;
use util::{config, state::AppState};

/// Builds the `/health` route group.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub service: String,
    pub env: String,
    pub database: &'static str,
}

/// GET /health
///
/// Reports whether the service is up and its database answers a ping.
///
/// ### Responses
/// - `200 OK` with `database: "up"`
/// - `503 Service Unavailable` with `database: "down"`
async fn health_check(State(app_state): State<AppState>) -> impl IntoResponse {
    let db_up = match app_state.db().ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database ping failed");
            false
        }
    };

    let report = HealthReport {
        service: config::project_name(),
        env: config::env(),
        database: if db_up { "up" } else { "down" },
    };

    if db_up {
        (
            StatusCode::OK,
            Json(ApiResponse::success(report, "Health check passed")),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse {
                success: false,
                data: report,
                message: "Database unavailable".into(),
            }),
        )
    }
}
