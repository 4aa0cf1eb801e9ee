use crate::response::{ApiResult, respond};
use crate::routes::courses::scores::common::ScoreResponse;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use db::models::score;
use services::error::ServiceError;
use util::state::AppState;

/// GET /api/courses/{course_id}/scores
///
/// Every released score in the course, ordered by student then component.
/// Course teacher or admin only.
///
/// ### Responses
/// - `200 OK`: List of scores
/// - `403 Forbidden`: Not the course teacher or an admin
/// - `404 Not Found`: Course does not exist
pub async fn list_course_scores(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> ApiResult<Vec<ScoreResponse>> {
    let result = async {
        let scores = score::Model::find_by_course(app_state.db(), course_id).await?;
        Ok::<_, ServiceError>(scores.into_iter().map(ScoreResponse::from).collect())
    }
    .await;

    respond(result, StatusCode::OK, "Course scores retrieved successfully")
}
