use crate::response::{ApiResult, respond};
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use services::course_analytics_service::{CourseAnalyticsService, CourseOverview};
use util::state::AppState;

/// GET /api/courses/{course_id}/analytics/overview
///
/// Aggregated course performance computed from the current roster,
/// assignments and each student's latest submission.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "completionRate": 0.67,
///     "averageScore": 74.5,
///     "medianScore": 76.0,
///     "enrolledStudents": 3,
///     "totalAssignments": 2,
///     "gradedSubmissions": 4,
///     "pendingSubmissions": 1,
///     "overdueStudents": ["12"],
///     "difficultAssignments": ["Lab 2"],
///     "atRiskStudents": ["12"],
///     "insights": ["1 student(s) are academically at risk."]
///   },
///   "message": "Course analytics retrieved successfully"
/// }
/// ```
///
/// - `401 Unauthorized`: Missing or invalid JWT
/// - `403 Forbidden`: Not the course teacher or an admin
/// - `404 Not Found`: Course does not exist
pub async fn course_overview(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> ApiResult<CourseOverview> {
    respond(
        CourseAnalyticsService::course_overview(app_state.db(), course_id).await,
        StatusCode::OK,
        "Course analytics retrieved successfully",
    )
}
