//! # Admin Routes Module
//!
//! `/api/admin`: platform-wide views. Every route sits behind `allow_admin`.

use axum::{Router, routing::get};
use get::platform_metrics;
use util::state::AppState;

pub mod get;

/// Builds the `/admin` route group.
///
/// - `GET /admin/metrics` → `platform_metrics`
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/metrics", get(platform_metrics))
}
