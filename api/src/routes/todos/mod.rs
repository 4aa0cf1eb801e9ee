//! # Todos Routes Module
//!
//! `/api/todos`: the caller's outstanding work, derived from their role.

use axum::{Router, routing::get};
use get::list_todos;
use util::state::AppState;

pub mod get;

/// Builds the `/todos` route group.
///
/// - `GET /todos` → `list_todos`
pub fn todos_routes() -> Router<AppState> {
    Router::new().route("/", get(list_todos))
}
