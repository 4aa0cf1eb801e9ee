//! HTTP route entry point for `/api/...`.
//!
//! Routes are organized by domain, each protected via the appropriate access
//! control middleware.
//!
//! Route groups include:
//! - `/health` → Health check endpoint (public)
//! - `/auth` → Registration, login and profile
//! - `/users` → User management (admin-only) and the caller's preferences
//! - `/courses` → Courses, enrollment, course assignments and analytics
//! - `/students` → Per-student course and submission views
//! - `/assignments` → Assignment lifecycle and submission intake
//! - `/submissions` → Resubmission, grading and appeals
//! - `/approvals` → Approval workflow (admin-only)
//! - `/notifications` → Inbox
//! - `/todos` → The caller's outstanding work
//! - `/admin` → Platform metrics (admin-only)

use crate::auth::guards::{allow_admin, allow_authenticated};
use crate::routes::{
    admin::admin_routes, approvals::approvals_routes, assignments::assignments_routes,
    auth::auth_routes, courses::courses_routes, health::health_routes,
    notifications::notifications_routes, students::students_routes,
    submissions::submissions_routes, todos::todos_routes, users::users_routes,
};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod admin;
pub mod approvals;
pub mod assignments;
pub mod auth;
pub mod common;
pub mod courses;
pub mod health;
pub mod notifications;
pub mod students;
pub mod submissions;
pub mod todos;
pub mod users;

/// Builds the complete application router for all HTTP endpoints.
///
/// The returned router already carries `AppState`; `main` nests it under `/api`.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/users", users_routes())
        .nest("/courses", courses_routes(app_state.clone()))
        .nest(
            "/students",
            students_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/assignments",
            assignments_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/submissions",
            submissions_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest("/approvals", approvals_routes().route_layer(from_fn(allow_admin)))
        .nest(
            "/notifications",
            notifications_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest("/todos", todos_routes().route_layer(from_fn(allow_authenticated)))
        .nest("/admin", admin_routes().route_layer(from_fn(allow_admin)))
        .with_state(app_state)
}
