//! # Users Routes Module
//!
//! Defines the `/api/users` endpoint group. Account management sits behind
//! the `allow_admin` guard; `/me/preferences` is open to any signed-in user.

use crate::auth::guards::{allow_admin, allow_authenticated};
use axum::{
    Router,
    middleware::from_fn,
    routing::get,
};
use delete::delete_user;
use get::{get_preferences, get_user, list_users};
use patch::update_preferences;
use post::create_users;
use put::update_user;
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod patch;
pub mod post;
pub mod put;

/// Builds the `/users` route group.
///
/// - `GET /users` → `list_users` (admin)
/// - `POST /users` → `create_users` (admin)
/// - `GET /users/{user_id}` → `get_user` (admin)
/// - `PUT /users/{user_id}` → `update_user` (admin)
/// - `DELETE /users/{user_id}` → `delete_user` (admin)
/// - `GET /users/me/preferences` → `get_preferences`
/// - `PATCH /users/me/preferences` → `update_preferences`
pub fn users_routes() -> Router<AppState> {
    let admin_only = Router::new()
        .route("/", get(list_users).post(create_users))
        .route(
            "/{user_id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route_layer(from_fn(allow_admin));

    Router::new()
        .route(
            "/me/preferences",
            get(get_preferences).patch(update_preferences),
        )
        .route_layer(from_fn(allow_authenticated))
        .merge(admin_only)
}
