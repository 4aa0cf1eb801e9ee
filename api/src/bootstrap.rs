//! Startup tasks that run once the database is migrated.

use db::models::user::{self, UserRole};
use sea_orm::{DatabaseConnection, DbErr};
use util::config;

/// Creates the configured admin account unless a user with that username
/// already exists. Does nothing when `ADMIN_USERNAME`/`ADMIN_PASSWORD` are unset.
///
/// Returns the id of the created admin.
pub async fn ensure_admin(db: &DatabaseConnection) -> Result<Option<i64>, DbErr> {
    let Some((username, email, password)) = config::admin_credentials() else {
        tracing::debug!("No admin credentials configured; skipping admin bootstrap");
        return Ok(None);
    };

    if user::Model::username_taken(db, &username).await? {
        return Ok(None);
    }
    if user::Model::email_taken(db, &email).await? {
        tracing::warn!(%email, "Admin email already belongs to another account; skipping admin bootstrap");
        return Ok(None);
    }

    let admin = user::Model::create(db, &username, &email, &password, UserRole::Admin).await?;
    tracing::info!(user_id = admin.id, %username, "Bootstrap admin created");
    Ok(Some(admin.id))
}
