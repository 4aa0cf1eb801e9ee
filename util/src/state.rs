//! Shared state handed to every route handler through `State<AppState>`.

use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
}

impl AppState {
    /// Creates a new `AppState` with the given database connection.
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Borrowed database handle.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
