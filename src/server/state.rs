//! Server shared state
//!
//! Holds the database pool for the HTTP server.

use crate::error::Result;
use crate::store::{Database, Session};

/// Shared state for the HTTP server
pub struct AppState {
    database: Database,
}

impl AppState {
    /// Create new application state
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Open a database session scoped to one request
    ///
    /// The connection goes back to the pool when the session is dropped at
    /// the end of the handler.
    pub async fn session(&self) -> Result<Session> {
        self.database.session().await
    }

    /// The underlying connection pool
    pub fn database(&self) -> &Database {
        &self.database
    }
}
