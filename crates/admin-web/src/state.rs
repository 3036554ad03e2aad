//! Application state shared across handlers.

use database::Database;

/// Identity recorded as the owner of records created through the admin UI.
///
/// There is no login yet, so this is fixed at startup from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub id: String,
}

impl Owner {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Owner for newly created records.
    pub owner: Owner,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, owner: Owner) -> Self {
        Self { db, owner }
    }
}
