//! # Application State
//!
//! Wraps the `Database` and the catalog service built over it.
//!
//! The `SqlitePool` inside `Database` is thread-safe, so commands can share
//! one `AppState` without extra locking.

use catalog_core::CatalogService;
use catalog_db::Database;

/// State shared by every command.
#[derive(Clone)]
pub struct AppState {
    db: Database,
    catalog: CatalogService,
}

impl AppState {
    /// Creates the state, wiring the catalog service to the database.
    pub fn new(db: Database) -> Self {
        let catalog = db.catalog();
        AppState { db, catalog }
    }

    /// Rule-checked catalog operations.
    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    /// Raw database handle (diagnostics, shutdown).
    pub fn db(&self) -> &Database {
        &self.db
    }
}
