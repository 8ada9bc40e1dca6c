//! # Database Pool Management
//!
//! Opens the catalog database and hands out repositories over one pool.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Database                                   │
//! │                                                                         │
//! │  DbConfig::file(path)          DbConfig::in_memory()                    │
//! │       │  WAL, up to N conns         │  one pinned connection            │
//! │       └──────────────┬──────────────┘                                   │
//! │                      ▼                                                  │
//! │  Database::new(config).await ← pool + foreign keys + migrations         │
//! │                      │                                                  │
//! │        ┌─────────────┼─────────────────────┐                            │
//! │        ▼             ▼                     ▼                            │
//! │  categories()    products()    catalog() ──► CatalogService             │
//! │  (raw repos, no rules)          (rule-checked, used by the API)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Foreign keys are switched on for every connection: `products.category_id`
//! relies on `ON DELETE SET NULL`.

use catalog_core::CatalogService;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::category::CategoryRepository;
use crate::repository::product::ProductRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Where the catalog lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    /// A database file, created on first open.
    File(PathBuf),
    /// A private in-memory database that lives as long as its pool.
    InMemory,
}

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::file("/var/lib/catalog/catalog.db")
///     .max_connections(5)
///     .run_migrations(true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub location: DbLocation,

    /// Pool size for file databases. In-memory databases always use one
    /// connection, since each connection would see its own empty database.
    pub max_connections: u32,

    /// Whether `Database::new` applies pending migrations.
    pub run_migrations: bool,
}

impl DbConfig {
    /// Configuration for a database file.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            location: DbLocation::File(path.into()),
            max_connections: 5,
            run_migrations: true,
        }
    }

    /// Configuration for an isolated in-memory catalog (tests, demos).
    pub fn in_memory() -> Self {
        DbConfig {
            location: DbLocation::InMemory,
            max_connections: 1,
            run_migrations: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = match &self.location {
            DbLocation::File(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal),
            DbLocation::InMemory => SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?,
        };

        Ok(options.foreign_keys(true))
    }

    fn pool_options(&self) -> SqlitePoolOptions {
        match self.location {
            DbLocation::File(_) => SqlitePoolOptions::new().max_connections(self.max_connections),
            // Dropping the only connection would drop the database with it.
            DbLocation::InMemory => SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None),
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Handle on an open catalog database.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::file("./catalog.db")).await?;
///
/// // Rule-checked operations
/// let catalog = db.catalog();
/// catalog.products().get_all().await?;
///
/// // Raw repository access (no rules)
/// let total = db.products().count().await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the database described by `config`, applying migrations unless
    /// they were switched off.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(location = ?config.location, "Opening catalog database");

        let pool = config
            .pool_options()
            .connect_with(config.connect_options()?)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!(max_connections = config.max_connections, "Database pool created");

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies pending migrations.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await?;
        info!("Catalog schema up to date");
        Ok(())
    }

    /// Returns `(total_migrations, applied_migrations)`.
    pub async fn migration_status(&self) -> DbResult<(usize, usize)> {
        migrations::migration_status(&self.pool).await
    }

    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.pool.clone())
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// The rule-checked catalog service backed by this database.
    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(Arc::new(self.categories()), Arc::new(self.products()))
    }

    /// Closes the pool. Later repository calls fail.
    pub async fn close(&self) {
        info!("Closing catalog database");
        self.pool.close().await;
    }

    /// Whether the database still answers queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
