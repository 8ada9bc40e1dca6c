//! # catalog-db: SQLite Entity Store
//!
//! This crate persists categories and products in SQLite and implements the
//! [`CategoryStore`](catalog_core::CategoryStore) and
//! [`ProductStore`](catalog_core::ProductStore) traits the rule engines use.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Data Flow                                │
//! │                                                                         │
//! │  CatalogService (catalog-core)                                         │
//! │       │  Arc<dyn CategoryStore>, Arc<dyn ProductStore>                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   catalog-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Database    │    │   Repositories     │  │ Migrations │  │   │
//! │  │   │   (pool.rs)   │    │                    │  │ (embedded) │  │   │
//! │  │   │               │    │ CategoryRepository │  │            │  │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepository  │  │ 001_...sql │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (./catalog.db by default)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Category and product repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_core::dto::CategoryRequest;
//! use catalog_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::file("./catalog.db")).await?;
//! let catalog = db.catalog();
//!
//! catalog.categories().create(CategoryRequest::named("Books")).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, DbLocation};

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::product::ProductRepository;
