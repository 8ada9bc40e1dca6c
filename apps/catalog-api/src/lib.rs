//! # Catalog API
//!
//! Command boundary over the catalog: one JSON command per line in, one
//! `{status, body}` reply per line out.
//!
//! ## Module Organization
//! ```text
//! catalog_api/
//! ├── lib.rs       ◄─── You are here (tracing setup)
//! ├── config.rs    ◄─── Environment configuration
//! ├── state.rs     ◄─── Database + CatalogService
//! ├── commands/    ◄─── One async fn per operation
//! ├── dispatch.rs  ◄─── JSON command decoding, status codes
//! └── error.rs     ◄─── ApiError {code, message}
//! ```
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  stdin line ──► dispatch ──► commands::* ──► CatalogService             │
//! │                    │                              │                     │
//! │                    │                   rules ──► SQLite repositories    │
//! │                    ▼                                                    │
//! │  stdout line ◄── Reply {status, body}                                   │
//! │                                                                         │
//! │  Logs go to stderr so stdout only ever carries replies.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `CATALOG_DB_PATH` - SQLite database file (default: ./catalog.db)
//! - `CATALOG_DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `CATALOG_RUN_MIGRATIONS` - Apply migrations on startup (default: true)
//! - `RUST_LOG` - Log filter (default: info,catalog=debug,sqlx=warn)

pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod state;

// Re-exports
pub use config::{ApiConfig, ConfigError};
pub use dispatch::{dispatch, Command, Reply};
pub use error::ApiError;
pub use state::AppState;

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=catalog=trace` - Show trace for catalog crates only
/// - Default: INFO, DEBUG for catalog crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,catalog=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
