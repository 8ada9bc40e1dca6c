//! # Commands Module
//!
//! Every operation exposed on the command channel.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (health + exports)
//! ├── category.rs  ◄─── Category CRUD
//! └── product.rs   ◄─── Product CRUD
//! ```
//!
//! Each command takes the shared [`AppState`] plus its decoded arguments and
//! returns `Result<T, ApiError>`; [`crate::dispatch`] turns that into a
//! status and body.

pub mod category;
pub mod product;

use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Database diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub healthy: bool,
    pub migrations_total: usize,
    pub migrations_applied: usize,
}

/// Reports whether the database answers queries and how many migrations ran.
pub async fn health(state: &AppState) -> Result<HealthReport, ApiError> {
    let healthy = state.db().health_check().await;
    let (migrations_total, migrations_applied) = state.db().migration_status().await?;

    debug!(healthy, migrations_applied, "Health check");

    Ok(HealthReport {
        healthy,
        migrations_total,
        migrations_applied,
    })
}
