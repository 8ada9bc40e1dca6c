//! # catalog-core: Business Rules for the Catalog
//!
//! This crate is the **heart** of the catalog. It holds the validation layer
//! that guards every Category and Product mutation, and the service that
//! sequences those checks before touching persistence.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 catalog-api (command boundary)                  │   │
//! │  │    createCategory, updateProduct, ... ──► status + body         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ catalog-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  service  │─►│   rules   │─►│   store   │  │validation │  │   │
//! │  │   │ Category  │  │ Category  │  │  traits   │  │ pure field│  │   │
//! │  │   │ Product   │  │ Product   │  │ (ports)   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └─────┬─────┘  └───────────┘  │   │
//! │  └────────────────────────────────────────┼────────────────────────┘   │
//! │                                           │ implemented by              │
//! │  ┌────────────────────────────────────────▼────────────────────────┐   │
//! │  │   catalog-db (SQLite)            memory (in-process, tests)     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities (Category, Product) and insert payloads
//! - [`dto`] - Request/response shapes exchanged with the API boundary
//! - [`error`] - Error taxonomy and machine-readable codes
//! - [`validation`] - Pure field checks (name, price, stock, description)
//! - [`store`] - Entity store traits
//! - [`memory`] - In-memory entity store
//! - [`rules`] - Category and Product rule engines
//! - [`service`] - Orchestration: rules first, then store, then response
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use catalog_core::dto::CategoryRequest;
//! use catalog_core::CatalogService;
//!
//! let catalog = CatalogService::in_memory();
//! let created = catalog
//!     .categories()
//!     .create(CategoryRequest::named("Electronics"))
//!     .await?;
//! assert_eq!(created.name, "Electronics");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dto;
pub mod error;
pub mod memory;
pub mod rules;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CatalogError, CatalogResult, ErrorCode, StoreError, StoreResult, ValidationError};
pub use service::{CatalogService, CategoryService, ProductService};
pub use store::{CategoryStore, ProductStore};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum length of a category name, counted in characters on the raw
/// (untrimmed) string.
pub const MIN_CATEGORY_NAME_LEN: usize = 2;

/// Maximum length of a product description.
///
/// Mirrors the `length(description) <= 2000` check on the products table.
pub const MAX_DESCRIPTION_LEN: usize = 2000;
