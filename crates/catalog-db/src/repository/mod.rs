//! # Repository Module
//!
//! SQLite implementations of the catalog entity stores.
//!
//! ## Two Faces
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CategoryRepository / ProductRepository                                 │
//! │  ├── inherent methods  → DbResult<T>     (seed, diagnostics, tests)     │
//! │  └── CategoryStore / ProductStore impls → StoreResult<T>                │
//! │          │                                                              │
//! │          ▼                                                              │
//! │      rule engines + CatalogService (catalog-core)                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Name comparisons go through the `name_key` column, written from
//! [`catalog_core::name_key`] on every insert and rename.
//!
//! ## Available Repositories
//!
//! - [`CategoryRepository`](category::CategoryRepository) - Category CRUD
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD with soft delete

pub mod category;
pub mod product;
