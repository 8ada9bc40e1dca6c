//! # Error Types
//!
//! The catalog's error taxonomy.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  catalog-core errors (this file)                                       │
//! │  ├── ValidationError  - Pure field checks (name, price, stock, ...)    │
//! │  ├── StoreError       - Failures reported by an entity store           │
//! │  └── CatalogError     - Everything a service call can fail with        │
//! │                                                                         │
//! │  catalog-db errors (separate crate)                                    │
//! │  └── DbError          - sqlx failures, converted into StoreError       │
//! │                                                                         │
//! │  catalog-api errors (in app)                                           │
//! │  └── ApiError         - { code, message } + status code                │
//! │                                                                         │
//! │  Flow: ValidationError ─┐                                              │
//! │        DbError → StoreError ─┴─► CatalogError → ApiError → caller      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Business vs. Store Failures
//! Every rule violation carries a stable [`ErrorCode`] and is recovered at
//! the API boundary. Store failures (including a unique-index race lost after
//! the optimistic name check passed) are reported as `STORE_CONFLICT` or
//! `INTERNAL` and are never part of the business taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use ts_rs::TS;

use crate::types::{CategoryId, EntityKind};

// =============================================================================
// Error Code
// =============================================================================

/// Machine-readable error codes.
///
/// ## Serialization
/// Codes serialize in SCREAMING_SNAKE_CASE and never change once published:
/// ```json
/// { "code": "NAME_EXISTS", "message": "Category with name 'Books' already exists" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// Name is missing, blank, or too short.
    InvalidName,
    /// Another live entity already has this name (case-insensitive).
    NameExists,
    /// No entity with the requested id.
    NotFound,
    /// Category still referenced by products.
    HasDependents,
    /// Price missing or not strictly positive.
    InvalidPrice,
    /// Stock missing or negative.
    InvalidStock,
    /// Description longer than allowed.
    InvalidDescription,
    /// Request could not be decoded.
    BadRequest,
    /// Store rejected a write on a unique or foreign key constraint.
    StoreConflict,
    /// Any other store failure.
    Internal,
}

impl ErrorCode {
    /// Returns the wire form of the code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidName => "INVALID_NAME",
            ErrorCode::NameExists => "NAME_EXISTS",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::HasDependents => "HAS_DEPENDENTS",
            ErrorCode::InvalidPrice => "INVALID_PRICE",
            ErrorCode::InvalidStock => "INVALID_STOCK",
            ErrorCode::InvalidDescription => "INVALID_DESCRIPTION",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::StoreConflict => "STORE_CONFLICT",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    /// Whether the code belongs to the business-rule taxonomy.
    pub const fn is_business(&self) -> bool {
        !matches!(self, ErrorCode::StoreConflict | ErrorCode::Internal)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field validation failures.
///
/// Produced by the pure functions in [`crate::validation`]; they never need
/// the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name absent, empty, or whitespace-only.
    #[error("{entity} name cannot be empty")]
    EmptyName { entity: EntityKind },

    /// Name shorter than the minimum length.
    #[error("{entity} name must be at least {min} characters long")]
    NameTooShort { entity: EntityKind, min: usize },

    #[error("Product price is required")]
    PriceRequired,

    #[error("Product price must be greater than zero")]
    NonPositivePrice,

    #[error("Product stock is required")]
    StockRequired,

    #[error("Product stock cannot be negative")]
    NegativeStock,

    #[error("Product description must be at most {max} characters long")]
    DescriptionTooLong { max: usize },
}

impl ValidationError {
    /// Maps the failure onto its error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::EmptyName { .. } | ValidationError::NameTooShort { .. } => {
                ErrorCode::InvalidName
            }
            ValidationError::PriceRequired | ValidationError::NonPositivePrice => {
                ErrorCode::InvalidPrice
            }
            ValidationError::StockRequired | ValidationError::NegativeStock => {
                ErrorCode::InvalidStock
            }
            ValidationError::DescriptionTooLong { .. } => ErrorCode::InvalidDescription,
        }
    }
}

// =============================================================================
// Store Error
// =============================================================================

/// Failures reported by an entity store implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A unique index rejected the write (e.g. a concurrent create with the
    /// same name won the race).
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A foreign key rejected the write.
    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    /// Anything else (connection, query, decode failures).
    #[error("Store backend failure: {0}")]
    Backend(String),
}

/// Result type for entity store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Catalog Error
// =============================================================================

/// Everything a catalog service call can fail with.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A field check failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Name already taken by another live entity of the same kind.
    #[error("{entity} with name '{name}' already exists")]
    NameExists { entity: EntityKind, name: String },

    /// Entity with the given id does not exist.
    #[error("{entity} not found with id: {id}")]
    NotFound { entity: EntityKind, id: i64 },

    /// Category still has live products pointing at it.
    ///
    /// ## User Workflow
    /// ```text
    /// delete category 1
    ///      │
    ///      ▼
    /// count_by_category_id(1) = 3
    ///      │
    ///      ▼
    /// HasDependents { category_id: 1, count: 3 }
    ///      │
    ///      ▼
    /// "Category cannot be deleted because it has 3 associated product(s)"
    /// ```
    #[error("Category cannot be deleted because it has {count} associated product(s)")]
    HasDependents { category_id: CategoryId, count: i64 },

    /// The entity store failed.
    #[error("Store failure: {0}")]
    Store(#[from] StoreError),
}

impl CatalogError {
    /// Creates a NotFound error.
    pub fn not_found(entity: EntityKind, id: i64) -> Self {
        CatalogError::NotFound { entity, id }
    }

    /// Creates a NameExists error.
    pub fn name_exists(entity: EntityKind, name: impl Into<String>) -> Self {
        CatalogError::NameExists {
            entity,
            name: name.into(),
        }
    }

    /// Returns the machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::Validation(e) => e.code(),
            CatalogError::NameExists { .. } => ErrorCode::NameExists,
            CatalogError::NotFound { .. } => ErrorCode::NotFound,
            CatalogError::HasDependents { .. } => ErrorCode::HasDependents,
            CatalogError::Store(StoreError::UniqueViolation(_))
            | CatalogError::Store(StoreError::ForeignKeyViolation(_)) => ErrorCode::StoreConflict,
            CatalogError::Store(StoreError::Backend(_)) => ErrorCode::Internal,
        }
    }

    /// Whether this is a business-rule violation (as opposed to a store failure).
    pub fn is_business(&self) -> bool {
        self.code().is_business()
    }
}

/// Convenience type alias for Results with CatalogError.
pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// Unit Tests
// =============================================================================
