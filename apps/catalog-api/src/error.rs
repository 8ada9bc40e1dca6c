//! # API Error Type
//!
//! Unified error type for catalog commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Catalog API                        │
//! │                                                                         │
//! │  {"command":"createCategory","args":{"name":"x"}}                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Undecodable line? ──────────── BAD_REQUEST ────────┐            │  │
//! │  │         │                                           │            │  │
//! │  │         ▼                                           ▼            │  │
//! │  │  CatalogError (business) ── INVALID_NAME ... ──── ApiError ────► │  │
//! │  │         │                                           ▲            │  │
//! │  │         ▼                                           │            │  │
//! │  │  CatalogError (store) ── logged, generic message ───┘            │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  {"status":400,"body":{"code":"INVALID_NAME","message":"..."}}          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Status Codes
//! | Code | Status |
//! |------|--------|
//! | `INVALID_*`, `BAD_REQUEST` | 400 |
//! | `NOT_FOUND` | 404 |
//! | `NAME_EXISTS`, `HAS_DEPENDENTS`, `STORE_CONFLICT` | 409 |
//! | `INTERNAL` | 500 |

use catalog_core::{CatalogError, ErrorCode};
use catalog_db::DbError;
use serde::Serialize;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found with id: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a bad request error (undecodable command).
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Status code for this error.
    pub fn status(&self) -> u16 {
        match self.code {
            ErrorCode::InvalidName
            | ErrorCode::InvalidPrice
            | ErrorCode::InvalidStock
            | ErrorCode::InvalidDescription
            | ErrorCode::BadRequest => 400,
            ErrorCode::NotFound => 404,
            ErrorCode::NameExists | ErrorCode::HasDependents | ErrorCode::StoreConflict => 409,
            ErrorCode::Internal => 500,
        }
    }
}

/// Converts catalog errors to API errors.
///
/// Business errors keep their message. Store failures are logged with their
/// detail and reported generically.
impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err.code() {
            ErrorCode::StoreConflict => {
                tracing::warn!("Store rejected write: {}", err);
                ApiError::new(
                    ErrorCode::StoreConflict,
                    "The change conflicts with data written concurrently",
                )
            }
            ErrorCode::Internal => {
                tracing::error!("Store failure: {}", err);
                ApiError::internal("Database operation failed")
            }
            code => ApiError::new(code, err.to_string()),
        }
    }
}

/// Converts database errors from diagnostics to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        tracing::error!("Database error: {}", err);
        ApiError::internal("Database operation failed")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================
