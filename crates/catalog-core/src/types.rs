//! # Domain Types
//!
//! The two catalog entities and the payloads used to insert them.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐          ┌─────────────────────────────┐      │
//! │  │      Category       │  0..1  * │          Product            │      │
//! │  │  ─────────────────  │◄─────────│  ─────────────────────────  │      │
//! │  │  id (store)         │          │  id (store)                 │      │
//! │  │  name (unique, ci)  │          │  name (unique among live)   │      │
//! │  │  created_at         │          │  unit_price (> 0, Decimal)  │      │
//! │  │  updated_at         │          │  units_in_stock (>= 0)      │      │
//! │  └─────────────────────┘          │  description (<= 2000)      │      │
//! │                                   │  category_id (nullable)     │      │
//! │                                   │  created/updated/deleted_at │      │
//! │                                   └─────────────────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The relationship is enforced from the Product side only: a Category does
//! not hold its products.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned category identity.
pub type CategoryId = i64;

/// Store-assigned product identity.
pub type ProductId = i64;

// =============================================================================
// Entity Kind
// =============================================================================

/// Which entity an error or log line is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Category,
    Product,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Category => f.write_str("Category"),
            EntityKind::Product => f.write_str("Product"),
        }
    }
}

/// Case-folded form of an entity name.
///
/// Two names collide when their keys are equal. Every store compares names
/// through this key, so "Çanta" and "çanta" collide just like "Books" and
/// "BOOKS" do.
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    /// Store-assigned identifier. Immutable.
    pub id: CategoryId,

    /// Display name, stored exactly as supplied.
    pub name: String,

    /// When the category was inserted. Immutable.
    pub created_at: DateTime<Utc>,

    /// When the category was last updated (`None` until the first update).
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for inserting a category; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier. Immutable.
    pub id: ProductId,

    /// Display name, stored exactly as supplied.
    pub name: String,

    /// Unit price. Always strictly positive once persisted.
    pub unit_price: Decimal,

    /// Units in stock. Never negative once persisted.
    pub units_in_stock: i32,

    /// Optional free-text description.
    pub description: Option<String>,

    /// Category this product belongs to, if any.
    pub category_id: Option<CategoryId>,

    /// When the product was inserted. Immutable.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: Option<DateTime<Utc>>,

    /// Soft-delete marker. Stores never hand out products where this is set.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Checks if the product has not been soft-deleted.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Payload for inserting a product; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub unit_price: Decimal,
    pub units_in_stock: i32,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
}

// =============================================================================
// Unit Tests
// =============================================================================
