//! # Entity Store Traits
//!
//! What the rule engines and services need from persistence, without
//! implementing it.
//!
//! ## Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   CategoryStore / ProductStore  (this module)                          │
//! │          ▲                         ▲                                    │
//! │          │                         │                                    │
//! │   memory::InMemory*Store     catalog_db::{Category,Product}Repository  │
//! │   (tests, demos)             (SQLite via sqlx)                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contract
//! - Name lookups are case-insensitive.
//! - Soft-deleted products are invisible to every product query.
//! - `insert` assigns the id and `created_at`; `update` assigns `updated_at`
//!   and never changes id or `created_at`.
//! - Stores back the name checks with their own uniqueness constraint and
//!   report a lost race as [`StoreError::UniqueViolation`](crate::StoreError).
//! - `find_all` returns rows in ascending id order.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::{Category, CategoryId, NewCategory, NewProduct, Product, ProductId};

/// Persistence operations for categories.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn find_by_id(&self, id: CategoryId) -> StoreResult<Option<Category>>;

    async fn find_all(&self) -> StoreResult<Vec<Category>>;

    /// Whether any category has this name, ignoring case.
    async fn exists_by_name(&self, name: &str) -> StoreResult<bool>;

    /// Whether any category other than `id` has this name, ignoring case.
    async fn exists_by_name_excluding(&self, name: &str, id: CategoryId) -> StoreResult<bool>;

    async fn insert(&self, category: NewCategory) -> StoreResult<Category>;

    /// Persists the mutable fields of `category` and returns the stored row.
    async fn update(&self, category: &Category) -> StoreResult<Category>;

    async fn delete_by_id(&self, id: CategoryId) -> StoreResult<()>;
}

/// Persistence operations for products.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn find_by_id(&self, id: ProductId) -> StoreResult<Option<Product>>;

    async fn find_all(&self) -> StoreResult<Vec<Product>>;

    /// Whether any live product has this name, ignoring case.
    async fn exists_by_name(&self, name: &str) -> StoreResult<bool>;

    /// Whether any live product other than `id` has this name, ignoring case.
    async fn exists_by_name_excluding(&self, name: &str, id: ProductId) -> StoreResult<bool>;

    /// Number of live products referencing the category.
    async fn count_by_category_id(&self, category_id: CategoryId) -> StoreResult<i64>;

    async fn insert(&self, product: NewProduct) -> StoreResult<Product>;

    /// Persists the mutable fields of `product` and returns the stored row.
    async fn update(&self, product: &Product) -> StoreResult<Product>;

    /// Soft-deletes the product.
    async fn delete_by_id(&self, id: ProductId) -> StoreResult<()>;
}
