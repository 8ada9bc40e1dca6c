//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Soft Delete
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  remove(7)                                                              │
//! │     UPDATE products SET deleted_at = now WHERE id = 7                   │
//! │                                                                         │
//! │  Every query below adds `deleted_at IS NULL`, so product 7:             │
//! │  • is not returned by get_by_id / list                                  │
//! │  • no longer counts against its category                                │
//! │  • releases its name (the unique index is partial on live rows)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Prices
//! `unit_price` is stored as the decimal's string form and parsed back with
//! `rust_decimal`, so `999.99` round-trips exactly.

use async_trait::async_trait;
use catalog_core::{
    name_key, CategoryId, NewProduct, Product, ProductId, ProductStore, StoreResult,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::debug;

use crate::error::{DbError, DbResult};

const PRODUCT_COLUMNS: &str = "id, name, unit_price, units_in_stock, description, category_id, \
                               created_at, updated_at, deleted_at";

/// Raw products row; `unit_price` is still text.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    unit_price: String,
    units_in_stock: i32,
    description: Option<String>,
    category_id: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> DbResult<Self> {
        let unit_price = Decimal::from_str(&row.unit_price).map_err(|e| DbError::Decode {
            column: "products.unit_price".to_string(),
            message: format!("'{}': {e}", row.unit_price),
        })?;

        Ok(Product {
            id: row.id,
            name: row.name,
            unit_price,
            units_in_stock: row.units_in_stock,
            description: row.description,
            category_id: row.category_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a live product by ID.
    pub async fn get_by_id(&self, id: ProductId) -> DbResult<Option<Product>> {
        debug!(id, "Fetching product");

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Lists live products in ascending id order.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE deleted_at IS NULL ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Whether a live product other than `except` uses `name`, ignoring case.
    pub async fn name_taken(&self, name: &str, except: Option<ProductId>) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM products
            WHERE name_key = ?1
              AND deleted_at IS NULL
              AND (?2 IS NULL OR id <> ?2)
            "#,
        )
        .bind(name_key(name))
        .bind(except)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    /// Counts live products referencing a category.
    pub async fn count_for_category(&self, category_id: CategoryId) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM products WHERE category_id = ?1 AND deleted_at IS NULL",
        )
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - With the assigned id and `created_at`
    /// * `Err(DbError::UniqueViolation)` - A live product has the name
    /// * `Err(DbError::ForeignKeyViolation)` - Category no longer exists
    pub async fn create(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(name = %product.name, category_id = ?product.category_id, "Inserting product");

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products (
                name, name_key, unit_price, units_in_stock, description, category_id, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&product.name)
        .bind(name_key(&product.name))
        .bind(product.unit_price.to_string())
        .bind(product.units_in_stock)
        .bind(&product.description)
        .bind(product.category_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Product::try_from(row)
    }

    /// Overwrites the mutable fields of a live product and stamps `updated_at`.
    pub async fn save(&self, product: &Product) -> DbResult<Product> {
        debug!(id = product.id, "Updating product");

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products SET
                name = ?2,
                name_key = ?3,
                unit_price = ?4,
                units_in_stock = ?5,
                description = ?6,
                category_id = ?7,
                updated_at = ?8
            WHERE id = ?1 AND deleted_at IS NULL
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(product.id)
        .bind(&product.name)
        .bind(name_key(&product.name))
        .bind(product.unit_price.to_string())
        .bind(product.units_in_stock)
        .bind(&product.description)
        .bind(product.category_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Product", product.id))?;

        Product::try_from(row)
    }

    /// Soft-deletes a live product.
    pub async fn remove(&self, id: ProductId) -> DbResult<()> {
        debug!(id, "Soft-deleting product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products
            SET deleted_at = ?2, updated_at = ?2
            WHERE id = ?1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts live products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE deleted_at IS NULL")
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn find_by_id(&self, id: ProductId) -> StoreResult<Option<Product>> {
        Ok(self.get_by_id(id).await?)
    }

    async fn find_all(&self) -> StoreResult<Vec<Product>> {
        Ok(self.list().await?)
    }

    async fn exists_by_name(&self, name: &str) -> StoreResult<bool> {
        Ok(self.name_taken(name, None).await?)
    }

    async fn exists_by_name_excluding(&self, name: &str, id: ProductId) -> StoreResult<bool> {
        Ok(self.name_taken(name, Some(id)).await?)
    }

    async fn count_by_category_id(&self, category_id: CategoryId) -> StoreResult<i64> {
        Ok(self.count_for_category(category_id).await?)
    }

    async fn insert(&self, product: NewProduct) -> StoreResult<Product> {
        Ok(self.create(&product).await?)
    }

    async fn update(&self, product: &Product) -> StoreResult<Product> {
        Ok(self.save(product).await?)
    }

    async fn delete_by_id(&self, id: ProductId) -> StoreResult<()> {
        Ok(self.remove(id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
