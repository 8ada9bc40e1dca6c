//! # Category Repository
//!
//! Database operations for categories. Categories are hard-deleted; products
//! still pointing at a deleted category have their reference cleared by the
//! `ON DELETE SET NULL` foreign key.

use async_trait::async_trait;
use catalog_core::{name_key, Category, CategoryId, CategoryStore, NewCategory, StoreResult};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

const CATEGORY_COLUMNS: &str = "id, name, created_at, updated_at";

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Gets a category by ID.
    pub async fn get_by_id(&self, id: CategoryId) -> DbResult<Option<Category>> {
        debug!(id, "Fetching category");

        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Lists all categories in ascending id order.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Whether a category other than `except` uses `name`, ignoring case.
    pub async fn name_taken(&self, name: &str, except: Option<CategoryId>) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM categories
            WHERE name_key = ?1
              AND (?2 IS NULL OR id <> ?2)
            "#,
        )
        .bind(name_key(name))
        .bind(except)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    /// Inserts a new category.
    ///
    /// ## Returns
    /// * `Ok(Category)` - With the assigned id and `created_at`
    /// * `Err(DbError::UniqueViolation)` - Name already taken (any case)
    pub async fn create(&self, category: &NewCategory) -> DbResult<Category> {
        debug!(name = %category.name, "Inserting category");

        let created = sqlx::query_as::<_, Category>(&format!(
            "INSERT INTO categories (name, name_key, created_at) VALUES (?1, ?2, ?3) RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(&category.name)
        .bind(name_key(&category.name))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Updates the name of an existing category and stamps `updated_at`.
    pub async fn save(&self, category: &Category) -> DbResult<Category> {
        debug!(id = category.id, "Updating category");

        sqlx::query_as::<_, Category>(&format!(
            "UPDATE categories SET name = ?2, name_key = ?3, updated_at = ?4 WHERE id = ?1 RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(category.id)
        .bind(&category.name)
        .bind(name_key(&category.name))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Category", category.id))
    }

    /// Deletes a category.
    pub async fn remove(&self, id: CategoryId) -> DbResult<()> {
        debug!(id, "Deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }

    /// Counts categories (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn find_by_id(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        Ok(self.get_by_id(id).await?)
    }

    async fn find_all(&self) -> StoreResult<Vec<Category>> {
        Ok(self.list().await?)
    }

    async fn exists_by_name(&self, name: &str) -> StoreResult<bool> {
        Ok(self.name_taken(name, None).await?)
    }

    async fn exists_by_name_excluding(&self, name: &str, id: CategoryId) -> StoreResult<bool> {
        Ok(self.name_taken(name, Some(id)).await?)
    }

    async fn insert(&self, category: NewCategory) -> StoreResult<Category> {
        Ok(self.create(&category).await?)
    }

    async fn update(&self, category: &Category) -> StoreResult<Category> {
        Ok(self.save(category).await?)
    }

    async fn delete_by_id(&self, id: CategoryId) -> StoreResult<()> {
        Ok(self.remove(id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
