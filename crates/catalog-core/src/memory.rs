//! # In-Memory Entity Stores
//!
//! Process-local implementations of [`CategoryStore`] and [`ProductStore`].
//!
//! They follow the same contract as the SQLite repositories, including the
//! unique-name backstop, so the rule engines and services can be exercised
//! without a database.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  RwLock<Table<T>>                        │
//! │  ├── rows: BTreeMap<id, T>  (id order)   │
//! │  └── next_id: 1, 2, 3, ...               │
//! └──────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::{CategoryStore, ProductStore};
use crate::types::{name_key, Category, CategoryId, NewCategory, NewProduct, Product, ProductId};

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Table {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn same_name(a: &str, b: &str) -> bool {
    name_key(a) == name_key(b)
}

// =============================================================================
// Categories
// =============================================================================

#[derive(Debug, Default)]
pub struct InMemoryCategoryStore {
    table: RwLock<Table<Category>>,
}

impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn category_name_taken(table: &Table<Category>, name: &str, except: Option<CategoryId>) -> bool {
    table
        .rows
        .values()
        .any(|c| Some(c.id) != except && same_name(&c.name, name))
}

#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn find_by_id(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> StoreResult<Vec<Category>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn exists_by_name(&self, name: &str) -> StoreResult<bool> {
        Ok(category_name_taken(&*self.table.read().await, name, None))
    }

    async fn exists_by_name_excluding(&self, name: &str, id: CategoryId) -> StoreResult<bool> {
        Ok(category_name_taken(&*self.table.read().await, name, Some(id)))
    }

    async fn insert(&self, category: NewCategory) -> StoreResult<Category> {
        let mut table = self.table.write().await;

        if category_name_taken(&table, &category.name, None) {
            return Err(StoreError::UniqueViolation("categories.name".to_string()));
        }

        let row = Category {
            id: table.allocate_id(),
            name: category.name,
            created_at: Utc::now(),
            updated_at: None,
        };
        debug!(id = row.id, name = %row.name, "Inserted category (memory)");
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, category: &Category) -> StoreResult<Category> {
        let mut table = self.table.write().await;

        if category_name_taken(&table, &category.name, Some(category.id)) {
            return Err(StoreError::UniqueViolation("categories.name".to_string()));
        }

        let row = table
            .rows
            .get_mut(&category.id)
            .ok_or_else(|| StoreError::Backend(format!("Category not found: {}", category.id)))?;
        row.name = category.name.clone();
        row.updated_at = Some(Utc::now());
        Ok(row.clone())
    }

    async fn delete_by_id(&self, id: CategoryId) -> StoreResult<()> {
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::Backend(format!("Category not found: {id}")))
    }
}

// =============================================================================
// Products
// =============================================================================

/// Products are soft-deleted: rows stay in the table with `deleted_at` set
/// and are skipped by every query.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    table: RwLock<Table<Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn product_name_taken(table: &Table<Product>, name: &str, except: Option<ProductId>) -> bool {
    table
        .rows
        .values()
        .filter(|p| p.is_live())
        .any(|p| Some(p.id) != except && same_name(&p.name, name))
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn find_by_id(&self, id: ProductId) -> StoreResult<Option<Product>> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .get(&id)
            .filter(|p| p.is_live())
            .cloned())
    }

    async fn find_all(&self) -> StoreResult<Vec<Product>> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .filter(|p| p.is_live())
            .cloned()
            .collect())
    }

    async fn exists_by_name(&self, name: &str) -> StoreResult<bool> {
        Ok(product_name_taken(&*self.table.read().await, name, None))
    }

    async fn exists_by_name_excluding(&self, name: &str, id: ProductId) -> StoreResult<bool> {
        Ok(product_name_taken(&*self.table.read().await, name, Some(id)))
    }

    async fn count_by_category_id(&self, category_id: CategoryId) -> StoreResult<i64> {
        let count = self
            .table
            .read()
            .await
            .rows
            .values()
            .filter(|p| p.is_live() && p.category_id == Some(category_id))
            .count();
        Ok(count as i64)
    }

    async fn insert(&self, product: NewProduct) -> StoreResult<Product> {
        let mut table = self.table.write().await;

        if product_name_taken(&table, &product.name, None) {
            return Err(StoreError::UniqueViolation("products.name".to_string()));
        }

        let row = Product {
            id: table.allocate_id(),
            name: product.name,
            unit_price: product.unit_price,
            units_in_stock: product.units_in_stock,
            description: product.description,
            category_id: product.category_id,
            created_at: Utc::now(),
            updated_at: None,
            deleted_at: None,
        };
        debug!(id = row.id, name = %row.name, "Inserted product (memory)");
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, product: &Product) -> StoreResult<Product> {
        let mut table = self.table.write().await;

        if product_name_taken(&table, &product.name, Some(product.id)) {
            return Err(StoreError::UniqueViolation("products.name".to_string()));
        }

        let row = table
            .rows
            .get_mut(&product.id)
            .filter(|p| p.is_live())
            .ok_or_else(|| StoreError::Backend(format!("Product not found: {}", product.id)))?;
        row.name = product.name.clone();
        row.unit_price = product.unit_price;
        row.units_in_stock = product.units_in_stock;
        row.description = product.description.clone();
        row.category_id = product.category_id;
        row.updated_at = Some(Utc::now());
        Ok(row.clone())
    }

    async fn delete_by_id(&self, id: ProductId) -> StoreResult<()> {
        let mut table = self.table.write().await;
        let row = table
            .rows
            .get_mut(&id)
            .filter(|p| p.is_live())
            .ok_or_else(|| StoreError::Backend(format!("Product not found: {id}")))?;
        let now = Utc::now();
        row.deleted_at = Some(now);
        row.updated_at = Some(now);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn new_product(name: &str, category_id: Option<CategoryId>) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            unit_price: Decimal::new(1000, 2),
            units_in_stock: 5,
            description: None,
            category_id,
        }
    }

    #[tokio::test]
    async fn test_category_ids_are_sequential() {
        let store = InMemoryCategoryStore::new();
        let a = store.insert(NewCategory { name: "Books".into() }).await.unwrap();
        let b = store.insert(NewCategory { name: "Games".into() }).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert!(a.updated_at.is_none());

        let all = store.find_all().await.unwrap();
        assert_eq!(all.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_category_name_lookup_ignores_case() {
        let store = InMemoryCategoryStore::new();
        let books = store.insert(NewCategory { name: "Books".into() }).await.unwrap();

        assert!(store.exists_by_name("BOOKS").await.unwrap());
        assert!(!store.exists_by_name("Book").await.unwrap());
        assert!(!store.exists_by_name_excluding("books", books.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_category_unique_backstop() {
        let store = InMemoryCategoryStore::new();
        store.insert(NewCategory { name: "Books".into() }).await.unwrap();

        let err = store
            .insert(NewCategory { name: "books".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));
    }

    #[tokio::test]
    async fn test_category_update_keeps_identity() {
        let store = InMemoryCategoryStore::new();
        let created = store.insert(NewCategory { name: "Books".into() }).await.unwrap();

        let mut changed = created.clone();
        changed.name = "Comics".into();
        let updated = store.update(&changed).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at.is_some());
        assert_eq!(updated.name, "Comics");
    }

    #[tokio::test]
    async fn test_soft_deleted_products_are_invisible() {
        let store = InMemoryProductStore::new();
        let laptop = store.insert(new_product("Laptop", Some(1))).await.unwrap();
        assert_eq!(store.count_by_category_id(1).await.unwrap(), 1);

        store.delete_by_id(laptop.id).await.unwrap();

        assert_eq!(store.find_by_id(laptop.id).await.unwrap(), None);
        assert!(store.find_all().await.unwrap().is_empty());
        assert_eq!(store.count_by_category_id(1).await.unwrap(), 0);
        assert!(!store.exists_by_name("laptop").await.unwrap());

        // Name is free again.
        let again = store.insert(new_product("Laptop", None)).await.unwrap();
        assert_ne!(again.id, laptop.id);

        // Deleting twice fails.
        assert!(store.delete_by_id(laptop.id).await.is_err());
    }
}
