//! # Catalog Service
//!
//! Orchestrates every Category and Product operation.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  request ──► rules (fixed order) ──► store mutation ──► response DTO    │
//! │                  │                                                      │
//! │                  └── first failing check aborts; the store is untouched │
//! │                                                                         │
//! │  get_by_id / get_all ──► store read ──► response DTO (no rule checks)   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Product responses carry the linked category's id and name, looked up
//! fresh on every read.

pub mod category;
pub mod product;

pub use category::CategoryService;
pub use product::ProductService;

use std::sync::Arc;

use crate::memory::{InMemoryCategoryStore, InMemoryProductStore};
use crate::store::{CategoryStore, ProductStore};

/// Both entity services wired to the same pair of stores.
#[derive(Clone)]
pub struct CatalogService {
    categories: CategoryService,
    products: ProductService,
}

impl CatalogService {
    pub fn new(categories: Arc<dyn CategoryStore>, products: Arc<dyn ProductStore>) -> Self {
        CatalogService {
            categories: CategoryService::new(categories.clone(), products.clone()),
            products: ProductService::new(products, categories),
        }
    }

    /// A catalog backed by fresh in-memory stores.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryCategoryStore::new()),
            Arc::new(InMemoryProductStore::new()),
        )
    }

    pub fn categories(&self) -> &CategoryService {
        &self.categories
    }

    pub fn products(&self) -> &ProductService {
        &self.products
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{CategoryRequest, ProductRequest};
    use crate::{CatalogError, ErrorCode};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[tokio::test]
    async fn test_catalog_scenario() {
        let catalog = CatalogService::in_memory();

        let electronics = catalog
            .categories()
            .create(CategoryRequest::named("Electronics"))
            .await
            .unwrap();
        assert_eq!(electronics.id, 1);

        let err = catalog
            .categories()
            .create(CategoryRequest::named("electronics"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NameExists);

        let laptop = catalog
            .products()
            .create(
                ProductRequest::new("Laptop", Decimal::from_str("999.99").unwrap(), 50)
                    .category(electronics.id),
            )
            .await
            .unwrap();
        assert_eq!(laptop.category_id, Some(1));
        assert_eq!(laptop.category_name.as_deref(), Some("Electronics"));

        let err = catalog.categories().delete(1).await.unwrap_err();
        assert!(matches!(err, CatalogError::HasDependents { count: 1, .. }));

        let deleted = catalog.products().delete(laptop.id).await.unwrap();
        assert!(deleted.success);

        catalog.categories().delete(1).await.unwrap();
        assert_eq!(
            catalog.categories().get_by_id(1).await.unwrap_err().code(),
            ErrorCode::NotFound
        );
    }

    #[tokio::test]
    async fn test_product_response_follows_category_rename() {
        let catalog = CatalogService::in_memory();
        let books = catalog
            .categories()
            .create(CategoryRequest::named("Books"))
            .await
            .unwrap();
        let novel = catalog
            .products()
            .create(ProductRequest::new("Novel", Decimal::TEN, 1).category(books.id))
            .await
            .unwrap();

        catalog
            .categories()
            .update(books.id, CategoryRequest::named("Literature"))
            .await
            .unwrap();

        let read = catalog.products().get_by_id(novel.id).await.unwrap();
        assert_eq!(read.category_name.as_deref(), Some("Literature"));
    }
}
