//! Category operations.

use std::sync::Arc;
use tracing::info;

use crate::dto::{CategoryList, CategoryRequest, CategoryResponse, DeleteResponse};
use crate::error::{CatalogError, CatalogResult};
use crate::rules::CategoryRules;
use crate::store::{CategoryStore, ProductStore};
use crate::types::{CategoryId, EntityKind, NewCategory};

/// Create, read, update and delete for categories.
#[derive(Clone)]
pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
    rules: CategoryRules,
}

impl CategoryService {
    pub fn new(store: Arc<dyn CategoryStore>, products: Arc<dyn ProductStore>) -> Self {
        CategoryService {
            rules: CategoryRules::new(store.clone(), products),
            store,
        }
    }

    /// Creates a category.
    ///
    /// ## Checks
    /// 1. Name format (`INVALID_NAME`)
    /// 2. Name uniqueness (`NAME_EXISTS`)
    pub async fn create(&self, request: CategoryRequest) -> CatalogResult<CategoryResponse> {
        let name = self.rules.validate_name(request.name.as_deref())?;
        self.rules.check_name_unique(name).await?;

        let category = self
            .store
            .insert(NewCategory {
                name: name.to_string(),
            })
            .await?;

        info!(id = category.id, name = %category.name, "Category created");
        Ok(category.into())
    }

    pub async fn get_by_id(&self, id: CategoryId) -> CatalogResult<CategoryResponse> {
        self.store
            .find_by_id(id)
            .await?
            .map(CategoryResponse::from)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Category, id))
    }

    pub async fn get_all(&self) -> CatalogResult<CategoryList> {
        let items = self
            .store
            .find_all()
            .await?
            .into_iter()
            .map(CategoryResponse::from)
            .collect();
        Ok(CategoryList { items })
    }

    /// Renames a category.
    ///
    /// ## Checks
    /// 1. Category exists (`NOT_FOUND`)
    /// 2. Name format (`INVALID_NAME`)
    /// 3. Name uniqueness, ignoring this category (`NAME_EXISTS`)
    pub async fn update(
        &self,
        id: CategoryId,
        request: CategoryRequest,
    ) -> CatalogResult<CategoryResponse> {
        let mut category = self.rules.require_exists(id).await?;
        let name = self.rules.validate_name(request.name.as_deref())?;
        self.rules.check_name_unique_excluding(id, name).await?;

        category.name = name.to_string();
        let category = self.store.update(&category).await?;

        info!(id, name = %category.name, "Category updated");
        Ok(category.into())
    }

    /// Deletes a category that no live product references.
    ///
    /// ## Checks
    /// 1. Category exists (`NOT_FOUND`)
    /// 2. No dependents (`HAS_DEPENDENTS`)
    pub async fn delete(&self, id: CategoryId) -> CatalogResult<DeleteResponse> {
        self.rules.require_exists(id).await?;
        self.rules.check_no_products(id).await?;

        self.store.delete_by_id(id).await?;

        info!(id, "Category deleted");
        Ok(DeleteResponse::deleted())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{InMemoryCategoryStore, InMemoryProductStore};
    use crate::types::NewProduct;
    use crate::{ErrorCode, ValidationError};
    use rust_decimal::Decimal;

    struct Fixture {
        categories: Arc<InMemoryCategoryStore>,
        products: Arc<InMemoryProductStore>,
        service: CategoryService,
    }

    fn fixture() -> Fixture {
        let categories = Arc::new(InMemoryCategoryStore::new());
        let products = Arc::new(InMemoryProductStore::new());
        let service = CategoryService::new(categories.clone(), products.clone());
        Fixture {
            categories,
            products,
            service,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let f = fixture();
        let created = f
            .service
            .create(CategoryRequest::named("Electronics"))
            .await
            .unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.name, "Electronics");
        assert!(created.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_create_keeps_name_as_given() {
        let f = fixture();
        let created = f
            .service
            .create(CategoryRequest::named("  Garden "))
            .await
            .unwrap();
        assert_eq!(created.name, "  Garden ");
    }

    #[tokio::test]
    async fn test_create_rejects_bad_names_without_writing() {
        let f = fixture();
        for request in [
            CategoryRequest::default(),
            CategoryRequest::named(""),
            CategoryRequest::named("   "),
            CategoryRequest::named("A"),
        ] {
            let err = f.service.create(request).await.unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidName);
        }
        assert!(f.categories.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_duplicate_name_any_case() {
        let f = fixture();
        f.service
            .create(CategoryRequest::named("Electronics"))
            .await
            .unwrap();

        let err = f
            .service
            .create(CategoryRequest::named("ELECTRONICS"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NameExists);
        assert_eq!(f.categories.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_format_error_wins_over_duplicate() {
        let f = fixture();
        f.categories
            .insert(NewCategory { name: "X".into() })
            .await
            .unwrap();

        let err = f.service.create(CategoryRequest::named("x")).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Validation(ValidationError::NameTooShort { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_checks_existence_first() {
        let f = fixture();
        // Invalid name AND missing id: the missing id wins.
        let err = f
            .service
            .update(42, CategoryRequest::named(""))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.to_string(), "Category not found with id: 42");
    }

    #[tokio::test]
    async fn test_update_same_name_and_conflicts() {
        let f = fixture();
        let books = f.service.create(CategoryRequest::named("Books")).await.unwrap();
        f.service.create(CategoryRequest::named("Games")).await.unwrap();

        let renamed = f
            .service
            .update(books.id, CategoryRequest::named("Books"))
            .await
            .unwrap();
        assert_eq!(renamed.id, books.id);
        assert_eq!(renamed.created_at, books.created_at);
        assert!(renamed.updated_at.is_some());

        let err = f
            .service
            .update(books.id, CategoryRequest::named("games"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NameExists);
        assert_eq!(f.service.get_by_id(books.id).await.unwrap().name, "Books");
    }

    #[tokio::test]
    async fn test_delete_guarded_by_dependents() {
        let f = fixture();
        let books = f.service.create(CategoryRequest::named("Books")).await.unwrap();
        let novel = f
            .products
            .insert(NewProduct {
                name: "Novel".into(),
                unit_price: Decimal::TEN,
                units_in_stock: 4,
                description: None,
                category_id: Some(books.id),
            })
            .await
            .unwrap();

        let err = f.service.delete(books.id).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::HasDependents);
        assert!(f.service.get_by_id(books.id).await.is_ok());

        // Soft-deleted products no longer count.
        f.products.delete_by_id(novel.id).await.unwrap();
        let deleted = f.service.delete(books.id).await.unwrap();
        assert_eq!(deleted, DeleteResponse::deleted());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let f = fixture();
        let err = f.service.delete(7).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_get_all_in_id_order() {
        let f = fixture();
        for name in ["Zeta", "Alpha", "Mid"] {
            f.service.create(CategoryRequest::named(name)).await.unwrap();
        }
        let names: Vec<_> = f
            .service
            .get_all()
            .await
            .unwrap()
            .items
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }
}
