//! Category business rules.

use std::sync::Arc;
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};
use crate::store::{CategoryStore, ProductStore};
use crate::types::{Category, CategoryId, EntityKind};
use crate::validation;

/// Checks guarding category mutations.
#[derive(Clone)]
pub struct CategoryRules {
    categories: Arc<dyn CategoryStore>,
    products: Arc<dyn ProductStore>,
}

impl CategoryRules {
    pub fn new(categories: Arc<dyn CategoryStore>, products: Arc<dyn ProductStore>) -> Self {
        CategoryRules {
            categories,
            products,
        }
    }

    /// Fails with `INVALID_NAME` if the name is absent, blank, or shorter
    /// than two characters. Returns the name untouched.
    pub fn validate_name<'a>(&self, name: Option<&'a str>) -> CatalogResult<&'a str> {
        Ok(validation::validate_category_name(name)?)
    }

    /// Fails with `NAME_EXISTS` if any category already uses this name
    /// (case-insensitive).
    pub async fn check_name_unique(&self, name: &str) -> CatalogResult<()> {
        if self.categories.exists_by_name(name).await? {
            debug!(name = %name, "Category name already taken");
            return Err(CatalogError::name_exists(EntityKind::Category, name));
        }
        Ok(())
    }

    /// Same as [`check_name_unique`](Self::check_name_unique) but ignores the
    /// category being updated, so renaming to its own name passes.
    pub async fn check_name_unique_excluding(
        &self,
        id: CategoryId,
        name: &str,
    ) -> CatalogResult<()> {
        if self.categories.exists_by_name_excluding(name, id).await? {
            debug!(id, name = %name, "Category name taken by another category");
            return Err(CatalogError::name_exists(EntityKind::Category, name));
        }
        Ok(())
    }

    /// Loads the category or fails with `NOT_FOUND`.
    pub async fn require_exists(&self, id: CategoryId) -> CatalogResult<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(EntityKind::Category, id))
    }

    /// Fails with `HAS_DEPENDENTS` if any live product references the category.
    pub async fn check_no_products(&self, id: CategoryId) -> CatalogResult<()> {
        let count = self.products.count_by_category_id(id).await?;
        if count > 0 {
            debug!(id, count, "Category still has products");
            return Err(CatalogError::HasDependents {
                category_id: id,
                count,
            });
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
