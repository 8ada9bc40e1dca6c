//! Product business rules.

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::store::{CategoryStore, ProductStore};
use crate::types::{Category, CategoryId, EntityKind, Product, ProductId};
use crate::validation;

/// Checks guarding product mutations.
#[derive(Clone)]
pub struct ProductRules {
    products: Arc<dyn ProductStore>,
    categories: Arc<dyn CategoryStore>,
}

impl ProductRules {
    pub fn new(products: Arc<dyn ProductStore>, categories: Arc<dyn CategoryStore>) -> Self {
        ProductRules {
            products,
            categories,
        }
    }

    /// Fails with `NAME_EXISTS` if a live product already uses this name
    /// (case-insensitive).
    pub async fn check_name_unique(&self, name: &str) -> CatalogResult<()> {
        if self.products.exists_by_name(name).await? {
            debug!(name = %name, "Product name already taken");
            return Err(CatalogError::name_exists(EntityKind::Product, name));
        }
        Ok(())
    }

    /// Same as [`check_name_unique`](Self::check_name_unique), ignoring the
    /// product being updated.
    pub async fn check_name_unique_excluding(&self, id: ProductId, name: &str) -> CatalogResult<()> {
        if self.products.exists_by_name_excluding(name, id).await? {
            debug!(id, name = %name, "Product name taken by another product");
            return Err(CatalogError::name_exists(EntityKind::Product, name));
        }
        Ok(())
    }

    /// Fails with `INVALID_PRICE` if the price is absent or not strictly positive.
    pub fn check_price_valid(&self, price: Option<Decimal>) -> CatalogResult<Decimal> {
        Ok(validation::validate_unit_price(price)?)
    }

    /// Fails with `INVALID_STOCK` if the stock is absent or negative.
    pub fn check_stock_valid(&self, stock: Option<i32>) -> CatalogResult<i32> {
        Ok(validation::validate_units_in_stock(stock)?)
    }

    /// Fails with `INVALID_DESCRIPTION` if the description is too long.
    pub fn check_description_valid(&self, description: Option<&str>) -> CatalogResult<()> {
        Ok(validation::validate_description(description)?)
    }

    /// Loads the (live) product or fails with `NOT_FOUND`.
    pub async fn require_exists(&self, id: ProductId) -> CatalogResult<Product> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(EntityKind::Product, id))
    }

    /// Resolves an optional category reference.
    ///
    /// ## Tolerance
    /// An id that does not resolve is NOT an error: the product is saved
    /// without a category.
    /// ```text
    /// None        ──► Ok(None)
    /// Some(known) ──► Ok(Some(category))
    /// Some(7)     ──► Ok(None)   (warn: unknown category id)
    /// ```
    /// Store failures still propagate.
    pub async fn resolve_category(
        &self,
        category_id: Option<CategoryId>,
    ) -> CatalogResult<Option<Category>> {
        let Some(id) = category_id else {
            return Ok(None);
        };

        let category = self.categories.find_by_id(id).await?;
        if category.is_none() {
            warn!(category_id = id, "Unknown category id, saving product without category");
        }
        Ok(category)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{InMemoryCategoryStore, InMemoryProductStore};
    use crate::types::{NewCategory, NewProduct};
    use crate::ErrorCode;

    struct Fixture {
        categories: Arc<InMemoryCategoryStore>,
        products: Arc<InMemoryProductStore>,
        rules: ProductRules,
    }

    fn fixture() -> Fixture {
        let categories = Arc::new(InMemoryCategoryStore::new());
        let products = Arc::new(InMemoryProductStore::new());
        let rules = ProductRules::new(products.clone(), categories.clone());
        Fixture {
            categories,
            products,
            rules,
        }
    }

    async fn insert_product(f: &Fixture, name: &str) -> Product {
        f.products
            .insert(NewProduct {
                name: name.into(),
                unit_price: Decimal::new(1999, 2),
                units_in_stock: 3,
                description: None,
                category_id: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_check_name_unique() {
        let f = fixture();
        f.rules.check_name_unique("Laptop").await.unwrap();
        insert_product(&f, "Laptop").await;

        let err = f.rules.check_name_unique("LAPTOP").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NameExists);
        assert_eq!(err.to_string(), "Product with name 'LAPTOP' already exists");
    }

    #[tokio::test]
    async fn test_rename_to_own_name_passes() {
        let f = fixture();
        let laptop = insert_product(&f, "Laptop").await;
        let phone = insert_product(&f, "Phone").await;

        f.rules
            .check_name_unique_excluding(laptop.id, "Laptop")
            .await
            .unwrap();
        let err = f
            .rules
            .check_name_unique_excluding(phone.id, "laptop")
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NameExists);
    }

    #[test]
    fn test_numeric_checks() {
        let f = fixture();
        assert_eq!(
            f.rules.check_price_valid(Some(Decimal::new(1, 2))).unwrap(),
            Decimal::new(1, 2)
        );
        for bad in [None, Some(Decimal::ZERO), Some(Decimal::new(-1, 0))] {
            assert_eq!(
                f.rules.check_price_valid(bad).unwrap_err().code(),
                ErrorCode::InvalidPrice
            );
        }

        assert_eq!(f.rules.check_stock_valid(Some(0)).unwrap(), 0);
        for bad in [None, Some(-1)] {
            assert_eq!(
                f.rules.check_stock_valid(bad).unwrap_err().code(),
                ErrorCode::InvalidStock
            );
        }

        let long = "d".repeat(crate::MAX_DESCRIPTION_LEN + 1);
        assert_eq!(
            f.rules
                .check_description_valid(Some(&long))
                .unwrap_err()
                .code(),
            ErrorCode::InvalidDescription
        );
    }

    #[tokio::test]
    async fn test_require_exists_skips_deleted() {
        let f = fixture();
        let laptop = insert_product(&f, "Laptop").await;
        assert_eq!(f.rules.require_exists(laptop.id).await.unwrap().id, laptop.id);

        f.products.delete_by_id(laptop.id).await.unwrap();
        let err = f.rules.require_exists(laptop.id).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_resolve_category() {
        let f = fixture();
        let electronics = f
            .categories
            .insert(NewCategory {
                name: "Electronics".into(),
            })
            .await
            .unwrap();

        assert_eq!(f.rules.resolve_category(None).await.unwrap(), None);
        assert_eq!(
            f.rules.resolve_category(Some(electronics.id)).await.unwrap(),
            Some(electronics)
        );
        // Unknown id degrades to "no category", not an error.
        assert_eq!(f.rules.resolve_category(Some(404)).await.unwrap(), None);
    }
}
