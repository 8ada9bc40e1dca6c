//! Product operations.

use std::sync::Arc;
use tracing::info;

use crate::dto::{DeleteResponse, ProductList, ProductRequest, ProductResponse};
use crate::error::{CatalogError, CatalogResult};
use crate::rules::ProductRules;
use crate::store::{CategoryStore, ProductStore};
use crate::types::{EntityKind, NewProduct, Product, ProductId};

/// Create, read, update and delete for products.
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
    categories: Arc<dyn CategoryStore>,
    rules: ProductRules,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>, categories: Arc<dyn CategoryStore>) -> Self {
        ProductService {
            rules: ProductRules::new(store.clone(), categories.clone()),
            store,
            categories,
        }
    }

    /// Creates a product.
    ///
    /// ## Checks
    /// 1. Name uniqueness (`NAME_EXISTS`)
    /// 2. Price (`INVALID_PRICE`)
    /// 3. Stock (`INVALID_STOCK`)
    /// 4. Description length (`INVALID_DESCRIPTION`)
    /// 5. Category resolution (never fails; unknown ids become "no category")
    pub async fn create(&self, request: ProductRequest) -> CatalogResult<ProductResponse> {
        self.rules.check_name_unique(&request.name).await?;
        let unit_price = self.rules.check_price_valid(request.unit_price)?;
        let units_in_stock = self.rules.check_stock_valid(request.units_in_stock)?;
        self.rules
            .check_description_valid(request.description.as_deref())?;
        let category = self.rules.resolve_category(request.category_id).await?;

        let product = self
            .store
            .insert(NewProduct {
                name: request.name,
                unit_price,
                units_in_stock,
                description: request.description,
                category_id: category.as_ref().map(|c| c.id),
            })
            .await?;

        info!(id = product.id, name = %product.name, category_id = ?product.category_id, "Product created");
        Ok(ProductResponse::new(product, category.as_ref()))
    }

    pub async fn get_by_id(&self, id: ProductId) -> CatalogResult<ProductResponse> {
        let product = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(EntityKind::Product, id))?;
        self.to_response(product).await
    }

    pub async fn get_all(&self) -> CatalogResult<ProductList> {
        let products = self.store.find_all().await?;
        let mut items = Vec::with_capacity(products.len());
        for product in products {
            items.push(self.to_response(product).await?);
        }
        Ok(ProductList { items })
    }

    /// Overwrites every mutable field of a product.
    ///
    /// ## Checks
    /// 1. Product exists (`NOT_FOUND`)
    /// 2. Name uniqueness, ignoring this product (`NAME_EXISTS`)
    /// 3. Price, stock, description as on create
    /// 4. Category resolution; an absent or unknown id clears the category
    pub async fn update(
        &self,
        id: ProductId,
        request: ProductRequest,
    ) -> CatalogResult<ProductResponse> {
        let mut product = self.rules.require_exists(id).await?;
        self.rules
            .check_name_unique_excluding(id, &request.name)
            .await?;
        let unit_price = self.rules.check_price_valid(request.unit_price)?;
        let units_in_stock = self.rules.check_stock_valid(request.units_in_stock)?;
        self.rules
            .check_description_valid(request.description.as_deref())?;
        let category = self.rules.resolve_category(request.category_id).await?;

        product.name = request.name;
        product.unit_price = unit_price;
        product.units_in_stock = units_in_stock;
        product.description = request.description;
        product.category_id = category.as_ref().map(|c| c.id);
        let product = self.store.update(&product).await?;

        info!(id, name = %product.name, category_id = ?product.category_id, "Product updated");
        Ok(ProductResponse::new(product, category.as_ref()))
    }

    /// Soft-deletes a product. Products have no dependents.
    pub async fn delete(&self, id: ProductId) -> CatalogResult<DeleteResponse> {
        self.rules.require_exists(id).await?;

        self.store.delete_by_id(id).await?;

        info!(id, "Product deleted");
        Ok(DeleteResponse::deleted())
    }

    /// Denormalises the linked category with a fresh lookup.
    async fn to_response(&self, product: Product) -> CatalogResult<ProductResponse> {
        let category = match product.category_id {
            Some(category_id) => self.categories.find_by_id(category_id).await?,
            None => None,
        };
        Ok(ProductResponse::new(product, category.as_ref()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{InMemoryCategoryStore, InMemoryProductStore};
    use crate::types::NewCategory;
    use crate::ErrorCode;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    struct Fixture {
        categories: Arc<InMemoryCategoryStore>,
        products: Arc<InMemoryProductStore>,
        service: ProductService,
    }

    fn fixture() -> Fixture {
        let categories = Arc::new(InMemoryCategoryStore::new());
        let products = Arc::new(InMemoryProductStore::new());
        let service = ProductService::new(products.clone(), categories.clone());
        Fixture {
            categories,
            products,
            service,
        }
    }

    fn price(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    async fn category(f: &Fixture, name: &str) -> i64 {
        f.categories
            .insert(NewCategory { name: name.into() })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_create_with_category() {
        let f = fixture();
        let electronics = category(&f, "Electronics").await;

        let laptop = f
            .service
            .create(
                ProductRequest::new("Laptop", price("999.99"), 50)
                    .description("14 inch")
                    .category(electronics),
            )
            .await
            .unwrap();

        assert_eq!(laptop.unit_price, price("999.99"));
        assert_eq!(laptop.units_in_stock, 50);
        assert_eq!(laptop.description.as_deref(), Some("14 inch"));
        assert_eq!(laptop.category_id, Some(electronics));
        assert_eq!(laptop.category_name.as_deref(), Some("Electronics"));
        assert!(laptop.deleted_at.is_none());
    }

    #[tokio::test]
    async fn test_unknown_category_saves_without_one() {
        let f = fixture();
        let product = f
            .service
            .create(ProductRequest::new("Mouse", price("19.90"), 3).category(999))
            .await
            .unwrap();

        assert_eq!(product.category_id, None);
        assert_eq!(product.category_name, None);
        let stored = f.products.find_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(stored.category_id, None);
    }

    #[tokio::test]
    async fn test_price_boundaries() {
        let f = fixture();
        for bad in ["0", "0.00", "-5"] {
            let err = f
                .service
                .create(ProductRequest::new("Widget", price(bad), 1))
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidPrice);
        }

        let mut missing = ProductRequest::new("Widget", Decimal::ONE, 1);
        missing.unit_price = None;
        let err = f.service.create(missing).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidPrice);

        let cheap = f
            .service
            .create(ProductRequest::new("Widget", price("0.01"), 1))
            .await
            .unwrap();
        assert_eq!(cheap.unit_price, price("0.01"));
    }

    #[tokio::test]
    async fn test_stock_boundaries() {
        let f = fixture();
        let err = f
            .service
            .create(ProductRequest::new("Widget", Decimal::ONE, -1))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidStock);

        let mut missing = ProductRequest::new("Widget", Decimal::ONE, 0);
        missing.units_in_stock = None;
        let err = f.service.create(missing).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidStock);

        let empty = f
            .service
            .create(ProductRequest::new("Widget", Decimal::ONE, 0))
            .await
            .unwrap();
        assert_eq!(empty.units_in_stock, 0);
    }

    #[tokio::test]
    async fn test_check_order_on_create() {
        let f = fixture();
        f.service
            .create(ProductRequest::new("Widget", Decimal::ONE, 1))
            .await
            .unwrap();

        // Duplicate name is reported before the bad price.
        let err = f
            .service
            .create(ProductRequest::new("WIDGET", Decimal::ZERO, -1))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NameExists);

        // Bad price is reported before bad stock.
        let err = f
            .service
            .create(ProductRequest::new("Gadget", Decimal::ZERO, -1))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidPrice);
    }

    #[tokio::test]
    async fn test_description_too_long() {
        let f = fixture();
        let err = f
            .service
            .create(
                ProductRequest::new("Widget", Decimal::ONE, 1)
                    .description("x".repeat(crate::MAX_DESCRIPTION_LEN + 1)),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidDescription);
        assert!(f.products.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_overwrites_all_fields() {
        let f = fixture();
        let tools = category(&f, "Tools").await;
        let created = f
            .service
            .create(
                ProductRequest::new("Hammer", price("12.50"), 10)
                    .description("steel")
                    .category(tools),
            )
            .await
            .unwrap();

        // Same name is fine; omitted description and category are cleared.
        let updated = f
            .service
            .update(created.id, ProductRequest::new("Hammer", price("14.00"), 8))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at.is_some());
        assert_eq!(updated.unit_price, price("14.00"));
        assert_eq!(updated.units_in_stock, 8);
        assert_eq!(updated.description, None);
        assert_eq!(updated.category_id, None);
    }

    #[tokio::test]
    async fn test_update_failures() {
        let f = fixture();
        let hammer = f
            .service
            .create(ProductRequest::new("Hammer", Decimal::ONE, 1))
            .await
            .unwrap();
        f.service
            .create(ProductRequest::new("Saw", Decimal::ONE, 1))
            .await
            .unwrap();

        let err = f
            .service
            .update(99, ProductRequest::new("Saw", Decimal::ZERO, -1))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);

        let err = f
            .service
            .update(hammer.id, ProductRequest::new("saw", Decimal::ONE, 1))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NameExists);

        let err = f
            .service
            .update(hammer.id, ProductRequest::new("Hammer", Decimal::ZERO, 1))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidPrice);

        let unchanged = f.service.get_by_id(hammer.id).await.unwrap();
        assert_eq!(unchanged.unit_price, Decimal::ONE);
        assert!(unchanged.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_delete_hides_product() {
        let f = fixture();
        let hammer = f
            .service
            .create(ProductRequest::new("Hammer", Decimal::ONE, 1))
            .await
            .unwrap();

        assert!(f.service.delete(hammer.id).await.unwrap().success);

        assert_eq!(
            f.service.get_by_id(hammer.id).await.unwrap_err().code(),
            ErrorCode::NotFound
        );
        assert!(f.service.get_all().await.unwrap().items.is_empty());
        assert_eq!(
            f.service.delete(hammer.id).await.unwrap_err().code(),
            ErrorCode::NotFound
        );

        // The name can be reused.
        f.service
            .create(ProductRequest::new("Hammer", Decimal::ONE, 1))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_read_drops_dangling_category() {
        let f = fixture();
        let tools = category(&f, "Tools").await;
        let hammer = f
            .service
            .create(ProductRequest::new("Hammer", Decimal::ONE, 1).category(tools))
            .await
            .unwrap();

        // Bypass the rules to leave a dangling reference behind.
        f.categories.delete_by_id(tools).await.unwrap();

        let read = f.service.get_by_id(hammer.id).await.unwrap();
        assert_eq!(read.category_id, None);
        assert_eq!(read.category_name, None);
    }
}
