//! # Data Transfer Objects
//!
//! Request and response shapes exchanged with the API boundary.
//!
//! ## Why DTOs?
//! - Requests never carry an id: identity is always store-assigned
//! - Product responses denormalise the category name, looked up on every read
//! - camelCase field names for JSON consumers, TypeScript bindings via ts-rs
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CategoryRequest { name }                                               │
//! │        │ create / update                                                │
//! │        ▼                                                                │
//! │  CategoryService ──► Category ──► CategoryResponse                      │
//! │                                                                         │
//! │  ProductRequest { name, unitPrice, unitsInStock, description,           │
//! │                   categoryId }                                          │
//! │        │ create / update                                                │
//! │        ▼                                                                │
//! │  ProductService ──► Product + fresh Category lookup ──► ProductResponse │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Category, CategoryId, Product, ProductId};

// =============================================================================
// Requests
// =============================================================================

/// Body of a category create or update.
///
/// `name` is optional on the wire so that a missing name surfaces as
/// `INVALID_NAME` instead of a decoding error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CategoryRequest {
    #[serde(default)]
    pub name: Option<String>,
}

impl CategoryRequest {
    /// Creates a request carrying the given name.
    pub fn named(name: impl Into<String>) -> Self {
        CategoryRequest {
            name: Some(name.into()),
        }
    }
}

/// Body of a product create or update.
///
/// Price and stock are optional on the wire so that absence surfaces as
/// `INVALID_PRICE` / `INVALID_STOCK`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductRequest {
    pub name: String,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub unit_price: Option<Decimal>,

    #[serde(default)]
    pub units_in_stock: Option<i32>,

    #[serde(default)]
    pub description: Option<String>,

    /// Category to link. An id that does not resolve saves the product
    /// without a category.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

impl ProductRequest {
    /// Creates a request with the mandatory fields set.
    pub fn new(name: impl Into<String>, unit_price: Decimal, units_in_stock: i32) -> Self {
        ProductRequest {
            name: name.into(),
            unit_price: Some(unit_price),
            units_in_stock: Some(units_in_stock),
            description: None,
            category_id: None,
        }
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the category reference.
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CategoryResponse {
    pub id: CategoryId,
    pub name: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        CategoryResponse {
            id: c.id,
            name: c.name,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    #[ts(as = "String")]
    pub unit_price: Decimal,
    pub units_in_stock: i32,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub category_name: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
    #[ts(as = "Option<String>")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ProductResponse {
    /// Builds the response from a product and its (freshly looked up) category.
    ///
    /// The category id and name are taken from the looked-up category, so a
    /// dangling reference shows up as no category at all.
    pub fn new(product: Product, category: Option<&Category>) -> Self {
        ProductResponse {
            id: product.id,
            name: product.name,
            unit_price: product.unit_price,
            units_in_stock: product.units_in_stock,
            description: product.description,
            category_id: category.map(|c| c.id),
            category_name: category.map(|c| c.name.clone()),
            created_at: product.created_at,
            updated_at: product.updated_at,
            deleted_at: product.deleted_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryList {
    pub items: Vec<CategoryResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductList {
    pub items: Vec<ProductResponse>,
}

/// Outcome of a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

impl DeleteResponse {
    pub fn deleted() -> Self {
        DeleteResponse {
            success: true,
            message: "Deleted".to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_request_from_json() {
        let json = r#"{
            "name": "Laptop",
            "unitPrice": "999.99",
            "unitsInStock": 50,
            "categoryId": 1
        }"#;
        let request: ProductRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name, "Laptop");
        assert_eq!(request.unit_price, Some(Decimal::new(99999, 2)));
        assert_eq!(request.units_in_stock, Some(50));
        assert_eq!(request.description, None);
        assert_eq!(request.category_id, Some(1));
    }

    #[test]
    fn test_category_request_missing_name() {
        let request: CategoryRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.name, None);
    }

    #[test]
    fn test_product_response_denormalises_category() {
        let now = Utc::now();
        let category = Category {
            id: 1,
            name: "Electronics".to_string(),
            created_at: now,
            updated_at: None,
        };
        let product = Product {
            id: 7,
            name: "Laptop".to_string(),
            unit_price: Decimal::new(99999, 2),
            units_in_stock: 50,
            description: None,
            category_id: Some(1),
            created_at: now,
            updated_at: None,
            deleted_at: None,
        };

        let response = ProductResponse::new(product.clone(), Some(&category));
        assert_eq!(response.category_id, Some(1));
        assert_eq!(response.category_name.as_deref(), Some("Electronics"));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["categoryName"], "Electronics");
        assert_eq!(json["unitsInStock"], 50);

        // Dangling reference: no category on the response.
        let response = ProductResponse::new(product, None);
        assert_eq!(response.category_id, None);
        assert_eq!(response.category_name, None);
    }

    #[test]
    fn test_delete_response() {
        let response = DeleteResponse::deleted();
        assert!(response.success);
        assert_eq!(response.message, "Deleted");
    }
}
