//! # Product Commands
//!
//! Product responses carry `categoryId` and `categoryName` resolved at read
//! time, so a renamed category shows its new name on the next read.

use catalog_core::dto::{DeleteResponse, ProductList, ProductRequest, ProductResponse};
use catalog_core::ProductId;
use std::time::Instant;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn create_product(
    state: &AppState,
    request: ProductRequest,
) -> Result<ProductResponse, ApiError> {
    debug!(name = %request.name, category_id = ?request.category_id, "create_product command");
    Ok(state.catalog().products().create(request).await?)
}

pub async fn get_product(state: &AppState, id: ProductId) -> Result<ProductResponse, ApiError> {
    debug!(id, "get_product command");
    Ok(state.catalog().products().get_by_id(id).await?)
}

/// Lists live products. Each item costs one category lookup.
pub async fn list_products(state: &AppState) -> Result<ProductList, ApiError> {
    let start = Instant::now();
    let list = state.catalog().products().get_all().await?;

    debug!(
        count = list.items.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "list_products command"
    );
    Ok(list)
}

pub async fn update_product(
    state: &AppState,
    id: ProductId,
    request: ProductRequest,
) -> Result<ProductResponse, ApiError> {
    debug!(id, name = %request.name, "update_product command");
    Ok(state.catalog().products().update(id, request).await?)
}

pub async fn delete_product(state: &AppState, id: ProductId) -> Result<DeleteResponse, ApiError> {
    debug!(id, "delete_product command");
    Ok(state.catalog().products().delete(id).await?)
}
