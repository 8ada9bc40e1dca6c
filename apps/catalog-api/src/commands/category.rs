//! # Category Commands

use catalog_core::dto::{CategoryList, CategoryRequest, CategoryResponse, DeleteResponse};
use catalog_core::CategoryId;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn create_category(
    state: &AppState,
    request: CategoryRequest,
) -> Result<CategoryResponse, ApiError> {
    debug!(name = ?request.name, "create_category command");
    Ok(state.catalog().categories().create(request).await?)
}

pub async fn get_category(state: &AppState, id: CategoryId) -> Result<CategoryResponse, ApiError> {
    debug!(id, "get_category command");
    Ok(state.catalog().categories().get_by_id(id).await?)
}

pub async fn list_categories(state: &AppState) -> Result<CategoryList, ApiError> {
    let list = state.catalog().categories().get_all().await?;
    debug!(count = list.items.len(), "list_categories command");
    Ok(list)
}

pub async fn update_category(
    state: &AppState,
    id: CategoryId,
    request: CategoryRequest,
) -> Result<CategoryResponse, ApiError> {
    debug!(id, name = ?request.name, "update_category command");
    Ok(state.catalog().categories().update(id, request).await?)
}

pub async fn delete_category(state: &AppState, id: CategoryId) -> Result<DeleteResponse, ApiError> {
    debug!(id, "delete_category command");
    Ok(state.catalog().categories().delete(id).await?)
}
