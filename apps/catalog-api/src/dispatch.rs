//! # Command Dispatch
//!
//! Decodes one JSON command, runs it, and shapes the reply.
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  in   {"command":"createCategory","args":{"name":"Electronics"}}        │
//! │  out  {"status":201,"body":{"id":1,"name":"Electronics",...}}           │
//! │                                                                         │
//! │  in   {"command":"updateProduct","args":{"id":1,"name":"Laptop",        │
//! │        "unitPrice":"899.00","unitsInStock":40}}                         │
//! │  out  {"status":200,"body":{...}}                                       │
//! │                                                                         │
//! │  in   {"command":"deleteCategory","args":{"id":1}}                      │
//! │  out  {"status":409,"body":{"code":"HAS_DEPENDENTS","message":"..."}}   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Outcome | Status |
//! |---------|--------|
//! | create | 201 |
//! | get, list, update, delete, health | 200 |
//! | error | [`ApiError::status`] |

use catalog_core::dto::{CategoryRequest, ProductRequest};
use catalog_core::{CategoryId, ErrorCode, ProductId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::commands::{self, category, product};
use crate::error::ApiError;
use crate::state::AppState;

/// A decoded command. Update arguments carry the id next to the request fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", content = "args", rename_all = "camelCase")]
pub enum Command {
    CreateCategory(CategoryRequest),
    GetCategory {
        id: CategoryId,
    },
    ListCategories,
    UpdateCategory {
        id: CategoryId,
        #[serde(flatten)]
        request: CategoryRequest,
    },
    DeleteCategory {
        id: CategoryId,
    },
    CreateProduct(ProductRequest),
    GetProduct {
        id: ProductId,
    },
    ListProducts,
    UpdateProduct {
        id: ProductId,
        #[serde(flatten)]
        request: ProductRequest,
    },
    DeleteProduct {
        id: ProductId,
    },
    Health,
}

impl Command {
    /// Wire name, used in log spans.
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateCategory(_) => "createCategory",
            Command::GetCategory { .. } => "getCategory",
            Command::ListCategories => "listCategories",
            Command::UpdateCategory { .. } => "updateCategory",
            Command::DeleteCategory { .. } => "deleteCategory",
            Command::CreateProduct(_) => "createProduct",
            Command::GetProduct { .. } => "getProduct",
            Command::ListProducts => "listProducts",
            Command::UpdateProduct { .. } => "updateProduct",
            Command::DeleteProduct { .. } => "deleteProduct",
            Command::Health => "health",
        }
    }
}

/// Status plus JSON body of a handled command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
}

impl Reply {
    fn encode<T: Serialize>(status: u16, body: &T) -> Reply {
        match serde_json::to_value(body) {
            Ok(body) => Reply { status, body },
            Err(e) => {
                error!("Failed to encode reply: {}", e);
                Reply {
                    status: 500,
                    body: serde_json::json!({
                        "code": ErrorCode::Internal,
                        "message": "Failed to encode reply",
                    }),
                }
            }
        }
    }

    fn error(err: ApiError) -> Reply {
        Reply::encode(err.status(), &err)
    }

    fn from_result<T: Serialize>(status: u16, result: Result<T, ApiError>) -> Reply {
        match result {
            Ok(body) => Reply::encode(status, &body),
            Err(err) => Reply::error(err),
        }
    }
}

/// Handles one raw command line.
///
/// Each command runs inside a span carrying a fresh request id.
pub async fn dispatch(state: &AppState, line: &str) -> Reply {
    let request_id = Uuid::new_v4();

    let command = match serde_json::from_str::<Command>(line) {
        Ok(command) => command,
        Err(e) => {
            warn!(%request_id, "Rejected command: {}", e);
            return Reply::error(ApiError::bad_request(format!("Invalid command: {e}")));
        }
    };

    let span = info_span!("command", %request_id, name = command.name());
    async move {
        let reply = execute(state, command).await;
        info!(status = reply.status, "Command handled");
        reply
    }
    .instrument(span)
    .await
}

/// Runs an already decoded command.
pub async fn execute(state: &AppState, command: Command) -> Reply {
    match command {
        Command::CreateCategory(request) => {
            Reply::from_result(201, category::create_category(state, request).await)
        }
        Command::GetCategory { id } => {
            Reply::from_result(200, category::get_category(state, id).await)
        }
        Command::ListCategories => Reply::from_result(200, category::list_categories(state).await),
        Command::UpdateCategory { id, request } => {
            Reply::from_result(200, category::update_category(state, id, request).await)
        }
        Command::DeleteCategory { id } => {
            Reply::from_result(200, category::delete_category(state, id).await)
        }
        Command::CreateProduct(request) => {
            Reply::from_result(201, product::create_product(state, request).await)
        }
        Command::GetProduct { id } => Reply::from_result(200, product::get_product(state, id).await),
        Command::ListProducts => Reply::from_result(200, product::list_products(state).await),
        Command::UpdateProduct { id, request } => {
            Reply::from_result(200, product::update_product(state, id, request).await)
        }
        Command::DeleteProduct { id } => {
            Reply::from_result(200, product::delete_product(state, id).await)
        }
        Command::Health => Reply::from_result(200, commands::health(state).await),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
