//! # Rule Engines
//!
//! Stateless validators holding references to the entity stores. Each check
//! either passes or fails with a typed [`CatalogError`](crate::CatalogError).
//!
//! ## Check Ordering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Category                                                               │
//! │    create: validate_name ─► check_name_unique ─► persist               │
//! │    update: require_exists ─► validate_name                              │
//! │            ─► check_name_unique_excluding ─► persist                    │
//! │    delete: require_exists ─► check_no_products ─► delete               │
//! │                                                                         │
//! │  Product                                                                │
//! │    create: check_name_unique ─► price ─► stock ─► description           │
//! │            ─► resolve_category ─► persist                               │
//! │    update: require_exists ─► check_name_unique_excluding ─► price       │
//! │            ─► stock ─► description ─► resolve_category ─► persist       │
//! │    delete: require_exists ─► delete                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The ordering is part of the contract: format errors surface before
//! uniqueness errors, and existence is confirmed before anything else, so a
//! missing id never masquerades as a different failure. The services in
//! [`crate::service`] own the sequencing; the engines only provide the checks.

pub mod category;
pub mod product;

pub use category::CategoryRules;
pub use product::ProductRules;
