//! Data access for the cart's external collaborators.
//!
//! This crate provides:
//! - `ProductCatalog` / `StockService` - the lookups a cart mutation awaits
//! - `DependencyTag` - semantic dependency categories with default budgets
//! - `FetchPolicy` / `RetryPolicy` - per-dependency timeouts and retries
//! - `Resilient` - decorator applying a policy to any collaborator
//! - `StaticCatalog` / `StaticStock` - in-memory collaborators

mod dependency;
mod error;
mod memory;
mod policy;
mod resilient;
mod retry;
mod service;

pub use dependency::*;
pub use error::*;
pub use memory::*;
pub use policy::*;
pub use resilient::*;
pub use retry::*;
pub use service::*;
