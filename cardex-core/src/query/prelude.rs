//! Intentional query crate surface consumed by front ends.

pub use super::builder::CatalogQueryBuilder;
pub use super::orchestrator::QueryOrchestrator;
pub use super::types::{CatalogQuery, FacetSelection, PageStatus, QueryMode};
pub use crate::catalog::{CatalogStore, SharedCard};
pub use crate::config::EngineConfig;
pub use cardex_model::{CardRecord, FacetCategory, QuickFilter, SortKey};
