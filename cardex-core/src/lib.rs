//! # Cardex Core
//!
//! Catalog query engine for a trading-card collection browser.
//!
//! ## Overview
//!
//! A query runs through a fixed pipeline:
//!
//! - **Search**: case-insensitive substring match on card and set names
//! - **Facets**: per-category option sets, OR within a category and AND across
//! - **Sort**: domain orders (name, effective price, rarity tier, collector
//!   number, Pokédex number) with stable tie-breaks
//! - **Pagination**: a growing visible prefix driven by cancellable
//!   "load more" continuations
//!
//! [`query::QueryOrchestrator`] composes the stages and is the only type a
//! front end needs to talk to. Records live in an immutable
//! [`catalog::CatalogStore`] snapshot and are shared between stages as
//! [`catalog::SharedCard`].
//!
//! ## Modules
//!
//! - [`catalog`]: record snapshots, lookups and statistics
//! - [`query`]: search, facet filtering, sorting, pagination, orchestration
//! - [`config`]: engine tunables with environment overrides
//! - [`error`]: the crate error type
//!
//! ## Examples
//!
//! ```no_run
//! use cardex_core::{
//!     catalog::CatalogStore,
//!     config::EngineConfig,
//!     query::{FacetSelection, QueryOrchestrator},
//! };
//! use cardex_model::{CardRecord, FacetCategory, SortKey};
//!
//! let store = CatalogStore::from_records(vec![
//!     CardRecord::new("sv3-125", "Charizard ex").with_price(1500.0),
//!     CardRecord::new("base2-2", "Blastoise").with_price(30.0),
//! ]);
//!
//! let mut engine = QueryOrchestrator::new(store, EngineConfig::default());
//! engine.run_search("char");
//! engine.set_sort_key(SortKey::PriceHigh);
//! engine.apply_facets(FacetSelection::new().with(FacetCategory::Language, "english"));
//!
//! for card in engine.visible_results() {
//!     println!("{} {:.2}", card.name, card.effective_price());
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod query;

pub use error::{CatalogError, Result};
