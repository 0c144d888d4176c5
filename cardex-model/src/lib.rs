//! Core data model definitions shared across Cardex crates.
//!
//! Records, price bundles and the facet/sort vocabulary live here so the
//! query engine and its front ends agree on one shape. Serde support is
//! behind the `serde` feature.
#![allow(missing_docs)]

pub mod card;
pub mod error;
pub mod facets;
pub mod ids;
#[cfg(feature = "serde")]
pub mod lenient;
pub mod prelude;
pub mod price;
pub mod sort_key;

// Intentionally curated re-exports for downstream consumers.
pub use card::{CardImages, CardRecord, SetInfo};
pub use error::{ModelError, Result as ModelResult};
pub use facets::{FacetCategory, QuickFilter};
pub use ids::CardId;
pub use price::{PriceBundle, TcgPlayerInfo, TcgPlayerPrices, VariantPrice};
pub use sort_key::SortKey;
