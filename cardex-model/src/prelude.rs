//! Engine/UI focused snapshot of the model surface.
//! Prefer importing from this module instead of individual tree nodes when
//! working in the query engine or a front end.

pub use super::card::{CardImages, CardRecord, SetInfo};
pub use super::error::{ModelError, Result as ModelResult};
pub use super::facets::{FacetCategory, QuickFilter};
pub use super::ids::CardId;
pub use super::price::{
    PriceBundle, TcgPlayerInfo, TcgPlayerPrices, VariantPrice,
};
pub use super::sort_key::SortKey;
