//! Sorting for catalog results.
//!
//! This module provides:
//! - Sort key extraction from card records
//! - Rarity tier ranking
//! - Stable, non-mutating sorts over shared records

pub mod keys;
pub mod rarity;
pub mod simple;
pub mod utils;


pub use keys::{CardSortKey, NameKey, parse_leading_number};
pub use rarity::{DEFAULT_RARITY_TIERS, RarityTiers};
pub use simple::{compare_cards, sort_cards, sort_cards_with};
