//! Facet vocabulary shared by the query engine and its front ends.

use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// One filterable category of the catalog browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum FacetCategory {
    Language,
    Condition,
    ProductType,
    EnergyType,
    CardType,
    Rarity,
    Variant,
    Regulation,
    Format,
    QuickFilter,
}

impl FacetCategory {
    pub fn all() -> &'static [FacetCategory] {
        use FacetCategory::*;
        &[
            Language,
            Condition,
            ProductType,
            EnergyType,
            CardType,
            Rarity,
            Variant,
            Regulation,
            Format,
            QuickFilter,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            FacetCategory::Language => "language",
            FacetCategory::Condition => "condition",
            FacetCategory::ProductType => "productType",
            FacetCategory::EnergyType => "energyType",
            FacetCategory::CardType => "cardType",
            FacetCategory::Rarity => "rarity",
            FacetCategory::Variant => "variant",
            FacetCategory::Regulation => "regulation",
            FacetCategory::Format => "format",
            FacetCategory::QuickFilter => "quickFilter",
        }
    }
}

impl fmt::Display for FacetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FacetCategory {
    type Err = ModelError;

    /// Accepts the camelCase key, snake_case, or any casing of either.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        FacetCategory::all()
            .iter()
            .copied()
            .find(|category| category.key().to_ascii_lowercase() == folded)
            .ok_or_else(|| ModelError::UnknownFacetCategory(s.to_string()))
    }
}

/// Ownership shortcuts. Each enabled quick filter is an independent predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum QuickFilter {
    /// `quantity > 0`
    Owned,
    /// `quantity == 0`
    Missing,
    /// `quantity > 1`
    Duplicates,
    /// `wishlist == true`
    Wishlist,
}

impl QuickFilter {
    pub fn all() -> &'static [QuickFilter] {
        &[
            QuickFilter::Owned,
            QuickFilter::Missing,
            QuickFilter::Duplicates,
            QuickFilter::Wishlist,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            QuickFilter::Owned => "owned",
            QuickFilter::Missing => "missing",
            QuickFilter::Duplicates => "duplicates",
            QuickFilter::Wishlist => "wishlist",
        }
    }
}

impl fmt::Display for QuickFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for QuickFilter {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = s.trim().to_ascii_lowercase();
        QuickFilter::all()
            .iter()
            .copied()
            .find(|filter| filter.key() == folded)
            .ok_or_else(|| ModelError::UnknownQuickFilter(s.to_string()))
    }
}
