//! Supported result orders.

use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Result order selected in the catalog browser.
///
/// The wire form is the kebab-case key (`"price-high"`). Deserialization is
/// lenient: unknown keys become [`SortKey::Unordered`], which keeps the input
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum SortKey {
    #[default]
    NameAsc,
    NameDesc,
    PriceLow,
    PriceHigh,
    RarityAsc,
    RarityDesc,
    Number,
    PokemonNumber,
    /// Same order as [`SortKey::PriceHigh`].
    Trending,
    /// Identity order.
    Unordered,
}

impl SortKey {
    pub fn all() -> &'static [SortKey] {
        use SortKey::*;
        &[
            NameAsc,
            NameDesc,
            PriceLow,
            PriceHigh,
            RarityAsc,
            RarityDesc,
            Number,
            PokemonNumber,
            Trending,
            Unordered,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::RarityAsc => "rarity-asc",
            SortKey::RarityDesc => "rarity-desc",
            SortKey::Number => "number",
            SortKey::PokemonNumber => "pokemon-number",
            SortKey::Trending => "trending",
            SortKey::Unordered => "none",
        }
    }

    /// Parse a sort key, falling back to [`SortKey::Unordered`].
    pub fn from_key_lossy(key: &str) -> SortKey {
        key.parse().unwrap_or(SortKey::Unordered)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SortKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = s.trim().to_ascii_lowercase().replace('_', "-");
        SortKey::all()
            .iter()
            .copied()
            .find(|key| key.key() == folded)
            .ok_or_else(|| ModelError::UnknownSortKey(s.to_string()))
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        SortKey::from_key_lossy(&value)
    }
}

impl From<SortKey> for String {
    fn from(value: SortKey) -> Self {
        value.key().to_string()
    }
}
