use crate::error::{ModelError, Result as ModelResult};
use crate::ids::CardId;
use crate::price::PriceBundle;

/// Set a card was printed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SetInfo {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::text_or_empty")
    )]
    pub id: String,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::text_or_empty")
    )]
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::text_or_empty")
    )]
    pub series: String,
}

impl SetInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Image URLs. Resolution and loading are owned by the front end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CardImages {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub small: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub large: Option<String>,
}

impl CardImages {
    pub fn is_empty(&self) -> bool {
        self.small.is_none() && self.large.is_none()
    }
}

/// One catalog entry.
///
/// Field values are kept in the raw vocabulary of the upstream export
/// (`"Lightning"`, `"Near Mint"`, `"en"`, ...); facet option keys are mapped
/// onto this vocabulary by the query engine.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct CardRecord {
    #[cfg_attr(feature = "serde", serde(deserialize_with = "de::card_id"))]
    pub id: CardId,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::text_or_empty")
    )]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "de::set_info"))]
    pub set: SetInfo,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::text_or_empty")
    )]
    pub number: String,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::text_or_empty")
    )]
    pub rarity: String,
    /// Energy-type tags (`"Fire"`, `"Lightning"`, ...).
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::json_or_default")
    )]
    pub types: Vec<String>,
    /// Top-level card kind (`"Pokémon"`, `"Trainer"`, `"Energy"`).
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::text_or_empty")
    )]
    pub supertype: String,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::text_or_empty")
    )]
    pub language: String,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::text_or_empty")
    )]
    pub condition: String,
    /// `"card"` or `"sealed"`.
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::text_or_empty")
    )]
    pub product_type: String,
    /// Printing variants available for this card (`"Normal"`, `"Reverse Holo"`, ...).
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::json_or_default")
    )]
    pub variants: Vec<String>,
    /// Regulation mark letter.
    pub regulation: Option<String>,
    /// Legality label (`"Standard"`, `"Expanded"`, `"Unlimited"`).
    pub format: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::text_or_empty")
    )]
    pub artist: String,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::count_or_zero")
    )]
    pub quantity: u32,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::flag_or_false")
    )]
    pub wishlist: bool,
    #[cfg_attr(
        feature = "serde",
        serde(
            alias = "nationalPokedexNumbers",
            deserialize_with = "crate::lenient::first_integer"
        )
    )]
    pub national_pokedex_number: Option<u32>,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::json_or_default")
    )]
    pub images: CardImages,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub prices: PriceBundle,
}

impl CardRecord {
    pub fn new(id: impl Into<CardId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            product_type: "card".to_string(),
            ..Self::default()
        }
    }

    pub fn with_set(mut self, set: SetInfo) -> Self {
        self.set = set;
        self
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = number.into();
        self
    }

    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = rarity.into();
        self
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_wishlist(mut self, wishlist: bool) -> Self {
        self.wishlist = wishlist;
        self
    }

    pub fn with_pokedex_number(mut self, number: u32) -> Self {
        self.national_pokedex_number = Some(number);
        self
    }

    pub fn with_prices(mut self, prices: PriceBundle) -> Self {
        self.prices = prices;
        self
    }

    /// Shorthand for a record priced through `currentValue`.
    pub fn with_price(self, value: f64) -> Self {
        self.with_prices(PriceBundle::current(value))
    }

    pub fn effective_price(&self) -> f64 {
        self.prices.effective_price()
    }

    pub fn is_owned(&self) -> bool {
        self.quantity > 0
    }

    /// Structural checks a catalog loader can report on. Lenient decoding
    /// never fails, so a record is only invalid when it cannot be addressed.
    pub fn validate(&self) -> ModelResult<()> {
        if self.id.as_str().trim().is_empty() {
            return Err(ModelError::InvalidRecord(format!(
                "record {:?} has no id",
                self.name
            )));
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod de {
    use super::SetInfo;
    use crate::ids::CardId;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Ids are usually strings but some exports use numeric keys.
    pub(super) fn card_id<'de, D>(deserializer: D) -> Result<CardId, D::Error>
    where
        D: Deserializer<'de>,
    {
        crate::lenient::text_or_empty(deserializer).map(CardId::new)
    }

    /// A set may be an object, a JSON-encoded object, or a bare set name.
    pub(super) fn set_info<'de, D>(deserializer: D) -> Result<SetInfo, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        if let Value::String(text) = &raw {
            let trimmed = text.trim();
            if !trimmed.starts_with('{') {
                return Ok(SetInfo::named(trimmed));
            }
        }
        Ok(crate::lenient::decode_value(raw))
    }
}
