//! Price bundle carried by every catalog record.
//!
//! A record may carry several overlapping price sources. Exactly one
//! "effective price" is derived from them through a fixed fallback chain,
//! see [`PriceBundle::effective_price`].

/// Market figures for one printing variant as reported by TCGplayer.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct VariantPrice {
    #[cfg_attr(
        feature = "serde",
        serde(
            deserialize_with = "crate::lenient::number_or_none",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub low: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(
            deserialize_with = "crate::lenient::number_or_none",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub mid: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(
            deserialize_with = "crate::lenient::number_or_none",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub high: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(
            deserialize_with = "crate::lenient::number_or_none",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub market: Option<f64>,
}

impl VariantPrice {
    pub fn with_market(market: f64) -> Self {
        Self {
            market: Some(market),
            ..Self::default()
        }
    }
}

/// Per-variant TCGplayer prices.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct TcgPlayerPrices {
    #[cfg_attr(
        feature = "serde",
        serde(
            deserialize_with = "crate::lenient::json_or_none",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub holofoil: Option<VariantPrice>,
    #[cfg_attr(
        feature = "serde",
        serde(
            deserialize_with = "crate::lenient::json_or_none",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub normal: Option<VariantPrice>,
    #[cfg_attr(
        feature = "serde",
        serde(
            deserialize_with = "crate::lenient::json_or_none",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub reverse_holofoil: Option<VariantPrice>,
    #[cfg_attr(
        feature = "serde",
        serde(
            alias = "1stEditionHolofoil",
            deserialize_with = "crate::lenient::json_or_none",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub first_edition_holofoil: Option<VariantPrice>,
}

/// The `tcgplayer` block of a record.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct TcgPlayerInfo {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub url: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(
            deserialize_with = "crate::lenient::json_or_none",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub prices: Option<TcgPlayerPrices>,
}

/// All price slots a record may carry.
///
/// `current_value` and `legacy_current_value` are distinct slots: exports
/// written by older importers use the snake_case key.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PriceBundle {
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "currentValue",
            deserialize_with = "crate::lenient::number_or_none",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub current_value: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "current_value",
            deserialize_with = "crate::lenient::number_or_none",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub legacy_current_value: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(
            deserialize_with = "crate::lenient::number_or_none",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub price: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(
            deserialize_with = "crate::lenient::json_or_none",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub tcgplayer: Option<TcgPlayerInfo>,
}

impl PriceBundle {
    /// Bundle with only `currentValue` set.
    pub fn current(value: f64) -> Self {
        Self {
            current_value: Some(value),
            ..Self::default()
        }
    }

    /// Bundle with only the given TCGplayer variant prices set.
    pub fn tcgplayer(prices: TcgPlayerPrices) -> Self {
        Self {
            tcgplayer: Some(TcgPlayerInfo {
                url: None,
                prices: Some(prices),
            }),
            ..Self::default()
        }
    }

    /// Price slots in fallback order.
    pub fn candidates(&self) -> [Option<f64>; 7] {
        let prices = self.tcgplayer.as_ref().and_then(|t| t.prices.as_ref());
        let market = |pick: fn(&TcgPlayerPrices) -> Option<&VariantPrice>| {
            prices.and_then(pick).and_then(|v| v.market)
        };

        [
            self.current_value,
            self.legacy_current_value,
            self.price,
            market(|p| p.holofoil.as_ref()),
            market(|p| p.normal.as_ref()),
            market(|p| p.reverse_holofoil.as_ref()),
            market(|p| p.first_edition_holofoil.as_ref()),
        ]
    }

    /// The single price used for ordering.
    ///
    /// Walks `currentValue → current_value → price → holofoil → normal →
    /// reverseHolofoil → firstEditionHolofoil` market prices and returns the
    /// first slot holding a finite, non-zero number. Zero counts as "no price"
    /// so an unpriced `currentValue: 0` does not mask a real market price.
    /// Returns `0.0` when no slot qualifies.
    pub fn effective_price(&self) -> f64 {
        self.candidates()
            .into_iter()
            .flatten()
            .find(|value| value.is_finite() && *value != 0.0)
            .unwrap_or(0.0)
    }
}
