//! Sort keys extracted from card records.
//!
//! Keys are computed once per record before sorting so the comparator never
//! re-derives prices or re-folds names.

use super::rarity::RarityTiers;
use cardex_model::{CardRecord, SortKey};
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Name key: accent- and case-folded text first, raw text as the tiebreak.
/// `Éevee` sorts with the `E`s, not after `Z`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NameKey {
    folded: String,
    raw: String,
}

impl NameKey {
    pub fn new(name: &str) -> Self {
        NameKey {
            folded: fold_name(name),
            raw: name.to_string(),
        }
    }
}

/// NFD-decompose, drop combining marks, lowercase.
fn fold_name(name: &str) -> String {
    name.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

impl Ord for NameKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded
            .cmp(&other.folded)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for NameKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The value a card sorts by under one [`SortKey`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum CardSortKey {
    Name(NameKey),
    Price(OrderedFloat<f64>),
    /// `None` (unranked) orders below every tier.
    Rarity(Option<usize>),
    Number(i64),
    Pokedex(u32),
    /// Every card compares equal.
    Unordered,
}

impl CardSortKey {
    pub fn extract(card: &CardRecord, key: SortKey, tiers: &RarityTiers) -> Self {
        match key {
            SortKey::NameAsc | SortKey::NameDesc => CardSortKey::Name(NameKey::new(&card.name)),
            SortKey::PriceLow | SortKey::PriceHigh | SortKey::Trending => {
                CardSortKey::Price(OrderedFloat(card.effective_price()))
            }
            SortKey::RarityAsc | SortKey::RarityDesc => {
                CardSortKey::Rarity(tiers.rank(&card.rarity))
            }
            SortKey::Number => CardSortKey::Number(parse_leading_number(&card.number)),
            SortKey::PokemonNumber => {
                CardSortKey::Pokedex(card.national_pokedex_number.unwrap_or(0))
            }
            SortKey::Unordered => CardSortKey::Unordered,
        }
    }
}

/// Whether `key` orders from high to low.
pub fn is_descending(key: SortKey) -> bool {
    matches!(
        key,
        SortKey::NameDesc | SortKey::PriceHigh | SortKey::Trending | SortKey::RarityDesc
    )
}

/// Leading integer of a collector number.
///
/// Skips leading whitespace and one `#`, accepts a sign, then reads digits up
/// to the first non-digit (`"#025/198"` is 25, `"TG12"` is 0). Saturates
/// instead of overflowing.
pub fn parse_leading_number(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let unhashed = trimmed.strip_prefix('#').unwrap_or(trimmed);

    let (negative, digits) = match unhashed.as_bytes().first() {
        Some(b'-') => (true, &unhashed[1..]),
        Some(b'+') => (false, &unhashed[1..]),
        _ => (false, unhashed),
    };

    let mut value: i64 = 0;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'));
    }

    if negative { -value } else { value }
}
