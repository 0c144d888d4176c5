use super::SharedCard;
use serde::Serialize;
use std::collections::HashSet;

/// Collection overview shown on the catalog dashboard.
///
/// Price figures only consider records with a positive effective price, so
/// unpriced cards do not drag the average to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogStats {
    pub total_cards: usize,
    pub owned_cards: usize,
    pub distinct_sets: usize,
    pub priced_cards: usize,
    pub average_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_price: Option<f64>,
}

impl CatalogStats {
    pub fn from_cards(cards: &[SharedCard]) -> Self {
        let mut sets = HashSet::new();
        let mut owned_cards = 0;
        let mut priced_cards = 0;
        let mut sum = 0.0;
        let mut max_price: Option<f64> = None;
        let mut min_price: Option<f64> = None;

        for card in cards {
            if card.is_owned() {
                owned_cards += 1;
            }
            let set_key = if card.set.id.is_empty() {
                card.set.name.as_str()
            } else {
                card.set.id.as_str()
            };
            if !set_key.is_empty() {
                sets.insert(set_key);
            }

            let price = card.effective_price();
            if price > 0.0 {
                priced_cards += 1;
                sum += price;
                max_price = Some(max_price.map_or(price, |max| max.max(price)));
                min_price = Some(min_price.map_or(price, |min| min.min(price)));
            }
        }

        Self {
            total_cards: cards.len(),
            owned_cards,
            distinct_sets: sets.len(),
            priced_cards,
            average_price: (priced_cards > 0).then(|| sum / priced_cards as f64),
            max_price,
            min_price,
        }
    }
}
