//! Facet filtering.
//!
//! A [`FacetSelection`] is compiled once into a [`FacetFilter`]: every option
//! key is resolved through the [`vocabulary`](super::vocabulary) tables into
//! the raw values it accepts. Categories are ANDed, options within a category
//! are ORed, and each enabled quick filter is its own ANDed predicate.
//!
//! Unknown option keys are dropped during compilation. A category whose
//! options are all unknown therefore contributes no clause and passes every
//! record through.

use super::types::FacetSelection;
use super::vocabulary;
use crate::catalog::SharedCard;
use cardex_model::{CardRecord, FacetCategory, QuickFilter};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Accepted raw values for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Clause {
    category: FacetCategory,
    /// Lower-cased raw values.
    accepted: Vec<String>,
}

impl Clause {
    fn matches(&self, card: &CardRecord) -> bool {
        let accepts = |value: &str| {
            let value = value.trim();
            self.accepted.iter().any(|raw| eq_folded(value, raw))
        };

        match self.category {
            FacetCategory::Language => accepts(card.language.as_str()),
            FacetCategory::Condition => accepts(card.condition.as_str()),
            FacetCategory::ProductType => accepts(card.product_type.as_str()),
            FacetCategory::EnergyType => card.types.iter().any(|t| accepts(t.as_str())),
            FacetCategory::CardType => accepts(card.supertype.as_str()),
            FacetCategory::Rarity => accepts(card.rarity.as_str()),
            FacetCategory::Variant => card.variants.iter().any(|v| accepts(v.as_str())),
            FacetCategory::Regulation => card.regulation.as_deref().is_some_and(accepts),
            FacetCategory::Format => card.format.as_deref().is_some_and(accepts),
            // Quick filters never compile into a clause.
            FacetCategory::QuickFilter => true,
        }
    }
}

/// `folded` must already be lower-case.
fn eq_folded(value: &str, folded: &str) -> bool {
    value.chars().flat_map(char::to_lowercase).eq(folded.chars())
}

pub fn quick_filter_matches(filter: QuickFilter, card: &CardRecord) -> bool {
    match filter {
        QuickFilter::Owned => card.quantity > 0,
        QuickFilter::Missing => card.quantity == 0,
        QuickFilter::Duplicates => card.quantity > 1,
        QuickFilter::Wishlist => card.wishlist,
    }
}

/// A compiled facet selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetFilter {
    clauses: Vec<Clause>,
    quick: BTreeSet<QuickFilter>,
}

impl FacetFilter {
    pub fn compile(selection: &FacetSelection) -> Self {
        let mut filter = FacetFilter::default();

        for category in selection.active_categories() {
            if category == FacetCategory::QuickFilter {
                for key in selection.options(category) {
                    match key.parse::<QuickFilter>() {
                        Ok(quick) => {
                            filter.quick.insert(quick);
                        }
                        Err(_) => tracing::debug!(
                            target: "cardex::facets",
                            option = key,
                            "ignoring unknown quick filter"
                        ),
                    }
                }
                continue;
            }

            let mut accepted: Vec<String> = Vec::new();
            for key in selection.options(category) {
                match vocabulary::resolve(category, key) {
                    Some(values) => {
                        for value in values {
                            let value = value.to_lowercase();
                            if !accepted.contains(&value) {
                                accepted.push(value);
                            }
                        }
                    }
                    None => tracing::debug!(
                        target: "cardex::facets",
                        category = %category,
                        option = key,
                        "ignoring unknown facet option"
                    ),
                }
            }

            if accepted.is_empty() {
                tracing::debug!(
                    target: "cardex::facets",
                    category = %category,
                    "no known options enabled; category passes through"
                );
            } else {
                filter.clauses.push(Clause { category, accepted });
            }
        }

        filter
    }

    /// True when the filter keeps every record.
    pub fn is_pass_through(&self) -> bool {
        self.clauses.is_empty() && self.quick.is_empty()
    }

    pub fn matches(&self, card: &CardRecord) -> bool {
        self.quick
            .iter()
            .all(|quick| quick_filter_matches(*quick, card))
            && self.clauses.iter().all(|clause| clause.matches(card))
    }

    /// Keep matching records, in input order.
    pub fn apply(&self, results: &[SharedCard]) -> Vec<SharedCard> {
        if self.is_pass_through() {
            return results.to_vec();
        }
        results
            .iter()
            .filter(|card| self.matches(card))
            .map(Arc::clone)
            .collect()
    }

    /// Like [`FacetFilter::apply`] but evaluated on the rayon pool. Output
    /// order still follows input order.
    pub fn apply_parallel(&self, results: &[SharedCard]) -> Vec<SharedCard> {
        if self.is_pass_through() {
            return results.to_vec();
        }
        results
            .par_iter()
            .filter(|card| self.matches(card))
            .map(Arc::clone)
            .collect()
    }
}

/// Narrow `results` by `selection`.
pub fn filter_cards(results: &[SharedCard], selection: &FacetSelection) -> Vec<SharedCard> {
    filter_cards_with_threshold(results, selection, usize::MAX)
}

/// Narrow `results`, switching to the parallel path once the input holds
/// more than `parallel_threshold` records.
pub fn filter_cards_with_threshold(
    results: &[SharedCard],
    selection: &FacetSelection,
    parallel_threshold: usize,
) -> Vec<SharedCard> {
    let filter = FacetFilter::compile(selection);
    let parallel = results.len() > parallel_threshold;
    let filtered = if parallel {
        filter.apply_parallel(results)
    } else {
        filter.apply(results)
    };

    tracing::debug!(
        target: "cardex::facets",
        input = results.len(),
        kept = filtered.len(),
        parallel,
        active_categories = selection.active_categories().count(),
        "facets applied"
    );
    filtered
}

/// How many records one option of a category would match on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOptionCount {
    pub option: String,
    pub count: usize,
}

/// Per-option match counts over `results`, in table order.
///
/// Regulation has no fixed table, so its options are the marks present in
/// `results`, alphabetically.
pub fn facet_option_counts(
    results: &[SharedCard],
    category: FacetCategory,
) -> Vec<FacetOptionCount> {
    let keys: Vec<String> = if category == FacetCategory::Regulation {
        results
            .iter()
            .filter_map(|card| card.regulation.as_deref())
            .map(str::trim)
            .filter(|mark| mark.len() == 1)
            .map(str::to_lowercase)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    } else {
        vocabulary::options_for(category)
            .iter()
            .map(|option| option.key.to_string())
            .collect()
    };

    keys.into_iter()
        .map(|option| {
            let filter = FacetFilter::compile(&FacetSelection::new().with(category, &option));
            let count = results.iter().filter(|card| filter.matches(card)).count();
            FacetOptionCount { option, count }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards() -> Vec<SharedCard> {
        let mut pikachu = CardRecord::new("1", "Pikachu")
            .with_types(["Lightning"])
            .with_language("en")
            .with_rarity("Common");
        pikachu.condition = "Near Mint".into();
        pikachu.supertype = "Pokémon".into();
        pikachu.variants = vec!["Normal".into(), "Reverse Holo".into()];
        pikachu.regulation = Some("G".into());

        let mut charizard = CardRecord::new("2", "Charizard")
            .with_types(["Fire"])
            .with_language("ja")
            .with_rarity("Rare Holo")
            .with_quantity(2);
        charizard.condition = "Lightly Played".into();
        charizard.supertype = "Pokémon".into();
        charizard.variants = vec!["Holo".into()];
        charizard.format = Some("Unlimited".into());

        let mut nest_ball = CardRecord::new("3", "Nest Ball")
            .with_language("en")
            .with_rarity("Uncommon")
            .with_quantity(1)
            .with_wishlist(true);
        nest_ball.supertype = "Trainer".into();
        nest_ball.regulation = Some("F".into());
        nest_ball.format = Some("Standard".into());

        vec![pikachu, charizard, nest_ball]
            .into_iter()
            .map(Arc::new)
            .collect()
    }

    fn ids(cards: &[SharedCard]) -> Vec<&str> {
        cards.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn empty_selection_passes_everything() {
        let cards = cards();
        assert_eq!(ids(&filter_cards(&cards, &FacetSelection::new())), vec!["1", "2", "3"]);
    }

    #[test]
    fn options_within_category_are_ored() {
        let cards = cards();
        let selection = FacetSelection::new()
            .with(FacetCategory::EnergyType, "electric")
            .with(FacetCategory::EnergyType, "fire");
        assert_eq!(ids(&filter_cards(&cards, &selection)), vec!["1", "2"]);
    }

    #[test]
    fn categories_are_anded() {
        let cards = cards();
        let selection = FacetSelection::new()
            .with(FacetCategory::Language, "english")
            .with(FacetCategory::CardType, "pokemon");
        assert_eq!(ids(&filter_cards(&cards, &selection)), vec!["1"]);
    }

    #[test]
    fn quick_filters_are_anded() {
        let cards = cards();
        let owned = FacetSelection::new().with_quick(QuickFilter::Owned);
        assert_eq!(ids(&filter_cards(&cards, &owned)), vec!["2", "3"]);

        let owned_wishlisted = owned.with_quick(QuickFilter::Wishlist);
        assert_eq!(ids(&filter_cards(&cards, &owned_wishlisted)), vec!["3"]);

        let contradictory = FacetSelection::new()
            .with_quick(QuickFilter::Owned)
            .with_quick(QuickFilter::Missing);
        assert!(filter_cards(&cards, &contradictory).is_empty());
    }

    #[test]
    fn unknown_options_are_ignored() {
        let cards = cards();
        let only_unknown = FacetSelection::new().with(FacetCategory::Rarity, "mythic");
        assert_eq!(filter_cards(&cards, &only_unknown).len(), 3);

        let mixed = FacetSelection::new()
            .with(FacetCategory::Rarity, "mythic")
            .with(FacetCategory::Rarity, "rare");
        assert_eq!(ids(&filter_cards(&cards, &mixed)), vec!["2"]);

        let unknown_quick = FacetSelection::new().with(FacetCategory::QuickFilter, "favourites");
        assert_eq!(filter_cards(&cards, &unknown_quick).len(), 3);
    }

    #[test]
    fn list_fields_match_any_entry() {
        let cards = cards();
        let selection = FacetSelection::new().with(FacetCategory::Variant, "reverseHolo");
        assert_eq!(ids(&filter_cards(&cards, &selection)), vec!["1"]);
    }

    #[test]
    fn optional_fields_never_match_when_absent() {
        let cards = cards();
        let regulation = FacetSelection::new().with(FacetCategory::Regulation, "g");
        assert_eq!(ids(&filter_cards(&cards, &regulation)), vec!["1"]);

        let format = FacetSelection::new().with(FacetCategory::Format, "standard");
        assert_eq!(ids(&filter_cards(&cards, &format)), vec!["3"]);
    }

    #[test]
    fn record_values_compare_case_insensitively() {
        let cards: Vec<SharedCard> = vec![Arc::new(
            CardRecord::new("x", "Odd casing").with_types(["LIGHTNING"]),
        )];
        let selection = FacetSelection::new().with(FacetCategory::EnergyType, "electric");
        assert_eq!(filter_cards(&cards, &selection).len(), 1);
    }

    #[test]
    fn parallel_path_preserves_order() {
        let cards: Vec<SharedCard> = (0..500)
            .map(|i| {
                Arc::new(
                    CardRecord::new(format!("c{i}"), format!("Card {i}"))
                        .with_quantity(i % 3),
                )
            })
            .collect();
        let selection = FacetSelection::new().with_quick(QuickFilter::Owned);

        let sequential = filter_cards(&cards, &selection);
        let parallel = filter_cards_with_threshold(&cards, &selection, 10);
        assert_eq!(ids(&sequential), ids(&parallel));
    }

    #[test]
    fn option_counts_follow_table_order() {
        let cards = cards();
        let counts = facet_option_counts(&cards, FacetCategory::CardType);
        assert_eq!(
            counts,
            vec![
                FacetOptionCount { option: "pokemon".into(), count: 2 },
                FacetOptionCount { option: "trainer".into(), count: 1 },
                FacetOptionCount { option: "energy".into(), count: 0 },
            ]
        );

        let quick = facet_option_counts(&cards, FacetCategory::QuickFilter);
        let owned = quick.iter().find(|c| c.option == "owned").map(|c| c.count);
        assert_eq!(owned, Some(2));
    }

    #[test]
    fn regulation_counts_use_present_marks() {
        let counts = facet_option_counts(&cards(), FacetCategory::Regulation);
        let options: Vec<_> = counts.iter().map(|c| (c.option.as_str(), c.count)).collect();
        assert_eq!(options, vec![("f", 1), ("g", 1)]);
    }
}
