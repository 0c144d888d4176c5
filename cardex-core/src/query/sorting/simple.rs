use super::keys::{CardSortKey, is_descending};
use super::rarity::RarityTiers;
use super::utils::{is_sorted_by, reorder_by_indices};
use crate::catalog::SharedCard;
use cardex_model::{CardRecord, SortKey};
use std::cmp::Ordering;

/// Compare two cards under `key`, direction included.
pub fn compare_cards(a: &CardRecord, b: &CardRecord, key: SortKey, tiers: &RarityTiers) -> Ordering {
    let ord = CardSortKey::extract(a, key, tiers).cmp(&CardSortKey::extract(b, key, tiers));
    if is_descending(key) { ord.reverse() } else { ord }
}

/// Sort with the default rarity tiers.
pub fn sort_cards(results: &[SharedCard], key: SortKey) -> Vec<SharedCard> {
    sort_cards_with(results, key, &RarityTiers::default())
}

/// Return `results` ordered by `key`. The input is never modified and ties
/// keep their input order.
pub fn sort_cards_with(
    results: &[SharedCard],
    key: SortKey,
    tiers: &RarityTiers,
) -> Vec<SharedCard> {
    if key == SortKey::Unordered || results.len() < 2 {
        return results.to_vec();
    }

    // Extract keys once for efficiency
    let mut keyed: Vec<(usize, CardSortKey)> = results
        .iter()
        .enumerate()
        .map(|(i, card)| (i, CardSortKey::extract(card, key, tiers)))
        .collect();

    let descending = is_descending(key);
    let directed = |a: &CardSortKey, b: &CardSortKey| {
        if descending { b.cmp(a) } else { a.cmp(b) }
    };

    if is_sorted_by(&keyed, |a, b| directed(&a.1, &b.1)) {
        tracing::trace!(target: "cardex::sort", sort = %key, "input already ordered");
        return results.to_vec();
    }

    // `sort_by` is stable, so equal keys keep input order in both directions.
    keyed.sort_by(|a, b| directed(&a.1, &b.1));

    let indices: Vec<usize> = keyed.into_iter().map(|(i, _)| i).collect();
    tracing::debug!(
        target: "cardex::sort",
        sort = %key,
        records = indices.len(),
        "results sorted"
    );
    reorder_by_indices(results, &indices)
}
