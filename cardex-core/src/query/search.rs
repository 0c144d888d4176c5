//! Free-text search over card and set names.

use crate::catalog::SharedCard;
use cardex_model::CardRecord;
use std::sync::Arc;

/// Records whose name or set name contains `query`, ignoring case.
///
/// A blank query matches the whole catalog. Results keep catalog order; there
/// is no relevance ranking.
pub fn search(catalog: &[SharedCard], query: &str) -> Vec<SharedCard> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return catalog.to_vec();
    }

    let results: Vec<SharedCard> = catalog
        .iter()
        .filter(|card| matches_query(card, &needle))
        .map(Arc::clone)
        .collect();

    tracing::debug!(
        target: "cardex::search",
        query = %needle,
        candidates = catalog.len(),
        matched = results.len(),
        "search complete"
    );
    results
}

/// `needle` must already be trimmed and lower-cased.
fn matches_query(card: &CardRecord, needle: &str) -> bool {
    contains_folded(&card.name, needle) || contains_folded(&card.set.name, needle)
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    !haystack.is_empty() && haystack.to_lowercase().contains(needle)
}
