//! Catalog snapshots.
//!
//! A [`CatalogStore`] owns an immutable, reference-counted snapshot of card
//! records. Every mutation helper returns a new store; snapshots already
//! handed out (including ones held by a running query) never change.

mod stats;

pub use stats::CatalogStats;

use crate::error::Result;
use cardex_model::CardRecord;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// A record shared between the store and every pipeline stage.
pub type SharedCard = Arc<CardRecord>;

/// Immutable catalog snapshot plus a version counter.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    records: Arc<[SharedCard]>,
    version: u64,
}

/// Accepted export layouts: a bare array or an API-style envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Records(Vec<CardRecord>),
    Data { data: Vec<CardRecord> },
    Cards { cards: Vec<CardRecord> },
}

impl CatalogDocument {
    fn into_records(self) -> Vec<CardRecord> {
        match self {
            CatalogDocument::Records(records)
            | CatalogDocument::Data { data: records }
            | CatalogDocument::Cards { cards: records } => records,
        }
    }
}

impl CatalogStore {
    pub fn from_records(records: impl IntoIterator<Item = CardRecord>) -> Self {
        Self::from_shared(records.into_iter().map(Arc::new))
    }

    pub fn from_shared(records: impl IntoIterator<Item = SharedCard>) -> Self {
        let records: Arc<[SharedCard]> = records.into_iter().collect();
        warn_on_invalid_records(&records);
        warn_on_duplicate_ids(&records);
        tracing::debug!(
            target: "cardex::catalog",
            records = records.len(),
            "catalog snapshot created"
        );
        Self {
            records,
            version: 0,
        }
    }

    /// Parse a JSON export. Individual malformed fields degrade to their
    /// defaults; only a document that is not a record list fails.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(raw)?;
        Ok(Self::from_records(document.into_records()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_reader(reader)?;
        Ok(Self::from_records(document.into_records()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let store = Self::from_json_str(&raw)?;
        tracing::info!(
            target: "cardex::catalog",
            path = %path.display(),
            records = store.len(),
            "loaded catalog export"
        );
        Ok(store)
    }

    /// Records in catalog order.
    pub fn records(&self) -> &[SharedCard] {
        &self.records
    }

    /// Cheap handle on the current snapshot.
    pub fn snapshot(&self) -> Arc<[SharedCard]> {
        Arc::clone(&self.records)
    }

    /// Incremented by every mutation helper; lets callers notice a new
    /// snapshot without comparing contents.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&SharedCard> {
        self.records.iter().find(|card| card.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Insert a record, replacing any record with the same id in place.
    pub fn with_record(&self, record: CardRecord) -> Self {
        let record = Arc::new(record);
        let mut replaced = false;
        let mut records: Vec<SharedCard> = self
            .records
            .iter()
            .map(|existing| {
                if existing.id == record.id {
                    replaced = true;
                    Arc::clone(&record)
                } else {
                    Arc::clone(existing)
                }
            })
            .collect();
        if !replaced {
            records.push(record);
        }
        self.next(records)
    }

    pub fn without_record(&self, id: &str) -> Self {
        let records: Vec<SharedCard> = self
            .records
            .iter()
            .filter(|card| card.id.as_str() != id)
            .cloned()
            .collect();
        if records.len() == self.records.len() {
            tracing::debug!(target: "cardex::catalog", id, "no record to remove");
        }
        self.next(records)
    }

    /// Update an ownership count. Unknown ids leave the contents unchanged.
    pub fn with_quantity(&self, id: &str, quantity: u32) -> Self {
        match self.get(id) {
            Some(card) => {
                let mut updated = CardRecord::clone(card);
                updated.quantity = quantity;
                self.with_record(updated)
            }
            None => {
                tracing::debug!(target: "cardex::catalog", id, "no record to update");
                self.next(self.records.to_vec())
            }
        }
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats::from_cards(&self.records)
    }

    /// Distinct non-empty rarities, sorted.
    pub fn rarities(&self) -> Vec<String> {
        distinct_sorted(self.records.iter().map(|card| card.rarity.as_str()))
    }

    /// Distinct energy types, sorted.
    pub fn energy_types(&self) -> Vec<String> {
        distinct_sorted(
            self.records
                .iter()
                .flat_map(|card| card.types.iter().map(String::as_str)),
        )
    }

    fn next(&self, records: Vec<SharedCard>) -> Self {
        Self {
            records: records.into(),
            version: self.version + 1,
        }
    }
}

impl FromIterator<CardRecord> for CatalogStore {
    fn from_iter<I: IntoIterator<Item = CardRecord>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut distinct: Vec<String> = values
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .collect::<HashSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();
    distinct.sort();
    distinct
}

fn warn_on_invalid_records(records: &[SharedCard]) {
    let mut errors = records.iter().filter_map(|card| card.validate().err());
    if let Some(first) = errors.next() {
        tracing::warn!(
            target: "cardex::catalog",
            invalid = 1 + errors.count(),
            first = %first,
            "catalog contains records that cannot be looked up"
        );
    }
}

fn warn_on_duplicate_ids(records: &[SharedCard]) {
    let mut seen = HashSet::with_capacity(records.len());
    let mut duplicates = 0usize;
    for card in records {
        if !seen.insert(card.id.as_str()) {
            duplicates += 1;
        }
    }
    if duplicates > 0 {
        tracing::warn!(
            target: "cardex::catalog",
            duplicates,
            "catalog contains duplicate ids; lookups return the first match"
        );
    }
}
