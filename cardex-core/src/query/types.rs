use cardex_model::{FacetCategory, QuickFilter, SortKey};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Active facet toggles, one option set per category.
///
/// A category that is absent (or whose set is empty) places no restriction on
/// the results. Option keys are stored trimmed and lower-cased so toggling is
/// insensitive to the casing a front end happens to use. Empty sets are never
/// stored, which keeps two selections with the same effect `==`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacetSelection {
    categories: BTreeMap<FacetCategory, BTreeSet<String>>,
}

impl FacetSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FacetSelection::enable`].
    pub fn with(mut self, category: FacetCategory, option: impl AsRef<str>) -> Self {
        self.enable(category, option);
        self
    }

    /// Builder form for quick filters.
    pub fn with_quick(self, filter: QuickFilter) -> Self {
        self.with(FacetCategory::QuickFilter, filter.key())
    }

    pub fn enable(&mut self, category: FacetCategory, option: impl AsRef<str>) {
        let Some(option) = normalize_option(option.as_ref()) else {
            return;
        };
        self.categories.entry(category).or_default().insert(option);
    }

    pub fn disable(&mut self, category: FacetCategory, option: impl AsRef<str>) {
        let Some(option) = normalize_option(option.as_ref()) else {
            return;
        };
        if let Some(options) = self.categories.get_mut(&category) {
            options.remove(&option);
            if options.is_empty() {
                self.categories.remove(&category);
            }
        }
    }

    /// Flip one option; returns whether it is enabled afterwards.
    pub fn toggle(&mut self, category: FacetCategory, option: impl AsRef<str>) -> bool {
        let option = option.as_ref();
        if self.is_enabled(category, option) {
            self.disable(category, option);
            false
        } else {
            self.enable(category, option);
            self.is_enabled(category, option)
        }
    }

    /// Value-returning toggle for callers that keep selections immutable.
    pub fn toggled(&self, category: FacetCategory, option: impl AsRef<str>) -> Self {
        let mut next = self.clone();
        next.toggle(category, option);
        next
    }

    /// Replace a whole category.
    pub fn set<I, S>(&mut self, category: FacetCategory, options: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let options: BTreeSet<String> = options
            .into_iter()
            .filter_map(|option| normalize_option(option.as_ref()))
            .collect();
        if options.is_empty() {
            self.categories.remove(&category);
        } else {
            self.categories.insert(category, options);
        }
    }

    pub fn clear_category(&mut self, category: FacetCategory) {
        self.categories.remove(&category);
    }

    pub fn is_enabled(&self, category: FacetCategory, option: &str) -> bool {
        match normalize_option(option) {
            Some(option) => self
                .categories
                .get(&category)
                .is_some_and(|options| options.contains(&option)),
            None => false,
        }
    }

    /// Enabled options of a category, in key order.
    pub fn options(&self, category: FacetCategory) -> impl Iterator<Item = &str> {
        self.categories
            .get(&category)
            .into_iter()
            .flat_map(|options| options.iter().map(String::as_str))
    }

    pub fn is_active(&self, category: FacetCategory) -> bool {
        self.categories.contains_key(&category)
    }

    /// Categories with at least one enabled option.
    pub fn active_categories(&self) -> impl Iterator<Item = FacetCategory> + '_ {
        self.categories.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of enabled options across categories.
    pub fn enabled_count(&self) -> usize {
        self.categories.values().map(BTreeSet::len).sum()
    }
}

fn normalize_option(option: &str) -> Option<String> {
    let trimmed = option.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// One complete request from a front end: query text, facets and order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogQuery {
    pub query: String,
    pub facets: FacetSelection,
    pub sort: SortKey,
}

/// Progress of incremental disclosure, as shown by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageStatus {
    /// Records currently disclosed.
    pub visible: usize,
    /// Records in the sorted result.
    pub total: usize,
    pub loading_more: bool,
    /// No further load-more will reveal anything.
    pub exhausted: bool,
}

/// Whether the engine is showing query results or idling in browse mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    /// No search has run since construction or the last `clear()`.
    #[default]
    Browse,
    Results,
}
