use super::types::{CatalogQuery, FacetSelection};
use cardex_model::{FacetCategory, ModelError, QuickFilter, SortKey};

/// Fluent API for building catalog queries
#[derive(Debug, Clone, Default)]
pub struct CatalogQueryBuilder {
    query: CatalogQuery,
}

impl CatalogQueryBuilder {
    /// Create a new query builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Free-text search on card and set names
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.query.query = text.into();
        self
    }

    // === Facet methods ===

    /// Enable one option of a category
    pub fn facet(mut self, category: FacetCategory, option: impl AsRef<str>) -> Self {
        self.query.facets.enable(category, option);
        self
    }

    /// Enable several options of a category
    pub fn facets<I, S>(mut self, category: FacetCategory, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for option in options {
            self.query.facets.enable(category, option);
        }
        self
    }

    /// Parse a `category=option[,option...]` spec, as typed on a command line
    pub fn facet_spec(self, spec: &str) -> Result<Self, ModelError> {
        let (category, options) = spec
            .split_once('=')
            .ok_or_else(|| ModelError::UnknownFacetCategory(spec.to_string()))?;
        let category: FacetCategory = category.parse()?;
        Ok(self.facets(category, options.split(',')))
    }

    /// Replace the whole facet selection
    pub fn selection(mut self, selection: FacetSelection) -> Self {
        self.query.facets = selection;
        self
    }

    /// Only cards with `quantity > 0`
    pub fn owned(self) -> Self {
        self.quick(QuickFilter::Owned)
    }

    /// Only cards with `quantity == 0`
    pub fn missing(self) -> Self {
        self.quick(QuickFilter::Missing)
    }

    /// Only cards owned more than once
    pub fn duplicates(self) -> Self {
        self.quick(QuickFilter::Duplicates)
    }

    /// Only wishlisted cards
    pub fn wishlist(self) -> Self {
        self.quick(QuickFilter::Wishlist)
    }

    fn quick(mut self, filter: QuickFilter) -> Self {
        self.query.facets.enable(FacetCategory::QuickFilter, filter.key());
        self
    }

    // === Sort methods ===

    pub fn sort(mut self, key: SortKey) -> Self {
        self.query.sort = key;
        self
    }

    /// Convenience method for "most valuable first"
    pub fn most_valuable(self) -> Self {
        self.sort(SortKey::PriceHigh)
    }

    /// Build the final query
    pub fn build(self) -> CatalogQuery {
        self.query
    }
}
