use crate::error::{CatalogError, Result};
use crate::query::types::FacetSelection;
use cardex_model::SortKey;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_WINDOW: usize = 12;
pub const DEFAULT_PAGE_INCREMENT: usize = 12;
pub const DEFAULT_LOAD_MORE_LATENCY: Duration = Duration::from_millis(300);
pub const DEFAULT_SCROLL_THRESHOLD: f32 = 0.8;
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 10_000;

/// Tunables for the catalog query engine.
///
/// The same value seeds the orchestrator at construction and is what
/// `clear()` restores the facet and sort state to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Records visible right after a new search.
    pub initial_window: usize,
    /// Records revealed by each load-more.
    pub page_increment: usize,
    /// Simulated fetch cost of a load-more.
    #[serde(with = "humantime_serde_compat")]
    pub load_more_latency: Duration,
    /// Fraction of scrollable height that triggers a load-more.
    pub scroll_threshold: f32,
    /// Above this many records the facet filter runs in parallel.
    pub parallel_threshold: usize,
    pub default_sort: SortKey,
    pub default_facets: FacetSelection,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_window: DEFAULT_WINDOW,
            page_increment: DEFAULT_PAGE_INCREMENT,
            load_more_latency: DEFAULT_LOAD_MORE_LATENCY,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            default_sort: SortKey::NameAsc,
            default_facets: FacetSelection::default(),
        }
    }
}

impl EngineConfig {
    /// Load options from a JSON encoded environment variable. Falls back to
    /// per-field environment overrides and finally defaults.
    pub fn from_env() -> Self {
        if let Ok(raw) = std::env::var("CARDEX_ENGINE_OPTIONS") {
            match serde_json::from_str::<EngineConfig>(&raw) {
                Ok(parsed) => return parsed,
                Err(err) => tracing::warn!(
                    target: "cardex::config",
                    error = %err,
                    "ignoring malformed CARDEX_ENGINE_OPTIONS"
                ),
            }
        }

        let mut opts = EngineConfig::default();

        if let Some(window) = env_parse::<usize>("CARDEX_INITIAL_WINDOW") {
            opts.initial_window = window;
        }

        if let Some(increment) = env_parse::<usize>("CARDEX_PAGE_INCREMENT") {
            opts.page_increment = increment;
        }

        if let Ok(latency) = std::env::var("CARDEX_LOAD_MORE_LATENCY") {
            match humantime::parse_duration(latency.trim()) {
                Ok(parsed) => opts.load_more_latency = parsed,
                Err(err) => tracing::warn!(
                    target: "cardex::config",
                    value = %latency,
                    error = %err,
                    "ignoring unparsable CARDEX_LOAD_MORE_LATENCY"
                ),
            }
        }

        if let Some(threshold) = env_parse::<f32>("CARDEX_SCROLL_THRESHOLD") {
            if !threshold.is_finite() {
                tracing::warn!(
                    target: "cardex::config",
                    value = %threshold,
                    "ignoring non-finite CARDEX_SCROLL_THRESHOLD"
                );
            }
            opts.scroll_threshold = sanitize_scroll_threshold(threshold);
        }

        if let Some(threshold) = env_parse::<usize>("CARDEX_PARALLEL_THRESHOLD") {
            opts.parallel_threshold = threshold;
        }

        if let Ok(sort) = std::env::var("CARDEX_DEFAULT_SORT") {
            match sort.parse::<SortKey>() {
                Ok(key) => opts.default_sort = key,
                Err(err) => tracing::warn!(
                    target: "cardex::config",
                    error = %err,
                    "ignoring CARDEX_DEFAULT_SORT"
                ),
            }
        }

        opts
    }

    pub fn validate(&self) -> Result<()> {
        if self.initial_window == 0 {
            return Err(CatalogError::Config(
                "initial_window must be at least 1".into(),
            ));
        }
        if self.page_increment == 0 {
            return Err(CatalogError::Config(
                "page_increment must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.scroll_threshold) {
            return Err(CatalogError::Config(format!(
                "scroll_threshold {} is outside 0..=1",
                self.scroll_threshold
            )));
        }
        Ok(())
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.load_more_latency = latency;
        self
    }

    pub fn with_default_sort(mut self, sort: SortKey) -> Self {
        self.default_sort = sort;
        self
    }

    pub fn with_default_facets(mut self, facets: FacetSelection) -> Self {
        self.default_facets = facets;
        self
    }
}

/// Clamp a scroll threshold into `0..=1`. NaN and infinities fall back to
/// [`DEFAULT_SCROLL_THRESHOLD`].
pub fn sanitize_scroll_threshold(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        DEFAULT_SCROLL_THRESHOLD
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(
                target: "cardex::config",
                variable = name,
                value = %raw,
                "ignoring unparsable override"
            );
            None
        }
    }
}

/// Durations are written the human way (`"300ms"`, `"1s"`).
mod humantime_serde_compat {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(
        value: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&humantime::format_duration(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        humantime::parse_duration(raw.trim()).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardex_model::FacetCategory;

    #[test]
    fn defaults_match_browser_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.initial_window, 12);
        assert_eq!(config.page_increment, 12);
        assert_eq!(config.scroll_threshold, 0.8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_finite_scroll_threshold_falls_back_to_default() {
        assert_eq!(sanitize_scroll_threshold(f32::NAN), DEFAULT_SCROLL_THRESHOLD);
        assert_eq!(sanitize_scroll_threshold(f32::INFINITY), DEFAULT_SCROLL_THRESHOLD);
        assert_eq!(sanitize_scroll_threshold(1.5), 1.0);
        assert_eq!(sanitize_scroll_threshold(-0.2), 0.0);
        assert_eq!(sanitize_scroll_threshold(0.5), 0.5);

        let parsed = "NaN".parse::<f32>().map(sanitize_scroll_threshold);
        assert_eq!(parsed.ok(), Some(DEFAULT_SCROLL_THRESHOLD));

        let config = EngineConfig {
            scroll_threshold: f32::NAN,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(CatalogError::Config(_))));
    }

    #[test]
    fn zero_window_is_rejected() {
        let config = EngineConfig {
            initial_window: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(CatalogError::Config(_))));
    }

    #[test]
    fn json_document_round_trips() {
        let config = EngineConfig::default()
            .with_latency(Duration::from_millis(250))
            .with_default_sort(SortKey::PriceHigh)
            .with_default_facets(
                FacetSelection::default().with(FacetCategory::Language, "english"),
            );

        let encoded = serde_json::to_string(&config).unwrap();
        assert!(encoded.contains("\"250ms\""));
        let decoded: EngineConfig = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let decoded: EngineConfig =
            serde_json::from_str(r#"{ "initial_window": 24 }"#).unwrap();
        assert_eq!(decoded.initial_window, 24);
        assert_eq!(decoded.page_increment, DEFAULT_PAGE_INCREMENT);
        assert_eq!(decoded.load_more_latency, DEFAULT_LOAD_MORE_LATENCY);
    }
}
