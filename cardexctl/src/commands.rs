use std::{path::Path, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use cardex_core::{
    catalog::CatalogStore,
    config::EngineConfig,
    query::{CatalogQueryBuilder, QueryOrchestrator},
};
use cardex_model::{FacetCategory, SortKey};

use crate::{OutputFormat, output};

#[derive(Debug)]
pub struct SearchArgs {
    pub catalog: PathBuf,
    pub query: String,
    pub sort: Option<String>,
    pub facets: Vec<String>,
    pub page_size: Option<usize>,
    pub pages: usize,
    pub latency: Option<Duration>,
    pub format: OutputFormat,
}

fn load_store(path: &Path) -> Result<CatalogStore> {
    CatalogStore::from_path(path)
        .with_context(|| format!("failed to load catalog from {}", path.display()))
}

pub async fn search(args: SearchArgs) -> Result<()> {
    let store = load_store(&args.catalog)?;

    let mut config = EngineConfig::from_env();
    if let Some(size) = args.page_size {
        config.initial_window = size;
        config.page_increment = size;
    }
    if let Some(latency) = args.latency {
        config.load_more_latency = latency;
    }

    let sort = match args.sort.as_deref() {
        Some(raw) => raw
            .parse::<SortKey>()
            .with_context(|| format!("invalid --sort value {raw:?}"))?,
        None => config.default_sort,
    };

    let mut builder = CatalogQueryBuilder::new()
        .search(args.query)
        .selection(config.default_facets.clone())
        .sort(sort);
    for spec in &args.facets {
        builder = builder
            .facet_spec(spec)
            .with_context(|| format!("invalid --facet value {spec:?}"))?;
    }
    let query = builder.build();

    let mut engine = QueryOrchestrator::try_new(store, config)?;
    engine.run_query(&query);

    for page in 1..args.pages.max(1) {
        if !engine.load_more().await {
            tracing::debug!(page, "no further pages to disclose");
            break;
        }
    }

    output::print_search(&engine, args.format)?;
    engine.teardown();
    Ok(())
}

pub fn stats(catalog: &Path, format: OutputFormat) -> Result<()> {
    let store = load_store(catalog)?;
    output::print_stats(&store, format)
}

pub fn facets(
    catalog: &Path,
    query: &str,
    categories: &[String],
    format: OutputFormat,
) -> Result<()> {
    let store = load_store(catalog)?;

    let categories: Vec<FacetCategory> = if categories.is_empty() {
        FacetCategory::all().to_vec()
    } else {
        categories
            .iter()
            .map(|raw| {
                raw.parse::<FacetCategory>()
                    .with_context(|| format!("invalid --category value {raw:?}"))
            })
            .collect::<Result<_>>()?
    };

    let mut engine = QueryOrchestrator::new(store, EngineConfig::from_env());
    engine.run_search(query);

    let counts: Vec<_> = categories
        .into_iter()
        .map(|category| (category, engine.facet_counts(category)))
        .collect();
    output::print_facets(&counts, format)
}
