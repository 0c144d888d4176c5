use anyhow::Result;
use cardex_core::{
    catalog::{CatalogStats, CatalogStore},
    query::{FacetOptionCount, PageStatus, QueryOrchestrator},
};
use cardex_model::{CardRecord, FacetCategory};
use serde::Serialize;

use crate::OutputFormat;

#[derive(Serialize)]
struct SearchReport<'a> {
    query: &'a str,
    sort: String,
    status: PageStatus,
    cards: Vec<&'a CardRecord>,
}

#[derive(Serialize)]
struct StatsReport<'a> {
    #[serde(flatten)]
    stats: &'a CatalogStats,
    rarities: Vec<String>,
    energy_types: Vec<String>,
}

#[derive(Serialize)]
struct CategoryCounts<'a> {
    category: FacetCategory,
    options: &'a [FacetOptionCount],
}

pub fn print_search(engine: &QueryOrchestrator, format: OutputFormat) -> Result<()> {
    let status = engine.page_status();
    match format {
        OutputFormat::Json => {
            let report = SearchReport {
                query: engine.raw_query(),
                sort: engine.sort_key().to_string(),
                status,
                cards: engine.visible_results().iter().map(|c| &**c).collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            for (index, card) in engine.visible_results().iter().enumerate() {
                println!("{:>4}. {}", index + 1, card_line(card));
            }
            println!(
                "Showing {} of {} (sort: {}{})",
                status.visible,
                status.total,
                engine.sort_key(),
                if status.exhausted { ", end of results" } else { "" }
            );
        }
    }
    Ok(())
}

fn card_line(card: &CardRecord) -> String {
    let mut line = card.name.clone();
    if !card.set.name.is_empty() {
        line.push_str(&format!(" [{}]", card.set.name));
    }
    if !card.number.is_empty() {
        line.push_str(&format!(" #{}", card.number));
    }
    if !card.rarity.is_empty() {
        line.push_str(&format!(" {}", card.rarity));
    }
    line.push_str(&format!(" ${:.2}", card.effective_price()));
    if card.quantity > 0 {
        line.push_str(&format!(" x{}", card.quantity));
    }
    line
}

pub fn print_stats(store: &CatalogStore, format: OutputFormat) -> Result<()> {
    let stats = store.stats();
    let rarities = store.rarities();
    let energy_types = store.energy_types();

    match format {
        OutputFormat::Json => {
            let report = StatsReport {
                stats: &stats,
                rarities,
                energy_types,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            let money = |value: Option<f64>| {
                value.map_or_else(|| "n/a".to_string(), |v| format!("${v:.2}"))
            };
            println!("Total cards:   {}", stats.total_cards);
            println!("Owned cards:   {}", stats.owned_cards);
            println!("Sets:          {}", stats.distinct_sets);
            println!("Priced cards:  {}", stats.priced_cards);
            println!("Average price: {}", money(stats.average_price));
            println!("Highest price: {}", money(stats.max_price));
            println!("Lowest price:  {}", money(stats.min_price));
            println!("Rarities:      {}", rarities.join(", "));
            println!("Energy types:  {}", energy_types.join(", "));
        }
    }
    Ok(())
}

pub fn print_facets(
    counts: &[(FacetCategory, Vec<FacetOptionCount>)],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let report: Vec<CategoryCounts<'_>> = counts
                .iter()
                .map(|(category, options)| CategoryCounts {
                    category: *category,
                    options,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            for (category, options) in counts {
                println!("{category}:");
                for option in options {
                    println!("  {:<26}{:>6}", option.option, option.count);
                }
            }
        }
    }
    Ok(())
}
