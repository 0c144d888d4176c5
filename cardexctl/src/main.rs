use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "cardexctl", about = "Query a Cardex catalog export")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search, filter and sort a catalog, printing the visible page
    Search {
        /// JSON catalog export (array or `{ "data": [...] }`)
        catalog: PathBuf,
        /// Free-text query matched against card and set names
        #[arg(short, long, default_value = "")]
        query: String,
        /// Sort key (name-asc, name-desc, price-low, price-high, rarity-asc,
        /// rarity-desc, number, pokemon-number, trending, none)
        #[arg(short, long)]
        sort: Option<String>,
        /// Facet filter as `category=option[,option...]`; repeatable
        #[arg(short, long = "facet", value_name = "CATEGORY=OPTIONS")]
        facets: Vec<String>,
        /// Records shown before any load-more
        #[arg(long)]
        page_size: Option<usize>,
        /// Number of pages to disclose (each extra page is one load-more)
        #[arg(long, default_value_t = 1)]
        pages: usize,
        /// Simulated load-more latency, e.g. `0ms` or `250ms`
        #[arg(long, value_parser = humantime::parse_duration)]
        latency: Option<Duration>,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Print collection statistics
    Stats {
        catalog: PathBuf,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Print per-option match counts for facet categories
    Facets {
        catalog: PathBuf,
        #[arg(short, long, default_value = "")]
        query: String,
        /// Restrict output to these categories; all when omitted
        #[arg(short, long = "category")]
        categories: Vec<String>,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so JSON output stays machine-readable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Search {
            catalog,
            query,
            sort,
            facets,
            page_size,
            pages,
            latency,
            format,
        } => {
            let args = commands::SearchArgs {
                catalog,
                query,
                sort,
                facets,
                page_size,
                pages,
                latency,
                format,
            };
            commands::search(args).await
        }
        Command::Stats { catalog, format } => commands::stats(&catalog, format),
        Command::Facets {
            catalog,
            query,
            categories,
            format,
        } => commands::facets(&catalog, &query, &categories, format),
    }
}
