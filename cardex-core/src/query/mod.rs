pub mod builder;
pub mod filtering;
pub mod orchestrator;
pub mod pagination;
pub mod prelude;
pub mod search;
pub mod sorting;
pub mod types;
pub mod vocabulary;

pub use builder::CatalogQueryBuilder;
pub use filtering::{FacetFilter, FacetOptionCount, facet_option_counts, filter_cards};
pub use orchestrator::QueryOrchestrator;
pub use pagination::{LoadTicket, PageWindow, PendingLoad, crossed_scroll_threshold};
pub use search::search;
pub use sorting::{RarityTiers, compare_cards, sort_cards, sort_cards_with};
pub use types::*;
