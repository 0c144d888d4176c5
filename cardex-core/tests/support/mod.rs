//! Shared fixtures for core integration tests.
#![allow(dead_code)]

use cardex_core::catalog::{CatalogStore, SharedCard};
use cardex_core::config::EngineConfig;
use cardex_core::query::QueryOrchestrator;
use cardex_model::{CardRecord, SetInfo};
use std::time::Duration;

/// Load-more latency used by async tests.
pub const TEST_LATENCY: Duration = Duration::from_millis(5);

pub fn config() -> EngineConfig {
    EngineConfig::default().with_latency(TEST_LATENCY)
}

pub fn engine(records: Vec<CardRecord>) -> QueryOrchestrator {
    QueryOrchestrator::new(CatalogStore::from_records(records), config())
}

/// `count` plain records named `Card 00`, `Card 01`, ...
pub fn numbered(count: usize) -> Vec<CardRecord> {
    (0..count)
        .map(|i| CardRecord::new(format!("card-{i}"), format!("Card {i:02}")))
        .collect()
}

/// The three-record catalog used by the price scenarios.
pub fn starters() -> Vec<CardRecord> {
    vec![
        CardRecord::new("sv3-125", "Charizard ex")
            .with_set(SetInfo::named("Obsidian Flames"))
            .with_price(1500.0),
        CardRecord::new("base2-2", "Blastoise")
            .with_set(SetInfo::named("Base Set 2"))
            .with_price(30.0),
        CardRecord::new("sv1-63", "Pikachu")
            .with_set(SetInfo::named("Scarlet & Violet"))
            .with_price(0.45),
    ]
}

/// A mixed catalog exercising every facet category.
pub fn collection() -> Vec<CardRecord> {
    let mut pikachu = CardRecord::new("sv1-63", "Pikachu")
        .with_set(SetInfo::named("Scarlet & Violet"))
        .with_rarity("Common")
        .with_types(["Lightning"])
        .with_language("en")
        .with_quantity(0)
        .with_price(0.45);
    pikachu.supertype = "Pokémon".into();
    pikachu.condition = "Near Mint".into();
    pikachu.variants = vec!["Normal".into(), "Reverse Holo".into()];
    pikachu.regulation = Some("G".into());
    pikachu.format = Some("Standard".into());

    let mut charizard = CardRecord::new("sv3-125", "Charizard ex")
        .with_set(SetInfo::named("Obsidian Flames"))
        .with_rarity("Double Rare")
        .with_types(["Darkness"])
        .with_language("en")
        .with_quantity(2)
        .with_price(1500.0);
    charizard.supertype = "Pokémon".into();
    charizard.condition = "Lightly Played".into();
    charizard.variants = vec!["Holo".into()];
    charizard.regulation = Some("G".into());
    charizard.format = Some("Standard".into());

    let mut raichu = CardRecord::new("jp-26", "Raichu")
        .with_set(SetInfo::named("Base Expansion Pack"))
        .with_rarity("Rare Holo")
        .with_types(["Lightning"])
        .with_language("ja")
        .with_quantity(1)
        .with_wishlist(true)
        .with_price(80.0);
    raichu.supertype = "Pokémon".into();
    raichu.condition = "Near Mint".into();
    raichu.variants = vec!["Holo".into()];
    raichu.format = Some("Unlimited".into());

    let mut nest_ball = CardRecord::new("sv1-181", "Nest Ball")
        .with_set(SetInfo::named("Scarlet & Violet"))
        .with_rarity("Uncommon")
        .with_language("en")
        .with_quantity(4)
        .with_price(0.2);
    nest_ball.supertype = "Trainer".into();
    nest_ball.condition = "Near Mint".into();
    nest_ball.variants = vec!["Normal".into()];
    nest_ball.regulation = Some("G".into());
    nest_ball.format = Some("Standard".into());

    let mut booster = CardRecord::new("sv3-bb", "Obsidian Flames Booster Box")
        .with_set(SetInfo::named("Obsidian Flames"))
        .with_language("en")
        .with_wishlist(true)
        .with_price(140.0);
    booster.product_type = "sealed".into();

    vec![pikachu, charizard, raichu, nest_ball, booster]
}

pub fn names(cards: &[SharedCard]) -> Vec<&str> {
    cards.iter().map(|c| c.name.as_str()).collect()
}

pub fn ids(cards: &[SharedCard]) -> Vec<&str> {
    cards.iter().map(|c| c.id.as_str()).collect()
}
