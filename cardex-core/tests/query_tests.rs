mod support;

use cardex_core::catalog::CatalogStore;
use cardex_core::query::{
    CatalogQueryBuilder, FacetSelection, QueryMode, QueryOrchestrator, filter_cards, search,
    sort_cards,
};
use cardex_model::{CardRecord, FacetCategory, QuickFilter, SortKey};
use std::sync::Arc;
use support::{collection, config, engine, ids, names, starters};

#[test]
fn search_then_price_sort_scenario() {
    let store = CatalogStore::from_records(starters());

    let matched = search(store.records(), "char");
    assert_eq!(names(&matched), vec!["Charizard ex"]);

    let sorted = sort_cards(store.records(), SortKey::PriceHigh);
    assert_eq!(names(&sorted), vec!["Charizard ex", "Blastoise", "Pikachu"]);
}

#[test]
fn owned_quick_filter_keeps_original_order() {
    let store = CatalogStore::from_records(vec![
        CardRecord::new("none", "Zubat").with_quantity(0),
        CardRecord::new("one", "Abra").with_quantity(1),
        CardRecord::new("two", "Mew").with_quantity(2),
    ]);
    let owned = FacetSelection::new().with_quick(QuickFilter::Owned);

    assert_eq!(ids(&filter_cards(store.records(), &owned)), vec!["one", "two"]);

    let mut engine = QueryOrchestrator::new(store, config().with_default_sort(SortKey::Unordered));
    engine.run_search("");
    engine.apply_facets(owned);
    assert_eq!(ids(engine.visible_results()), vec!["one", "two"]);
}

#[test]
fn clear_restores_construction_state() {
    let defaults = FacetSelection::new().with(FacetCategory::Language, "english");
    let build = || {
        QueryOrchestrator::new(
            CatalogStore::from_records(collection()),
            config()
                .with_default_facets(defaults.clone())
                .with_default_sort(SortKey::PriceHigh),
        )
    };

    let fresh = build();
    let mut engine = build();

    engine.run_search("pikachu");
    engine.toggle_facet(FacetCategory::Rarity, "common");
    engine.toggle_facet(FacetCategory::QuickFilter, "missing");
    engine.apply_facets(engine.selection().toggled(FacetCategory::Language, "english"));
    engine.set_sort_key(SortKey::NameDesc);
    engine.clear();

    assert_eq!(engine.selection(), fresh.selection());
    assert_eq!(engine.selection(), &defaults);
    assert_eq!(engine.sort_key(), fresh.sort_key());
    assert_eq!(engine.raw_query(), "");
    assert_eq!(engine.mode(), QueryMode::Browse);
    assert!(engine.visible_results().is_empty());
    assert_eq!(engine.page_status(), fresh.page_status());
}

#[test]
fn facets_reuse_the_cached_baseline() {
    let mut engine = engine(collection());
    engine.run_search("");
    let baseline = engine.baseline().to_vec();

    engine.apply_facets(FacetSelection::new().with(FacetCategory::EnergyType, "electric"));
    assert_eq!(names(engine.visible_results()), vec!["Pikachu", "Raichu"]);
    assert_eq!(engine.baseline().len(), baseline.len());
    assert!(
        engine
            .baseline()
            .iter()
            .zip(&baseline)
            .all(|(a, b)| Arc::ptr_eq(a, b))
    );

    engine.apply_facets(FacetSelection::new());
    assert_eq!(engine.visible_results().len(), 5);
}

#[test]
fn facet_categories_narrow_independently() {
    let mut engine = engine(collection());
    engine.run_search("");

    let cases: Vec<(FacetSelection, Vec<&str>)> = vec![
        (
            FacetSelection::new().with(FacetCategory::Language, "japanese"),
            vec!["Raichu"],
        ),
        (
            FacetSelection::new().with_quick(QuickFilter::Duplicates),
            vec!["Charizard ex", "Nest Ball"],
        ),
        (
            FacetSelection::new().with(FacetCategory::ProductType, "sealed"),
            vec!["Obsidian Flames Booster Box"],
        ),
        (
            FacetSelection::new().with(FacetCategory::CardType, "trainer"),
            vec!["Nest Ball"],
        ),
        (
            FacetSelection::new().with(FacetCategory::Regulation, "g"),
            vec!["Charizard ex", "Nest Ball", "Pikachu"],
        ),
        (
            FacetSelection::new().with(FacetCategory::Format, "unlimited"),
            vec!["Raichu"],
        ),
        (
            FacetSelection::new().with(FacetCategory::EnergyType, "dark"),
            vec!["Charizard ex"],
        ),
        (
            FacetSelection::new()
                .with(FacetCategory::Condition, "nearMint")
                .with(FacetCategory::Variant, "holo"),
            vec!["Raichu"],
        ),
        (
            FacetSelection::new()
                .with_quick(QuickFilter::Owned)
                .with_quick(QuickFilter::Wishlist),
            vec!["Raichu"],
        ),
    ];

    for (selection, expected) in cases {
        engine.apply_facets(selection.clone());
        assert_eq!(names(engine.visible_results()), expected, "{selection:?}");
    }
}

#[test]
fn search_matches_set_names() {
    let mut engine = engine(collection());
    engine.run_search("  OBSIDIAN ");
    assert_eq!(
        names(engine.visible_results()),
        vec!["Charizard ex", "Obsidian Flames Booster Box"]
    );
}

#[test]
fn facets_set_before_search_apply_to_it() {
    let mut engine = engine(collection());
    engine.apply_facets(FacetSelection::new().with(FacetCategory::Language, "en"));
    assert!(engine.visible_results().is_empty());

    engine.run_search("scarlet");
    assert_eq!(names(engine.visible_results()), vec!["Nest Ball", "Pikachu"]);
}

#[test]
fn run_query_applies_everything_at_once() {
    let mut engine = engine(collection());
    let query = CatalogQueryBuilder::new()
        .search("")
        .facet(FacetCategory::Language, "english")
        .wishlist()
        .most_valuable()
        .build();
    engine.run_query(&query);

    assert_eq!(engine.sort_key(), SortKey::PriceHigh);
    assert_eq!(names(engine.visible_results()), vec!["Obsidian Flames Booster Box"]);
}

#[test]
fn sort_key_changes_reorder_without_research() {
    let mut engine = engine(collection());
    engine.run_search("");
    engine.set_sort_key(SortKey::PriceLow);
    assert_eq!(
        names(engine.visible_results()),
        vec![
            "Nest Ball",
            "Pikachu",
            "Raichu",
            "Obsidian Flames Booster Box",
            "Charizard ex"
        ]
    );

    engine.set_sort_key(SortKey::RarityDesc);
    assert_eq!(
        names(engine.visible_results()),
        vec![
            "Charizard ex",
            "Raichu",
            "Nest Ball",
            "Pikachu",
            "Obsidian Flames Booster Box"
        ]
    );
}

#[test]
fn facet_counts_cover_the_search_results() {
    let mut engine = engine(collection());
    engine.run_search("");
    engine.apply_facets(FacetSelection::new().with(FacetCategory::Language, "japanese"));

    let counts = engine.facet_counts(FacetCategory::Language);
    let english = counts.iter().find(|c| c.option == "english").map(|c| c.count);
    let japanese = counts.iter().find(|c| c.option == "japanese").map(|c| c.count);
    assert_eq!(english, Some(4));
    assert_eq!(japanese, Some(1));
}

#[test]
fn store_replacement_refreshes_results() {
    let store = CatalogStore::from_records(collection());
    let mut engine = QueryOrchestrator::new(store.clone(), config());
    engine.run_search("");
    engine.apply_facets(FacetSelection::new().with_quick(QuickFilter::Missing));
    assert_eq!(
        names(engine.visible_results()),
        vec!["Obsidian Flames Booster Box", "Pikachu"]
    );

    engine.replace_store(store.with_quantity("sv1-63", 1));
    assert_eq!(names(engine.visible_results()), vec!["Obsidian Flames Booster Box"]);
    assert_eq!(store.get("sv1-63").map(|c| c.quantity), Some(0));
}
