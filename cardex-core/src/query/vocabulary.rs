//! Facet option tables.
//!
//! Front ends toggle option keys such as `electric` or `nearMint`; records
//! carry the upstream vocabulary (`Lightning`, `Near Mint`). Each table entry
//! maps one canonical option key (plus aliases) onto the raw values it
//! accepts. A raw value is itself accepted as a key, so `en` selects the same
//! records as `english`.

use cardex_model::FacetCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacetOption {
    /// Canonical option key as sent by the browser.
    pub key: &'static str,
    pub aliases: &'static [&'static str],
    /// Raw record values this option accepts.
    pub values: &'static [&'static str],
}

const fn opt(
    key: &'static str,
    aliases: &'static [&'static str],
    values: &'static [&'static str],
) -> FacetOption {
    FacetOption {
        key,
        aliases,
        values,
    }
}

static LANGUAGE: &[FacetOption] = &[
    opt("english", &[], &["en"]),
    opt("japanese", &[], &["ja", "jp"]),
    opt("french", &[], &["fr"]),
    opt("german", &[], &["de"]),
    opt("italian", &[], &["it"]),
    opt("spanish", &[], &["es"]),
    opt("portuguese", &[], &["pt"]),
    opt("korean", &[], &["ko"]),
    opt("chinese", &[], &["zh"]),
];

static CONDITION: &[FacetOption] = &[
    opt("nearMint", &["nm"], &["Near Mint"]),
    opt("lightlyPlayed", &["lp"], &["Lightly Played"]),
    opt("moderatelyPlayed", &["mp"], &["Moderately Played"]),
    opt("heavilyPlayed", &["hp"], &["Heavily Played"]),
    opt("damaged", &["dmg"], &["Damaged"]),
];

static PRODUCT_TYPE: &[FacetOption] = &[
    opt("cards", &["card", "singles"], &["card"]),
    opt("sealed", &[], &["sealed"]),
];

static ENERGY_TYPE: &[FacetOption] = &[
    opt("grass", &[], &["Grass"]),
    opt("fire", &[], &["Fire"]),
    opt("water", &[], &["Water"]),
    opt("electric", &["lightning"], &["Lightning"]),
    opt("psychic", &[], &["Psychic"]),
    opt("fighting", &[], &["Fighting"]),
    opt("dark", &["darkness"], &["Darkness"]),
    opt("steel", &["metal"], &["Metal"]),
    opt("colorless", &["colourless"], &["Colorless"]),
    opt("fairy", &[], &["Fairy"]),
    opt("dragon", &[], &["Dragon"]),
];

static CARD_TYPE: &[FacetOption] = &[
    opt("pokemon", &[], &["Pokémon", "Pokemon"]),
    opt("trainer", &[], &["Trainer"]),
    opt("energy", &[], &["Energy"]),
];

static RARITY: &[FacetOption] = &[
    opt("common", &[], &["Common"]),
    opt("uncommon", &[], &["Uncommon"]),
    opt("rare", &[], &["Rare", "Rare Holo", "Holo Rare"]),
    opt("doubleRare", &[], &["Double Rare"]),
    opt("aceSpecRare", &["aceSpec"], &["ACE SPEC Rare", "ACE"]),
    opt("illustrationRare", &[], &["Illustration Rare"]),
    opt("ultraRare", &[], &["Ultra Rare"]),
    opt(
        "specialIllustrationRare",
        &[],
        &["Special Illustration Rare"],
    ),
    opt("hyperRare", &[], &["Hyper Rare"]),
    opt("shinyRare", &[], &["Shiny Rare"]),
    opt("shinyUltraRare", &[], &["Shiny Ultra Rare"]),
    opt("blackStarPromo", &["promo"], &["Promo"]),
    opt("artRare", &[], &["Art Rare"]),
    opt("specialArtRare", &[], &["Special Art Rare"]),
    opt("superRare", &[], &["Super Rare"]),
    opt("shinySuperRare", &[], &["Shiny Super Rare"]),
];

static VARIANT: &[FacetOption] = &[
    opt("normal", &[], &["Normal"]),
    opt("holo", &[], &["Holo"]),
    opt("reverseHolo", &[], &["Reverse Holo"]),
    opt("foil", &[], &["Foil"]),
    opt("firstEdition", &[], &["1st Edition"]),
];

static FORMAT: &[FacetOption] = &[
    opt("standard", &[], &["Standard"]),
    opt("expanded", &[], &["Expanded"]),
    opt("unlimited", &[], &["Unlimited"]),
];

static QUICK_FILTER: &[FacetOption] = &[
    opt("owned", &[], &[]),
    opt("missing", &[], &[]),
    opt("duplicates", &[], &[]),
    opt("wishlist", &[], &[]),
];

/// Static option table of a category.
///
/// Regulation marks are open-ended (any single letter) and have no table.
pub fn options_for(category: FacetCategory) -> &'static [FacetOption] {
    match category {
        FacetCategory::Language => LANGUAGE,
        FacetCategory::Condition => CONDITION,
        FacetCategory::ProductType => PRODUCT_TYPE,
        FacetCategory::EnergyType => ENERGY_TYPE,
        FacetCategory::CardType => CARD_TYPE,
        FacetCategory::Rarity => RARITY,
        FacetCategory::Variant => VARIANT,
        FacetCategory::Regulation => &[],
        FacetCategory::Format => FORMAT,
        FacetCategory::QuickFilter => QUICK_FILTER,
    }
}

/// Raw values an option key stands for, or `None` when the key is unknown.
pub fn resolve(category: FacetCategory, key: &str) -> Option<Vec<String>> {
    let folded = fold_key(key);
    if folded.is_empty() {
        return None;
    }

    if category == FacetCategory::Regulation {
        let mut chars = folded.chars();
        return match (chars.next(), chars.next()) {
            (Some(letter), None) if letter.is_ascii_alphabetic() => {
                Some(vec![letter.to_ascii_uppercase().to_string()])
            }
            _ => None,
        };
    }

    options_for(category)
        .iter()
        .find(|option| option_accepts_key(option, &folded))
        .map(|option| option.values.iter().map(|v| v.to_string()).collect())
}

fn option_accepts_key(option: &FacetOption, folded: &str) -> bool {
    fold_key(option.key) == folded
        || option.aliases.iter().any(|alias| fold_key(alias) == folded)
        || option.values.iter().any(|value| fold_key(value) == folded)
}

/// Lower-case and drop separators: `nearMint`, `near_mint` and `Near Mint`
/// all fold to `nearmint`.
pub fn fold_key(key: &str) -> String {
    key.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}
