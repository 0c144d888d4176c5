//! Rarity tier ranking.

/// Tiers from most common to most sought after, as printed on modern cards.
pub const DEFAULT_RARITY_TIERS: &[&str] = &[
    "Common",
    "Uncommon",
    "Rare",
    "Rare Holo",
    "Double Rare",
    "ACE SPEC Rare",
    "Illustration Rare",
    "Ultra Rare",
    "Shiny Rare",
    "Shiny Ultra Rare",
    "Special Illustration Rare",
    "Hyper Rare",
];

/// Ordered rarity list used by the rarity sorts.
///
/// A rarity missing from the list has no rank. `None` orders below every
/// rank, so unranked cards come first under `rarity-asc` and last under
/// `rarity-desc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RarityTiers {
    folded: Vec<String>,
}

impl RarityTiers {
    pub fn new<I, S>(tiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            folded: tiers
                .into_iter()
                .map(|tier| tier.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    /// Position in the tier list, compared case-insensitively.
    pub fn rank(&self, rarity: &str) -> Option<usize> {
        let rarity = rarity.trim().to_lowercase();
        if rarity.is_empty() {
            return None;
        }
        self.folded.iter().position(|tier| *tier == rarity)
    }

    pub fn len(&self) -> usize {
        self.folded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }
}

impl Default for RarityTiers {
    fn default() -> Self {
        Self::new(DEFAULT_RARITY_TIERS)
    }
}
