//! Card data.
//!
//! `CardTemplate` is the authored description of a card (what a catalog or
//! a dealing generator produces). `Card` is a template stamped with a unique
//! `CardId` plus the mutable per-match state: `heat` and `damage`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::keywords::KeywordSet;
use super::resources::Cost;

/// Unique identifier of a card within a match.
///
/// Displayed as `c1`, `c2`, ...
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Error returned when parsing a `CardId` from text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid card id: {0:?}")]
pub struct ParseCardIdError(pub String);

impl FromStr for CardId {
    type Err = ParseCardIdError;

    /// Accepts `c12` or a bare `12`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .strip_prefix('c')
            .unwrap_or(trimmed)
            .parse::<u32>()
            .map(CardId)
            .map_err(|_| ParseCardIdError(s.to_string()))
    }
}

/// Card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Character,
    Enemy,
    Boss,
    Pet,
    Relic,
    /// Played to the sites zone instead of the battlefield.
    Site,
    Rune,
}

/// World a card originates from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum World {
    Mars,
    Earth,
    Moon,
    Nibiru,
}

/// Rarity tier, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Low,
    Mid,
    High,
    Rare,
    Super,
}

/// Authored card description without match identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTemplate {
    pub name: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub world: World,
    pub rarity: Rarity,
    pub power: u32,
    pub armor: u32,
    pub cost: Cost,
    #[serde(default)]
    pub text: String,

    /// Authored keywords. `None` marks legacy data whose keywords are
    /// derived from `text`.
    #[serde(default)]
    pub keywords: Option<KeywordSet>,

    /// Heat the card starts with when seeded directly into a zone.
    #[serde(default)]
    pub heat: u32,
}

impl CardTemplate {
    /// Create a template with no rules text, no keywords and no heat.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        card_type: CardType,
        world: World,
        rarity: Rarity,
        power: u32,
        armor: u32,
        cost: Cost,
    ) -> Self {
        Self {
            name: name.into(),
            card_type,
            world,
            rarity,
            power,
            armor,
            cost,
            text: String::new(),
            keywords: None,
            heat: 0,
        }
    }

    /// Set rules text (builder pattern).
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set an authored keyword set (builder pattern).
    #[must_use]
    pub fn with_keywords(mut self, keywords: KeywordSet) -> Self {
        self.keywords = Some(keywords);
        self
    }

    /// Set starting heat (builder pattern).
    #[must_use]
    pub fn with_heat(mut self, heat: u32) -> Self {
        self.heat = heat;
        self
    }

    /// Stamp this template with a match identity.
    #[must_use]
    pub fn instantiate(&self, id: CardId) -> Card {
        Card {
            id,
            name: self.name.clone(),
            card_type: self.card_type,
            world: self.world,
            rarity: self.rarity,
            power: self.power,
            armor: self.armor,
            cost: self.cost,
            text: self.text.clone(),
            keywords: self.keywords,
            heat: self.heat,
            damage: None,
        }
    }
}

/// A card in a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub name: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub world: World,
    pub rarity: Rarity,
    pub power: u32,
    pub armor: u32,
    pub cost: Cost,
    pub text: String,
    pub keywords: Option<KeywordSet>,

    /// Turns left before this card may attack. 0 = ready.
    pub heat: u32,

    /// Damage accumulated on the battlefield. `None` off the battlefield.
    pub damage: Option<u32>,
}

impl Card {
    /// Effective keywords: the authored set, or the text-derived set for
    /// legacy cards.
    #[must_use]
    pub fn keywords(&self) -> KeywordSet {
        self.keywords
            .unwrap_or_else(|| KeywordSet::from_rules_text(&self.text))
    }

    /// Ready to attack.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.heat == 0
    }

    /// Accumulated damage, treating absent as zero.
    #[must_use]
    pub fn damage_taken(&self) -> u32 {
        self.damage.unwrap_or(0)
    }

    /// Add damage. Returns true if the card is now lethally damaged.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        let total = self.damage_taken().saturating_add(amount);
        self.damage = Some(total);
        self.is_lethally_damaged()
    }

    /// Damage meets or exceeds armor.
    #[must_use]
    pub fn is_lethally_damaged(&self) -> bool {
        self.damage_taken() >= self.armor
    }

    /// Sites never suffer summoning sickness.
    #[must_use]
    pub fn is_site(&self) -> bool {
        self.card_type == CardType::Site
    }
}
