//! Combat keywords.
//!
//! Cards carry an explicit [`KeywordSet`] chosen when the card is authored.
//! Legacy card data without an authored set falls back to
//! [`KeywordSet::from_rules_text`], a best-effort scan of the rules text for
//! the keyword phrases. The scan is plain case-insensitive substring
//! matching, so "no taunt effect" still yields Taunt.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// A single recognised keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    /// Attackers must engage the bearer before hitting its player.
    Taunt,
    /// Deals combat damage before blockers retaliate.
    FirstStrike,
    /// Enters play ready to attack.
    Haste,
}

impl Keyword {
    /// Every recognised keyword.
    pub const ALL: [Keyword; 3] = [Keyword::Taunt, Keyword::FirstStrike, Keyword::Haste];

    /// Lower-case phrase that marks this keyword in rules text.
    #[must_use]
    pub const fn phrase(self) -> &'static str {
        match self {
            Keyword::Taunt => "taunt",
            Keyword::FirstStrike => "first strike",
            Keyword::Haste => "haste",
        }
    }

    /// The single-keyword set.
    #[must_use]
    pub const fn flag(self) -> KeywordSet {
        match self {
            Keyword::Taunt => KeywordSet::TAUNT,
            Keyword::FirstStrike => KeywordSet::FIRST_STRIKE,
            Keyword::Haste => KeywordSet::HASTE,
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Keyword::Taunt => "Taunt",
            Keyword::FirstStrike => "First Strike",
            Keyword::Haste => "Haste",
        };
        f.write_str(name)
    }
}

bitflags! {
    /// Set of keywords on a card.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct KeywordSet: u8 {
        const TAUNT = 0b001;
        const FIRST_STRIKE = 0b010;
        const HASTE = 0b100;
    }
}

impl KeywordSet {
    /// Derive keywords from free rules text (legacy fallback).
    #[must_use]
    pub fn from_rules_text(text: &str) -> Self {
        let lowered = text.to_lowercase();
        Keyword::ALL
            .into_iter()
            .filter(|keyword| lowered.contains(keyword.phrase()))
            .fold(KeywordSet::empty(), |set, keyword| set | keyword.flag())
    }

    /// Check for a single keyword.
    #[must_use]
    pub fn has(self, keyword: Keyword) -> bool {
        self.contains(keyword.flag())
    }

    /// Keywords in this set, in canonical order.
    pub fn keywords(self) -> impl Iterator<Item = Keyword> {
        Keyword::ALL.into_iter().filter(move |k| self.has(*k))
    }
}

impl FromIterator<Keyword> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = Keyword>>(iter: I) -> Self {
        iter.into_iter()
            .fold(KeywordSet::empty(), |set, keyword| set | keyword.flag())
    }
}
