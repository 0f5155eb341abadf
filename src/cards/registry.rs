//! Card catalog.
//!
//! The `CardCatalog` stores named card templates in insertion order and
//! provides the standard Kudurru Kings card pool used for seeding and
//! dealing.

use rustc_hash::FxHashMap;

use super::definition::{CardTemplate, CardType, Rarity, World};
use super::keywords::KeywordSet;
use super::resources::Cost;

/// Templates dealt to every player by the standard "Deal 6" batch.
pub const STANDARD_DEAL: [&str; 6] = [
    "Fire Warrior",
    "Mystic Charm",
    "Battle Hound",
    "Ancient Temple",
    "Uruk Shield-Bearer",
    "Dune Outrider",
];

/// Named card templates.
///
/// ## Example
///
/// ```
/// use kudurru_rules::cards::CardCatalog;
///
/// let catalog = CardCatalog::standard();
/// let warrior = catalog.get("Fire Warrior").unwrap();
/// assert_eq!(warrior.power, 6);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    templates: Vec<CardTemplate>,
    by_name: FxHashMap<String, usize>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template, replacing any template with the same name.
    pub fn register(&mut self, template: CardTemplate) {
        match self.by_name.get(&template.name) {
            Some(&index) => self.templates[index] = template,
            None => {
                self.by_name.insert(template.name.clone(), self.templates.len());
                self.templates.push(template);
            }
        }
    }

    /// Look up a template by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CardTemplate> {
        self.by_name.get(name).map(|&index| &self.templates[index])
    }

    /// Number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over templates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CardTemplate> {
        self.templates.iter()
    }

    /// Templates for the given names, skipping names not in the catalog.
    #[must_use]
    pub fn batch(&self, names: &[&str]) -> Vec<CardTemplate> {
        names
            .iter()
            .filter_map(|name| self.get(name))
            .cloned()
            .collect()
    }

    /// The standard six-card deal batch.
    #[must_use]
    pub fn standard_deal(&self) -> Vec<CardTemplate> {
        self.batch(&STANDARD_DEAL)
    }

    /// The standard card pool.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();

        catalog.register(
            CardTemplate::new(
                "Uruk Shield-Bearer",
                CardType::Character,
                World::Earth,
                Rarity::Mid,
                2,
                1,
                Cost::new(2, 0, 0),
            )
            .with_text("Taunt. First strike while defending."),
        );
        catalog.register(
            CardTemplate::new(
                "Canal Saboteur",
                CardType::Character,
                World::Mars,
                Rarity::Mid,
                3,
                2,
                Cost::new(3, 0, 0),
            )
            .with_text("When attacks, you may drain 1 sigil."),
        );
        catalog.register(CardTemplate::new(
            "Fire Warrior",
            CardType::Character,
            World::Mars,
            Rarity::High,
            6,
            3,
            Cost::new(3, 0, 1),
        ));
        catalog.register(
            CardTemplate::new(
                "Mystic Charm",
                CardType::Relic,
                World::Moon,
                Rarity::Mid,
                0,
                0,
                Cost::new(0, 2, 0),
            )
            .with_text("+2 to all Veil tests"),
        );
        catalog.register(
            CardTemplate::new(
                "Battle Hound",
                CardType::Pet,
                World::Nibiru,
                Rarity::Low,
                0,
                0,
                Cost::new(1, 0, 0),
            )
            .with_text("+1 armor"),
        );
        catalog.register(
            CardTemplate::new(
                "Ancient Temple",
                CardType::Site,
                World::Earth,
                Rarity::Rare,
                0,
                0,
                Cost::new(0, 2, 1),
            )
            .with_text("+1 Sigil at upkeep"),
        );
        catalog.register(
            CardTemplate::new(
                "Dune Outrider",
                CardType::Character,
                World::Nibiru,
                Rarity::Mid,
                2,
                2,
                Cost::new(1, 0, 1),
            )
            .with_text("Haste.")
            .with_keywords(KeywordSet::HASTE),
        );
        catalog.register(
            CardTemplate::new(
                "Lapis Sentinel",
                CardType::Character,
                World::Moon,
                Rarity::Mid,
                4,
                2,
                Cost::new(0, 1, 1),
            ),
        );
        catalog.register(
            CardTemplate::new(
                "Jade Duelist",
                CardType::Character,
                World::Earth,
                Rarity::Mid,
                5,
                2,
                Cost::new(1, 2, 0),
            )
            .with_text("First strike.")
            .with_keywords(KeywordSet::FIRST_STRIKE),
        );

        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Keyword;

    #[test]
    fn test_register_and_get() {
        let mut catalog = CardCatalog::new();
        catalog.register(CardTemplate::new(
            "Test",
            CardType::Rune,
            World::Moon,
            Rarity::Super,
            1,
            1,
            Cost::default(),
        ));

        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("Test").is_some());
        assert!(catalog.get("test").is_none());
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut catalog = CardCatalog::standard();
        let before = catalog.len();

        let mut warrior = catalog.get("Fire Warrior").cloned().unwrap();
        warrior.power = 9;
        catalog.register(warrior);

        assert_eq!(catalog.len(), before);
        assert_eq!(catalog.get("Fire Warrior").unwrap().power, 9);
    }

    #[test]
    fn test_standard_deal_has_six_cards() {
        let deal = CardCatalog::standard().standard_deal();
        let names: Vec<_> = deal.iter().map(|t| t.name.as_str()).collect();

        assert_eq!(names, STANDARD_DEAL.to_vec());
    }

    #[test]
    fn test_batch_skips_unknown_names() {
        let catalog = CardCatalog::standard();
        assert_eq!(catalog.batch(&["Fire Warrior", "Nope"]).len(), 1);
    }

    #[test]
    fn test_shield_bearer_is_legacy_taunt() {
        let catalog = CardCatalog::standard();
        let bearer = catalog.get("Uruk Shield-Bearer").unwrap();

        assert!(bearer.keywords.is_none());
        assert!(KeywordSet::from_rules_text(&bearer.text).has(Keyword::Taunt));
    }
}
