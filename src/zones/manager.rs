//! Per-player card zones and card movement.
//!
//! Each player owns six ordered zones. Zones are `im::Vector`s so that
//! cloning a player (for state snapshots) is O(1).
//!
//! A card lives in exactly one zone. `Zones::move_card` removes from the
//! source and inserts into the destination in one call; a card that is not
//! found in the source is left alone and nothing is inserted.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};

/// A player zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Hand,
    Battlefield,
    /// Permanent sites, separate from the battlefield.
    Sites,
    Capture,
    Discard,
    Deck,
}

impl Zone {
    /// Every zone.
    pub const ALL: [Zone; 6] = [
        Zone::Hand,
        Zone::Battlefield,
        Zone::Sites,
        Zone::Capture,
        Zone::Discard,
        Zone::Deck,
    ];
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Hand => "hand",
            Zone::Battlefield => "battlefield",
            Zone::Sites => "sites",
            Zone::Capture => "capture",
            Zone::Discard => "discard",
            Zone::Deck => "deck",
        };
        f.write_str(name)
    }
}

/// The six zones of one player.
///
/// ## Usage
///
/// ```
/// use kudurru_rules::cards::{CardCatalog, CardId};
/// use kudurru_rules::zones::{Zone, Zones};
///
/// let catalog = CardCatalog::standard();
/// let mut zones = Zones::default();
/// zones.push(Zone::Hand, catalog.get("Fire Warrior").unwrap().instantiate(CardId::new(1)));
///
/// zones.move_card(CardId::new(1), Zone::Hand, Zone::Battlefield);
/// assert_eq!(zones.locate(CardId::new(1)), Some(Zone::Battlefield));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zones {
    pub hand: Vector<Card>,
    pub battlefield: Vector<Card>,
    pub sites: Vector<Card>,
    pub capture: Vector<Card>,
    pub discard: Vector<Card>,
    pub deck: Vector<Card>,
}

impl Zones {
    /// Cards in a zone, in order.
    #[must_use]
    pub fn cards(&self, zone: Zone) -> &Vector<Card> {
        match zone {
            Zone::Hand => &self.hand,
            Zone::Battlefield => &self.battlefield,
            Zone::Sites => &self.sites,
            Zone::Capture => &self.capture,
            Zone::Discard => &self.discard,
            Zone::Deck => &self.deck,
        }
    }

    fn cards_mut(&mut self, zone: Zone) -> &mut Vector<Card> {
        match zone {
            Zone::Hand => &mut self.hand,
            Zone::Battlefield => &mut self.battlefield,
            Zone::Sites => &mut self.sites,
            Zone::Capture => &mut self.capture,
            Zone::Discard => &mut self.discard,
            Zone::Deck => &mut self.deck,
        }
    }

    /// Number of cards in a zone.
    #[must_use]
    pub fn len(&self, zone: Zone) -> usize {
        self.cards(zone).len()
    }

    /// Find a card in a zone.
    #[must_use]
    pub fn find(&self, zone: Zone, id: CardId) -> Option<&Card> {
        self.cards(zone).iter().find(|card| card.id == id)
    }

    /// Find a card in a zone for mutation.
    pub fn find_mut(&mut self, zone: Zone, id: CardId) -> Option<&mut Card> {
        self.cards_mut(zone).iter_mut().find(|card| card.id == id)
    }

    /// Check if a zone holds a card.
    #[must_use]
    pub fn contains(&self, zone: Zone, id: CardId) -> bool {
        self.find(zone, id).is_some()
    }

    /// Which zone holds a card, if any.
    #[must_use]
    pub fn locate(&self, id: CardId) -> Option<Zone> {
        Zone::ALL
            .into_iter()
            .find(|&zone| self.contains(zone, id))
    }

    /// Append a card to the end of a zone.
    ///
    /// Damage only exists on the battlefield, so it is cleared for any
    /// other destination.
    pub fn push(&mut self, zone: Zone, mut card: Card) {
        if zone != Zone::Battlefield {
            card.damage = None;
        }
        self.cards_mut(zone).push_back(card);
    }

    /// Remove a card from a zone.
    pub fn remove(&mut self, zone: Zone, id: CardId) -> Option<Card> {
        let cards = self.cards_mut(zone);
        let index = cards.iter().position(|card| card.id == id)?;
        Some(cards.remove(index))
    }

    /// Move a card between two zones of this player.
    ///
    /// Returns the moved card as it sits in the destination, or `None` if
    /// the card was not in `from` (in which case nothing changes).
    pub fn move_card(&mut self, id: CardId, from: Zone, to: Zone) -> Option<&Card> {
        let card = self.remove(from, id)?;
        self.push(to, card);
        self.cards(to).last()
    }

    /// Iterate over battlefield cards mutably.
    pub fn battlefield_mut(&mut self) -> impl Iterator<Item = &mut Card> {
        self.battlefield.iter_mut()
    }
}
