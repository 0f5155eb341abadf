//! Players, seating, and per-player storage.
//!
//! ## PlayerId
//!
//! Seat index in turn order. Displayed as `p1`, `p2`, ... to match the
//! identifiers used by match clients.
//!
//! ## PlayerMap
//!
//! Turn-ordered per-player storage backed by `im::Vector`, indexable by
//! `PlayerId`. Turn order is list order and wraps after the last seat.
//!
//! ## Player
//!
//! A seated participant: zones, resource pools, marks, and the active flag.

use std::ops::{Index, IndexMut};
use std::str::FromStr;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{ResourcePools, KeywordSet};
use crate::zones::{Zone, Zones};

/// Seat index in turn order (0-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a match with `player_count` seats.
    ///
    /// ```
    /// use kudurru_rules::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p{}", self.0 as u16 + 1)
    }
}

/// Error returned when parsing a `PlayerId` from its display form.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid player id: {0:?}")]
pub struct ParsePlayerIdError(pub String);

impl FromStr for PlayerId {
    type Err = ParsePlayerIdError;

    /// Parses `p1`-style identifiers (1-based).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().strip_prefix('p').unwrap_or(s.trim());
        match digits.parse::<u16>() {
            Ok(n) if (1..=255).contains(&n) => Ok(PlayerId((n - 1) as u8)),
            _ => Err(ParsePlayerIdError(s.to_string())),
        }
    }
}

/// Where a seat sits around the table. Presentation hint only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatPosition {
    Top,
    Right,
    Bottom,
    Left,
}

/// Who makes decisions for a seat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Controller {
    /// Driven by external requests; the game loop never acts for it.
    Human,
    /// Driven by the autonomous game loop.
    #[default]
    Bot,
}

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: SeatPosition,
    pub controller: Controller,

    /// Hand, battlefield, sites, capture, discard, deck.
    pub zones: Zones,

    /// Current pools.
    pub resources: ResourcePools,

    /// Pools restored when this player's turn begins.
    pub max_resources: ResourcePools,

    /// Life total. Floors at 0.
    pub marks: u32,

    pub is_active: bool,
}

impl Player {
    /// A player is alive while they have marks left.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.marks > 0
    }

    /// Remove marks, flooring at zero. Returns the amount actually lost.
    pub fn lose_marks(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.marks);
        self.marks -= lost;
        lost
    }

    /// Number of battlefield cards carrying any of `keywords`.
    #[must_use]
    pub fn battlefield_with(&self, keywords: KeywordSet) -> usize {
        self.zones
            .cards(Zone::Battlefield)
            .iter()
            .filter(|card| card.keywords().intersects(keywords))
            .count()
    }
}

/// Turn-ordered per-player storage with O(1) indexing by `PlayerId`.
///
/// ## Example
///
/// ```
/// use kudurru_rules::core::{PlayerId, PlayerMap};
///
/// let marks: PlayerMap<u32> = PlayerMap::new(4, |_| 10);
/// assert_eq!(marks[PlayerId::new(0)], 10);
/// assert_eq!(marks.next_after(PlayerId::new(3)), PlayerId::new(0));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerMap<T: Clone> {
    data: Vector<T>,
}

impl<T: Clone> PlayerMap<T> {
    /// Create a map with one entry per seat from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            data: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    /// Number of seats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when no seats exist (never the case for a constructed map).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a seat's entry, if the seat exists.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a seat's entry mutably, if the seat exists.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// The seat after `player` in turn order, wrapping to the first.
    #[must_use]
    pub fn next_after(&self, player: PlayerId) -> PlayerId {
        PlayerId(((player.index() + 1) % self.data.len()) as u8)
    }

    /// First seat whose entry matches the predicate.
    pub fn position(&self, predicate: impl Fn(&T) -> bool) -> Option<PlayerId> {
        self.data
            .iter()
            .position(|entry| predicate(entry))
            .map(|i| PlayerId(i as u8))
    }

    /// Iterate over (PlayerId, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs in turn order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over entries in turn order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T: Clone> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T: Clone> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

impl<T: Clone> FromIterator<T> for PlayerMap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_display_is_one_based() {
        assert_eq!(PlayerId::new(0).to_string(), "p1");
        assert_eq!(PlayerId::new(3).to_string(), "p4");
    }

    #[test]
    fn test_player_id_parse() {
        assert_eq!("p3".parse::<PlayerId>(), Ok(PlayerId::new(2)));
        assert_eq!("1".parse::<PlayerId>(), Ok(PlayerId::new(0)));
        assert!("p0".parse::<PlayerId>().is_err());
        assert!("gate".parse::<PlayerId>().is_err());
    }

    #[test]
    fn test_player_map_next_after_wraps() {
        let map: PlayerMap<u32> = PlayerMap::new(3, |p| p.index() as u32);

        assert_eq!(map.next_after(PlayerId::new(0)), PlayerId::new(1));
        assert_eq!(map.next_after(PlayerId::new(2)), PlayerId::new(0));
    }

    #[test]
    fn test_player_map_position() {
        let map: PlayerMap<u32> = PlayerMap::new(4, |p| p.index() as u32 * 10);

        assert_eq!(map.position(|v| *v == 20), Some(PlayerId::new(2)));
        assert_eq!(map.position(|v| *v == 5), None);
    }

    #[test]
    fn test_player_map_mutation() {
        let mut map: PlayerMap<u32> = PlayerMap::new(2, |_| 0);

        map[PlayerId::new(1)] = 7;
        if let Some(v) = map.get_mut(PlayerId::new(0)) {
            *v = 3;
        }

        assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![3, 7]);
        assert!(map.get(PlayerId::new(2)).is_none());
    }

    #[test]
    fn test_lose_marks_floors_at_zero() {
        let mut player = Player {
            id: PlayerId::new(0),
            name: "North Gate".into(),
            position: SeatPosition::Top,
            controller: Controller::Bot,
            zones: Zones::default(),
            resources: ResourcePools::default(),
            max_resources: ResourcePools::default(),
            marks: 3,
            is_active: false,
        };

        assert_eq!(player.lose_marks(5), 3);
        assert_eq!(player.marks, 0);
        assert!(!player.is_alive());
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<u32> = PlayerMap::new(0, |_| 0);
    }
}
