//! Match state.
//!
//! ## MatchState
//!
//! The authoritative aggregate for one match:
//! - Phase and turn counter
//! - Players in turn order (zones, pools, marks, active flag)
//! - Accepted-action history
//! - The card ID allocator
//!
//! Uses `im` persistent collections, so cloning a state for a checkpoint
//! or comparison is cheap.
//!
//! ## MatchSnapshot
//!
//! The read model returned by every verb: phase, players, and the derived
//! game-over flag and winner.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionRecord};
use super::config::MatchConfig;
use super::phase::Phase;
use super::player::{Player, PlayerId, PlayerMap};
use crate::cards::{CardId, CardTemplate};
use crate::zones::{Zone, Zones};

/// Complete state of one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// Current phase of the active player's turn.
    pub phase: Phase,

    /// Players in turn order.
    pub players: PlayerMap<Player>,

    /// Turn number (starts at 1, increments on every rotation).
    pub turn_number: u32,

    /// Accepted actions, oldest first.
    pub history: Vector<ActionRecord>,

    /// Next card ID to allocate.
    next_card_id: u32,
}

impl MatchState {
    /// Build the opening state for a configuration.
    ///
    /// Card IDs are allocated from 1 in seat order, opening hand before
    /// opening battlefield.
    #[must_use]
    pub fn from_config(config: &MatchConfig) -> Self {
        let mut next_card_id = 1;
        let mut stamp = |templates: &[CardTemplate]| -> Vector<_> {
            templates
                .iter()
                .map(|template| {
                    let card = template.instantiate(CardId::new(next_card_id));
                    next_card_id += 1;
                    card
                })
                .collect()
        };

        let players = config
            .seats
            .iter()
            .enumerate()
            .map(|(index, seat)| {
                let hand = stamp(&seat.hand);
                let battlefield = stamp(&seat.battlefield);
                Player {
                    id: PlayerId::new(index as u8),
                    name: seat.name.clone(),
                    position: seat.position,
                    controller: seat.controller,
                    zones: Zones {
                        hand,
                        battlefield,
                        ..Zones::default()
                    },
                    resources: seat.resources,
                    max_resources: seat.resources,
                    marks: config.marks_for(seat),
                    is_active: index == config.opening_seat,
                }
            })
            .collect();

        Self {
            phase: config.opening_phase,
            players,
            turn_number: 1,
            history: Vector::new(),
            next_card_id,
        }
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// The seat whose turn it is, if any seat is flagged active.
    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        self.players.position(|player| player.is_active)
    }

    /// The seat that defends against `attacker`: always the next seat in
    /// turn order.
    #[must_use]
    pub fn defender_of(&self, attacker: PlayerId) -> PlayerId {
        self.players.next_after(attacker)
    }

    /// Get a player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// Find a card anywhere in the match.
    #[must_use]
    pub fn locate_card(&self, card: CardId) -> Option<(PlayerId, Zone)> {
        self.players
            .iter()
            .find_map(|(id, player)| player.zones.locate(card).map(|zone| (id, zone)))
    }

    /// Allocate a fresh card ID.
    pub fn alloc_card_id(&mut self) -> CardId {
        let id = CardId::new(self.next_card_id);
        self.next_card_id += 1;
        id
    }

    /// Append an accepted action to the history.
    pub fn record(&mut self, player: Option<PlayerId>, action: Action) {
        let sequence = self.history.len() as u32;
        self.history
            .push_back(ActionRecord::new(player, action, self.turn_number, sequence));
    }

    /// Encode as a compact binary checkpoint.
    pub fn encode(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode a checkpoint produced by `encode`.
    pub fn decode(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

/// What callers observe after every verb.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSnapshot {
    pub phase: Phase,
    pub players: Vec<Player>,
    pub turn_number: u32,
    pub game_over: bool,
    pub winner_id: Option<PlayerId>,
}

impl MatchSnapshot {
    /// Capture a state together with its evaluated winner.
    #[must_use]
    pub fn capture(state: &MatchState, winner: Option<PlayerId>) -> Self {
        Self {
            phase: state.phase,
            players: state.players.values().cloned().collect(),
            turn_number: state.turn_number,
            game_over: winner.is_some(),
            winner_id: winner,
        }
    }

    /// The active player, if any.
    #[must_use]
    pub fn active_player(&self) -> Option<&Player> {
        self.players.iter().find(|player| player.is_active)
    }

    /// Look up a player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }
}
