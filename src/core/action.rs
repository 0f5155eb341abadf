//! Match verbs as data.
//!
//! An `Action` is one state-mutating verb with its arguments. The engine
//! accepts actions through `MatchEngine::apply` and records every accepted
//! one in the match history as an `ActionRecord`.
//!
//! Read-only verbs (state reads, stack reads) are not actions.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::cards::CardId;

/// An attack declaration.
///
/// Blockers are taken in declaration order. An empty blocker list declares
/// an unblocked attack on the defending player.
///
/// ```
/// use kudurru_rules::cards::CardId;
/// use kudurru_rules::core::AttackDeclaration;
///
/// let attack = AttackDeclaration::new(CardId::new(2))
///     .blocked_by(CardId::new(5))
///     .blocked_by(CardId::new(6))
///     .allocate(CardId::new(5), 2);
///
/// assert_eq!(attack.blockers.len(), 2);
/// assert_eq!(attack.allocation_for(CardId::new(5)), Some(2));
/// assert_eq!(attack.allocation_for(CardId::new(6)), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackDeclaration {
    pub attacker: CardId,

    /// Declared blockers, in damage-assignment order.
    /// Most attacks name at most a handful of blockers.
    #[serde(default)]
    pub blockers: SmallVec<[CardId; 4]>,

    /// Accepted for wire compatibility. Whether an attack is blocked is
    /// decided by `blockers` alone.
    #[serde(default)]
    pub direct: bool,

    /// Caller-chosen damage per blocker. Unlisted blockers absorb all
    /// remaining power.
    #[serde(default)]
    pub allocations: FxHashMap<CardId, u32>,
}

impl AttackDeclaration {
    /// An unblocked attack.
    #[must_use]
    pub fn new(attacker: CardId) -> Self {
        Self {
            attacker,
            blockers: SmallVec::new(),
            direct: false,
            allocations: FxHashMap::default(),
        }
    }

    /// Add a blocker (builder pattern).
    #[must_use]
    pub fn blocked_by(mut self, blocker: CardId) -> Self {
        self.blockers.push(blocker);
        self
    }

    /// Set the damage allocated to a blocker (builder pattern).
    #[must_use]
    pub fn allocate(mut self, blocker: CardId, amount: u32) -> Self {
        self.allocations.insert(blocker, amount);
        self
    }

    /// Mark the declaration as direct (builder pattern).
    #[must_use]
    pub fn direct(mut self, direct: bool) -> Self {
        self.direct = direct;
        self
    }

    /// True when no blockers were declared.
    #[must_use]
    pub fn is_unblocked(&self) -> bool {
        self.blockers.is_empty()
    }

    /// Caller-chosen damage for a blocker, if any.
    #[must_use]
    pub fn allocation_for(&self, blocker: CardId) -> Option<u32> {
        self.allocations.get(&blocker).copied()
    }
}

/// A state-mutating verb.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// Play a card from the active player's hand. `None` plays the first
    /// card in hand.
    PlayCard { card: Option<CardId> },

    /// Advance to the next phase.
    EndPhase,

    /// Declare an attack with one of the active player's cards.
    Attack(AttackDeclaration),

    /// Append the deal batch to every hand.
    DealCards,

    /// Reseed the match.
    Reset,
}

impl Action {
    /// Short verb name for logs.
    #[must_use]
    pub fn verb(&self) -> &'static str {
        match self {
            Action::PlayCard { .. } => "playCard",
            Action::EndPhase => "endPhase",
            Action::Attack(_) => "attack",
            Action::DealCards => "dealCards",
            Action::Reset => "resetGame",
        }
    }
}

/// An accepted action with history metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The active player when the action was taken. `None` for match-wide
    /// verbs taken with no active player.
    pub player: Option<PlayerId>,

    pub action: Action,

    /// Turn number when the action was taken.
    pub turn: u32,

    /// Position in the match history.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: Option<PlayerId>, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
