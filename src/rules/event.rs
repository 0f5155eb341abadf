//! Events emitted by match verbs.
//!
//! Resolvers push events in the order things happen. The engine keeps the
//! events of the most recent accepted verb; rejected verbs emit nothing.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{Phase, PlayerId};
use crate::zones::Zone;

/// Something that happened while resolving a verb.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum MatchEvent {
    PhaseChanged {
        from: Phase,
        to: Phase,
    },

    /// The active seat rotated at the end of a turn.
    TurnPassed {
        from: Option<PlayerId>,
        to: PlayerId,
        turn: u32,
    },

    CardPlayed {
        player: PlayerId,
        card: CardId,
        zone: Zone,
        heat: u32,
    },

    CardsDealt {
        player: PlayerId,
        count: usize,
    },

    /// Combat damage from `source` to `target`.
    DamageDealt {
        source: CardId,
        target: CardId,
        amount: u32,
        first_strike: bool,
    },

    CardDestroyed {
        owner: PlayerId,
        card: CardId,
    },

    MarksLost {
        player: PlayerId,
        amount: u32,
        remaining: u32,
    },

    GameWon {
        winner: PlayerId,
    },

    MatchReset,
}
