//! Rejection reasons for match verbs.
//!
//! Every rejected verb leaves the match exactly as it was.

use crate::cards::{CardId, Cost, ResourcePools};
use crate::core::{Phase, PlayerId};

/// Why a verb was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("verb requires the {expected} phase, match is in {actual}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("no player is active")]
    NoActivePlayer,

    #[error("active player's hand is empty")]
    EmptyHand,

    #[error("card {0} is not in the active player's hand")]
    CardNotInHand(CardId),

    #[error("card {card} costs {cost}, only {available} available")]
    InsufficientResources {
        card: CardId,
        cost: Cost,
        available: ResourcePools,
    },

    #[error("card {0} is not on the active player's battlefield")]
    AttackerNotFound(CardId),

    #[error("card {card} still has {heat} heat")]
    AttackerNotReady { card: CardId, heat: u32 },

    #[error("{defender} controls {taunts} taunt card(s); declare a blocker")]
    TauntBlocksDirectAttack { defender: PlayerId, taunts: usize },
}
