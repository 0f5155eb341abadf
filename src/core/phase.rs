//! Turn phases.
//!
//! Every turn cycles through the same four phases in a fixed order:
//! Upkeep → Main → Battle → End → (next player's Upkeep).
//!
//! Upkeep and End offer no player choices; readers of match state
//! advance through them automatically.

use serde::{Deserialize, Serialize};

/// A phase of a player's turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Upkeep,
    #[default]
    Main,
    Battle,
    End,
}

impl Phase {
    /// All phases in turn order.
    pub const ORDER: [Phase; 4] = [Phase::Upkeep, Phase::Main, Phase::Battle, Phase::End];

    /// The phase that follows this one, wrapping End back to Upkeep.
    #[must_use]
    pub const fn next(self) -> Phase {
        match self {
            Phase::Upkeep => Phase::Main,
            Phase::Main => Phase::Battle,
            Phase::Battle => Phase::End,
            Phase::End => Phase::Upkeep,
        }
    }

    /// Phases with no player decisions.
    #[must_use]
    pub const fn is_pass_through(self) -> bool {
        matches!(self, Phase::Upkeep | Phase::End)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Upkeep => "Upkeep",
            Phase::Main => "Main",
            Phase::Battle => "Battle",
            Phase::End => "End",
        };
        f.write_str(name)
    }
}
