//! # kudurru-rules
//!
//! Rules engine for Kudurru Kings, a turn-based card battle for two or more
//! seats.
//!
//! ## Design Principles
//!
//! 1. **Single Authority**: One `MatchEngine` owns the match. Callers act
//!    through verbs (play, end phase, attack, deal, reset) and read
//!    snapshots. A rejected verb changes nothing.
//!
//! 2. **N-Player First**: Seats, turn order and defenders all follow the
//!    configured seat list. Nothing assumes two or four players.
//!
//! 3. **Configuration Over Convention**: Seats, pools, opening cards and the
//!    deal batch come from `MatchConfig`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Zones and history use `im-rs`, so
//!   snapshots clone in O(1).
//!
//! - **Bots Use the Verbs**: The game loop drives bot seats through the same
//!   interface human callers use, under the same lock.
//!
//! ## Modules
//!
//! - `core`: Players, phases, RNG, configuration, actions, state
//! - `zones`: Per-player zones and card movement
//! - `cards`: Templates, cards, keywords, costs, the catalog
//! - `rules`: Verb resolvers and the match engine
//! - `stack`: Pending-effect stack
//! - `ai`: Decisions, providers and the game loop

pub mod ai;
pub mod cards;
pub mod core;
pub mod rules;
pub mod stack;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, AttackDeclaration, ConfigError, Controller, GameRng, MatchConfig,
    MatchConfigBuilder, MatchSnapshot, MatchState, Phase, Player, PlayerId, PlayerMap, SeatConfig,
    SeatPosition,
};

pub use crate::zones::{Zone, Zones};

pub use crate::cards::{
    Card, CardCatalog, CardId, CardTemplate, CardType, Cost, Keyword, KeywordSet, ResourcePools,
};

pub use crate::rules::{MatchEngine, MatchEvent, MatchOutcome, RulesError};

pub use crate::stack::{PriorityStack, StackEntry, StackEntryId};

pub use crate::ai::{
    Decision, DecisionContext, DecisionProvider, GameLoop, GreedyProvider, RandomProvider,
    SharedMatch, TickOutcome,
};
