//! Bot play.
//!
//! ## Key Types
//!
//! - `DecisionContext`: The active player's view of the match
//! - `Decision`: Play, attack, or end the phase
//! - `DecisionProvider`: Anything that turns a context into a decision
//! - `GameLoop`: Ticks bot seats against a `SharedMatch`

pub mod decision;
pub mod game_loop;
pub mod provider;

pub use decision::{Decision, DecisionContext, DecisionError};
pub use game_loop::{GameLoop, LoopHandle, RunSummary, SharedMatch, TickOutcome};
pub use provider::{DecisionProvider, GreedyProvider, JsonProvider, RandomProvider};
