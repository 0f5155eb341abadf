//! Match rules.
//!
//! Resolvers validate a verb against the current `MatchState` and apply
//! it. `MatchEngine` wraps them behind the verb interface.
//!
//! ## Key Types
//!
//! - `MatchEngine`: One match, its stack, and its outcome
//! - `RulesError`: Why a verb was rejected
//! - `MatchEvent`: What an accepted verb did
//! - `MatchOutcome`: In progress, or won by a single survivor

pub mod combat;
pub mod engine;
pub mod error;
pub mod event;
pub mod outcome;
pub mod phase;
pub mod play;

pub use engine::MatchEngine;
pub use error::RulesError;
pub use event::MatchEvent;
pub use outcome::MatchOutcome;
