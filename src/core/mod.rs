//! Core match types: players, phases, RNG, configuration, actions, state.
//!
//! Everything here is plain data plus the bookkeeping that keeps it
//! consistent. Rules live in `rules`; this module never decides whether a
//! verb is legal.

pub mod action;
pub mod config;
pub mod phase;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord, AttackDeclaration};
pub use config::{ConfigError, MatchConfig, MatchConfigBuilder, SeatConfig, DEFAULT_STARTING_MARKS};
pub use phase::Phase;
pub use player::{Controller, ParsePlayerIdError, Player, PlayerId, PlayerMap, SeatPosition};
pub use rng::GameRng;
pub use state::{MatchSnapshot, MatchState};
