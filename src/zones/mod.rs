//! Zone system for card locations.
//!
//! Every player owns the same six zones: hand, battlefield, sites,
//! capture, discard and deck.
//!
//! ## Key Types
//!
//! - `Zone`: Zone identifier
//! - `Zones`: One player's cards, grouped by zone, with atomic movement

pub mod manager;

pub use manager::{Zone, Zones};
