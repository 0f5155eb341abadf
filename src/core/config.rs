//! Match configuration.
//!
//! A match is configured at startup by providing:
//! - `SeatConfig`: One per player, in turn order (name, pools, controller,
//!   opening cards)
//! - `MatchConfig`: Seats plus match-wide settings (starting marks, opening
//!   phase and seat, deal batch, RNG seed)
//!
//! `MatchConfig::default()` is the canonical four-gate seed. Configurations
//! can also be built with `MatchConfigBuilder` or loaded from JSON.

use serde::{Deserialize, Serialize};

use super::phase::Phase;
use super::player::{Controller, SeatPosition};
use crate::cards::{CardCatalog, CardTemplate, ResourcePools};

/// Marks every player starts with unless the seat overrides it.
pub const DEFAULT_STARTING_MARKS: u32 = 10;

/// Errors raised by configuration validation and loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("a match needs at least 2 seats, got {0}")]
    TooFewSeats(usize),

    #[error("a match supports at most 255 seats, got {0}")]
    TooManySeats(usize),

    #[error("opening seat {seat} is out of range for {seats} seats")]
    OpeningSeatOutOfRange { seat: usize, seats: usize },

    #[error("invalid match configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatConfig {
    pub name: String,
    pub position: SeatPosition,

    /// Pools at the start of the match and after every refresh.
    pub resources: ResourcePools,

    #[serde(default)]
    pub controller: Controller,

    /// Overrides the match-wide starting marks.
    #[serde(default)]
    pub marks: Option<u32>,

    #[serde(default)]
    pub hand: Vec<CardTemplate>,

    #[serde(default)]
    pub battlefield: Vec<CardTemplate>,
}

impl SeatConfig {
    /// Create a bot seat with empty opening zones.
    pub fn new(name: impl Into<String>, position: SeatPosition, resources: ResourcePools) -> Self {
        Self {
            name: name.into(),
            position,
            resources,
            controller: Controller::Bot,
            marks: None,
            hand: Vec::new(),
            battlefield: Vec::new(),
        }
    }

    /// Set the controller.
    #[must_use]
    pub fn controlled_by(mut self, controller: Controller) -> Self {
        self.controller = controller;
        self
    }

    /// Override starting marks.
    #[must_use]
    pub fn with_marks(mut self, marks: u32) -> Self {
        self.marks = Some(marks);
        self
    }

    /// Add a card to the opening hand.
    #[must_use]
    pub fn with_hand_card(mut self, card: CardTemplate) -> Self {
        self.hand.push(card);
        self
    }

    /// Add a card to the opening battlefield.
    #[must_use]
    pub fn with_battlefield_card(mut self, card: CardTemplate) -> Self {
        self.battlefield.push(card);
        self
    }
}

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchConfig {
    /// Seats in turn order.
    pub seats: Vec<SeatConfig>,

    pub starting_marks: u32,

    /// Phase the match opens in.
    pub opening_phase: Phase,

    /// Index of the seat that is active when the match opens.
    pub opening_seat: usize,

    /// Templates appended to every hand by `deal_cards`.
    pub deal_batch: Vec<CardTemplate>,

    /// Seed for bot decision streams.
    pub rng_seed: u64,
}

impl Default for MatchConfig {
    /// The four-gate seed: South Gate is the human seat and opens in Main.
    fn default() -> Self {
        let catalog = CardCatalog::standard();
        let seeded = |name: &str| catalog.batch(&[name]);

        let south_hand = seeded("Uruk Shield-Bearer");
        let south_field: Vec<_> = seeded("Canal Saboteur")
            .into_iter()
            .map(|t| t.with_heat(1))
            .collect();

        Self {
            seats: vec![
                SeatConfig::new("North Gate", SeatPosition::Top, ResourcePools::new(3, 2, 1)),
                SeatConfig::new("East Gate", SeatPosition::Right, ResourcePools::new(2, 1, 1)),
                SeatConfig {
                    hand: south_hand,
                    battlefield: south_field,
                    ..SeatConfig::new("South Gate", SeatPosition::Bottom, ResourcePools::new(4, 1, 1))
                        .controlled_by(Controller::Human)
                },
                SeatConfig::new("West Gate", SeatPosition::Left, ResourcePools::new(1, 2, 2)),
            ],
            starting_marks: DEFAULT_STARTING_MARKS,
            opening_phase: Phase::Main,
            opening_seat: 2,
            deal_batch: catalog.standard_deal(),
            rng_seed: 42,
        }
    }
}

impl MatchConfig {
    /// Check structural constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let seats = self.seats.len();
        if seats < 2 {
            return Err(ConfigError::TooFewSeats(seats));
        }
        if seats > 255 {
            return Err(ConfigError::TooManySeats(seats));
        }
        if self.opening_seat >= seats {
            return Err(ConfigError::OpeningSeatOutOfRange {
                seat: self.opening_seat,
                seats,
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration. Missing fields take their
    /// values from the default seed.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Marks a seat starts with.
    #[must_use]
    pub fn marks_for(&self, seat: &SeatConfig) -> u32 {
        seat.marks.unwrap_or(self.starting_marks)
    }
}

/// Builder for `MatchConfig`.
///
/// ```
/// use kudurru_rules::cards::ResourcePools;
/// use kudurru_rules::core::{MatchConfigBuilder, Phase, SeatConfig, SeatPosition};
///
/// let config = MatchConfigBuilder::new()
///     .seat(SeatConfig::new("Attacker", SeatPosition::Bottom, ResourcePools::new(5, 5, 5)))
///     .seat(SeatConfig::new("Defender", SeatPosition::Top, ResourcePools::new(5, 5, 5)))
///     .opening_phase(Phase::Battle)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.seats.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct MatchConfigBuilder {
    config: MatchConfig,
}

impl Default for MatchConfigBuilder {
    fn default() -> Self {
        Self {
            config: MatchConfig {
                seats: Vec::new(),
                starting_marks: DEFAULT_STARTING_MARKS,
                opening_phase: Phase::Main,
                opening_seat: 0,
                deal_batch: CardCatalog::standard().standard_deal(),
                rng_seed: 42,
            },
        }
    }
}

impl MatchConfigBuilder {
    /// Start with no seats, opening on seat 0 in Main.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seat(mut self, seat: SeatConfig) -> Self {
        self.config.seats.push(seat);
        self
    }

    pub fn starting_marks(mut self, marks: u32) -> Self {
        self.config.starting_marks = marks;
        self
    }

    pub fn opening_phase(mut self, phase: Phase) -> Self {
        self.config.opening_phase = phase;
        self
    }

    pub fn opening_seat(mut self, seat: usize) -> Self {
        self.config.opening_seat = seat;
        self
    }

    pub fn deal_batch(mut self, batch: Vec<CardTemplate>) -> Self {
        self.config.deal_batch = batch;
        self
    }

    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.config.rng_seed = seed;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<MatchConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
