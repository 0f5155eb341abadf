//! The match engine.
//!
//! `MatchEngine` owns one match: its configuration, state, pending-effect
//! stack and derived outcome. Every verb runs to completion before it
//! returns. A rejected verb returns the reason and changes nothing.
//!
//! After every accepted verb the engine:
//! - Records the action in the match history
//! - Re-evaluates the outcome
//! - Keeps the emitted events for `last_events`

use serde_json::Value;

use crate::cards::CardId;
use crate::core::{
    Action, AttackDeclaration, ConfigError, MatchConfig, MatchSnapshot, MatchState, PlayerId,
};
use crate::stack::{PriorityStack, StackEntry};

use super::error::RulesError;
use super::event::MatchEvent;
use super::outcome::MatchOutcome;
use super::{combat, phase, play};

/// Authoritative handle for one match.
///
/// ```
/// use kudurru_rules::core::Phase;
/// use kudurru_rules::rules::MatchEngine;
///
/// let mut engine = MatchEngine::default();
/// let state = engine.play_card(None).unwrap();
///
/// assert_eq!(state.phase, Phase::Main);
/// assert!(state.players[2].zones.hand.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct MatchEngine {
    config: MatchConfig,
    state: MatchState,
    stack: PriorityStack,
    outcome: MatchOutcome,
    last_events: Vec<MatchEvent>,
}

impl Default for MatchEngine {
    /// An engine seeded with the four-gate match.
    fn default() -> Self {
        Self::seeded(MatchConfig::default())
    }
}

impl MatchEngine {
    /// Create an engine for a validated configuration.
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::seeded(config))
    }

    fn seeded(config: MatchConfig) -> Self {
        let state = MatchState::from_config(&config);
        let outcome = MatchOutcome::evaluate(&state);
        Self {
            config,
            state,
            stack: PriorityStack::new(),
            outcome,
            last_events: Vec::new(),
        }
    }

    // === Reads ===

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// The raw state, exactly as the last verb left it.
    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[must_use]
    pub fn outcome(&self) -> MatchOutcome {
        self.outcome
    }

    /// Snapshot without advancing pass-through phases.
    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::capture(&self.state, self.outcome.winner())
    }

    /// Events produced by the most recent accepted verb.
    #[must_use]
    pub fn last_events(&self) -> &[MatchEvent] {
        &self.last_events
    }

    /// Pending stack entries, bottom first.
    #[must_use]
    pub fn stack(&self) -> &[StackEntry] {
        self.stack.entries()
    }

    /// Read the match, first stepping through Upkeep and End so the
    /// returned phase always offers the active player a choice.
    pub fn get_state(&mut self) -> MatchSnapshot {
        if self.state.phase.is_pass_through() {
            let mut events = Vec::new();
            while self.state.phase.is_pass_through() {
                let actor = self.state.active_player();
                phase::end_phase(&mut self.state, &mut events);
                self.state.record(actor, Action::EndPhase);
            }
            self.commit(events);
        }
        self.snapshot()
    }

    // === Verbs ===

    /// Play a card from the active player's hand (the first card when
    /// `card` is `None`).
    pub fn play_card(&mut self, card: Option<CardId>) -> Result<MatchSnapshot, RulesError> {
        let actor = self.state.active_player();
        let mut events = Vec::new();
        let played = play::play_card(&mut self.state, card, &mut events).map_err(|err| {
            tracing::warn!("playCard rejected: {}", err);
            err
        })?;

        self.state.record(actor, Action::PlayCard { card: Some(played) });
        self.commit(events);
        Ok(self.snapshot())
    }

    /// Advance one phase.
    pub fn end_phase(&mut self) -> MatchSnapshot {
        let actor = self.state.active_player();
        let mut events = Vec::new();
        phase::end_phase(&mut self.state, &mut events);
        tracing::debug!("phase is now {}", self.state.phase);

        self.state.record(actor, Action::EndPhase);
        self.commit(events);
        self.snapshot()
    }

    /// Declare an attack.
    pub fn attack(&mut self, declaration: AttackDeclaration) -> Result<MatchSnapshot, RulesError> {
        let actor = self.state.active_player();
        let mut events = Vec::new();
        combat::attack(&mut self.state, &declaration, &mut events).map_err(|err| {
            tracing::warn!("attack with {} rejected: {}", declaration.attacker, err);
            err
        })?;

        self.state.record(actor, Action::Attack(declaration));
        self.commit(events);
        Ok(self.snapshot())
    }

    /// Append the configured deal batch to every player's hand.
    pub fn deal_cards(&mut self) -> MatchSnapshot {
        let actor = self.state.active_player();
        let mut events = Vec::new();
        let ids: Vec<PlayerId> = self.state.players.iter().map(|(id, _)| id).collect();

        for player in ids {
            for template in &self.config.deal_batch {
                let card = template.instantiate(self.state.alloc_card_id());
                self.state.players[player].zones.hand.push_back(card);
            }
            events.push(MatchEvent::CardsDealt {
                player,
                count: self.config.deal_batch.len(),
            });
        }
        tracing::debug!(
            "dealt {} card(s) to each of {} players",
            self.config.deal_batch.len(),
            self.state.player_count()
        );

        self.state.record(actor, Action::DealCards);
        self.commit(events);
        self.snapshot()
    }

    /// Reseed the match from its configuration and clear the stack.
    pub fn reset_game(&mut self) -> MatchSnapshot {
        self.state = MatchState::from_config(&self.config);
        self.stack.clear();
        self.outcome = MatchOutcome::evaluate(&self.state);
        tracing::info!("match reset ({} seats)", self.state.player_count());

        let actor = self.state.active_player();
        self.state.record(actor, Action::Reset);
        self.commit(vec![MatchEvent::MatchReset]);
        self.snapshot()
    }

    /// Apply a verb given as data.
    pub fn apply(&mut self, action: &Action) -> Result<MatchSnapshot, RulesError> {
        match action {
            Action::PlayCard { card } => self.play_card(*card),
            Action::EndPhase => Ok(self.end_phase()),
            Action::Attack(declaration) => self.attack(declaration.clone()),
            Action::DealCards => Ok(self.deal_cards()),
            Action::Reset => Ok(self.reset_game()),
        }
    }

    // === Priority stack ===

    /// Push an entry and return the whole stack.
    pub fn push_stack(&mut self, kind: impl Into<String>, payload: Value) -> &[StackEntry] {
        let id = self.stack.push(kind, payload);
        tracing::debug!("pushed {} ({} pending)", id, self.stack.len());
        self.stack.entries()
    }

    /// Push an entry in its JSON wire form and return the whole stack.
    pub fn push_stack_json(&mut self, entry: Value) -> &[StackEntry] {
        let id = self.stack.push_json(entry);
        tracing::debug!("pushed {} ({} pending)", id, self.stack.len());
        self.stack.entries()
    }

    /// Pop the most recent entry and return what remains.
    pub fn resolve_stack(&mut self) -> &[StackEntry] {
        if let Some(entry) = self.stack.pop() {
            tracing::debug!("resolved {} ({})", entry.id, entry.kind);
        }
        self.stack.entries()
    }

    /// Acknowledge a priority pass. Nothing resolves.
    pub fn pass_priority(&self) {
        tracing::debug!("priority passed with {} entries pending", self.stack.len());
    }

    // === Internals ===

    fn commit(&mut self, mut events: Vec<MatchEvent>) {
        let before = self.outcome;
        self.outcome = MatchOutcome::evaluate(&self.state);

        if let (false, MatchOutcome::Won(winner)) = (before.is_over(), self.outcome) {
            tracing::info!("game over: {} wins on turn {}", winner, self.state.turn_number);
            events.push(MatchEvent::GameWon { winner });
        }
        self.last_events = events;
    }
}
