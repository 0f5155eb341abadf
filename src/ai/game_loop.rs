//! Autonomous game loop.
//!
//! The loop plays bot seats through the same verb interface human callers
//! use. Each tick:
//! 1. Reads the match (stepping through pass-through phases)
//! 2. Stops if the match is won
//! 3. Waits if the active seat is human
//! 4. Asks the seat's provider for a decision and applies it
//!
//! A decision that cannot be produced or is rejected by the rules ends the
//! phase instead, so a confused bot never stalls the match.
//!
//! Human callers and the loop share the match through `SharedMatch`; every
//! verb, and every whole tick, runs under its lock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rustc_hash::FxHashMap;

use crate::core::{Controller, PlayerId};
use crate::rules::MatchEngine;

use super::decision::{Decision, DecisionContext};
use super::provider::{DecisionProvider, GreedyProvider};

/// A match engine shared between callers, one writer at a time.
#[derive(Clone, Debug)]
pub struct SharedMatch {
    inner: Arc<Mutex<MatchEngine>>,
}

impl SharedMatch {
    pub fn new(engine: MatchEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Exclusive access to the engine.
    ///
    /// Verbs never leave the engine half-mutated, so a lock poisoned by a
    /// panicking holder is still safe to use.
    pub fn lock(&self) -> MutexGuard<'_, MatchEngine> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with<R>(&self, f: impl FnOnce(&mut MatchEngine) -> R) -> R {
        f(&mut self.lock())
    }
}

/// What one tick did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The match has a winner; nothing was done.
    GameOver(PlayerId),
    /// No seat is active; nothing was done.
    NoActivePlayer,
    /// The active seat is human; nothing was done.
    AwaitingHuman(PlayerId),
    /// The bot's decision was applied.
    Applied { seat: PlayerId, decision: Decision },
    /// The bot's decision was unusable and the phase was ended instead.
    Degraded { seat: PlayerId, reason: String },
}

/// Why a run stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: usize,
    pub last: Option<TickOutcome>,
}

impl RunSummary {
    /// Winner, if the run ended the match.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.last {
            Some(TickOutcome::GameOver(winner)) => Some(winner),
            _ => None,
        }
    }
}

/// Cooperative scheduler driving bot seats.
pub struct GameLoop {
    shared: SharedMatch,
    default_provider: Box<dyn DecisionProvider>,
    seat_providers: FxHashMap<PlayerId, Box<dyn DecisionProvider>>,
}

impl GameLoop {
    /// A loop where every bot seat plays greedily.
    pub fn new(shared: SharedMatch) -> Self {
        Self::with_provider(shared, GreedyProvider)
    }

    /// A loop where every bot seat uses `provider`.
    pub fn with_provider(shared: SharedMatch, provider: impl DecisionProvider + 'static) -> Self {
        Self {
            shared,
            default_provider: Box::new(provider),
            seat_providers: FxHashMap::default(),
        }
    }

    /// Give one seat its own provider (builder pattern).
    #[must_use]
    pub fn seat_provider(
        mut self,
        seat: PlayerId,
        provider: impl DecisionProvider + 'static,
    ) -> Self {
        self.seat_providers.insert(seat, Box::new(provider));
        self
    }

    /// The shared match this loop drives.
    #[must_use]
    pub fn shared(&self) -> &SharedMatch {
        &self.shared
    }

    /// Run one step.
    pub fn tick(&mut self) -> TickOutcome {
        let mut engine = self.shared.lock();

        let snapshot = engine.get_state();
        if let Some(winner) = snapshot.winner_id {
            return TickOutcome::GameOver(winner);
        }
        let Some(context) = DecisionContext::from_snapshot(&snapshot) else {
            return TickOutcome::NoActivePlayer;
        };
        let seat = context.player.id;
        if context.player.controller == Controller::Human {
            return TickOutcome::AwaitingHuman(seat);
        }

        tracing::debug!("bot turn: {} ({} phase)", context.player.name, context.phase);
        let provider = match self.seat_providers.get_mut(&seat) {
            Some(provider) => provider,
            None => &mut self.default_provider,
        };

        let decision = match provider.decide(&context) {
            Ok(decision) => decision,
            Err(err) => {
                tracing::warn!("{} could not decide ({}), ending phase", seat, err);
                engine.end_phase();
                return TickOutcome::Degraded {
                    seat,
                    reason: err.to_string(),
                };
            }
        };
        tracing::debug!("{} decided {:?}", seat, decision);

        match engine.apply(&decision.into_action()) {
            Ok(_) => TickOutcome::Applied { seat, decision },
            Err(err) => {
                tracing::warn!("{} decision {:?} rejected ({}), ending phase", seat, decision, err);
                engine.end_phase();
                TickOutcome::Degraded {
                    seat,
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Tick until the match is won, a human must act, no seat is active,
    /// or `max_ticks` is reached.
    pub fn run(&mut self, max_ticks: usize) -> RunSummary {
        let mut summary = RunSummary {
            ticks: 0,
            last: None,
        };

        while summary.ticks < max_ticks {
            let outcome = self.tick();
            summary.ticks += 1;
            let done = matches!(
                outcome,
                TickOutcome::GameOver(_)
                    | TickOutcome::AwaitingHuman(_)
                    | TickOutcome::NoActivePlayer
            );
            summary.last = Some(outcome);
            if done {
                break;
            }
        }

        summary
    }

    /// Run on a background thread, ticking every `interval` until the
    /// match is won or the handle is stopped. Human turns are polled.
    pub fn spawn(mut self, interval: Duration) -> LoopHandle {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            tracing::info!("game loop started");
            while !flag.load(Ordering::Acquire) {
                if let TickOutcome::GameOver(winner) = self.tick() {
                    tracing::info!("game over, {} wins; loop stopping", winner);
                    break;
                }
                thread::park_timeout(interval);
            }
            tracing::info!("game loop stopped");
            self
        });

        LoopHandle { stop, handle }
    }
}

/// Handle to a spawned game loop.
pub struct LoopHandle {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<GameLoop>,
}

impl LoopHandle {
    /// True once the loop thread has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop the loop and wait for it, getting the loop back.
    ///
    /// Returns `None` if the loop thread panicked.
    pub fn stop(self) -> Option<GameLoop> {
        self.stop.store(true, Ordering::Release);
        self.handle.thread().unpark();
        self.handle.join().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::JsonProvider;
    use crate::core::{MatchConfig, Phase};

    fn all_bots() -> MatchEngine {
        let mut config = MatchConfig::default();
        for seat in &mut config.seats {
            seat.controller = Controller::Bot;
        }
        MatchEngine::new(config).unwrap()
    }

    #[test]
    fn test_human_turn_waits() {
        let shared = SharedMatch::new(MatchEngine::default());
        let mut game_loop = GameLoop::new(shared.clone());

        assert_eq!(game_loop.tick(), TickOutcome::AwaitingHuman(PlayerId::new(2)));
        assert!(shared.lock().state().history.is_empty());
    }

    #[test]
    fn test_bot_turn_applies_decision() {
        let shared = SharedMatch::new(all_bots());
        let mut game_loop = GameLoop::new(shared.clone());

        let outcome = game_loop.tick();

        assert!(matches!(outcome, TickOutcome::Applied { seat, .. } if seat == PlayerId::new(2)));
        assert!(shared.lock().state().players[PlayerId::new(2)].zones.hand.is_empty());
    }

    #[test]
    fn test_malformed_decision_ends_phase() {
        let shared = SharedMatch::new(all_bots());
        let provider = JsonProvider::new(|_: &DecisionContext| Ok("not json".to_string()));
        let mut game_loop = GameLoop::with_provider(shared.clone(), provider);

        let outcome = game_loop.tick();

        assert!(matches!(outcome, TickOutcome::Degraded { .. }));
        assert_eq!(shared.lock().state().phase, Phase::Battle);
    }

    #[test]
    fn test_rejected_decision_ends_phase() {
        let shared = SharedMatch::new(all_bots());
        // c2 is on the battlefield, so playing it is rejected.
        let provider = JsonProvider::new(|_: &DecisionContext| {
            Ok(r#"{"action":"play","cardId":"c2"}"#.to_string())
        });
        let mut game_loop = GameLoop::with_provider(shared.clone(), provider);

        let outcome = game_loop.tick();

        assert!(matches!(outcome, TickOutcome::Degraded { .. }));
        assert_eq!(shared.lock().state().phase, Phase::Battle);
    }

    #[test]
    fn test_seat_provider_override() {
        let shared = SharedMatch::new(all_bots());
        let offline = JsonProvider::new(|_: &DecisionContext| Err("offline".to_string()));
        let mut game_loop = GameLoop::new(shared).seat_provider(PlayerId::new(2), offline);

        assert_eq!(
            game_loop.tick(),
            TickOutcome::Degraded {
                seat: PlayerId::new(2),
                reason: "decision provider unavailable: offline".to_string()
            }
        );
    }

    #[test]
    fn test_run_stops_at_human() {
        let shared = SharedMatch::new(MatchEngine::default());
        shared.with(|engine| {
            engine.end_phase();
            engine.end_phase();
            engine.end_phase();
        });
        let mut game_loop = GameLoop::new(shared);

        let summary = game_loop.run(500);

        assert_eq!(summary.last, Some(TickOutcome::AwaitingHuman(PlayerId::new(2))));
        assert!(summary.ticks < 500);
    }
}
