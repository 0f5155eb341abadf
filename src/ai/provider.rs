//! Decision providers.
//!
//! - `GreedyProvider`: deterministic, always takes the strongest option
//! - `RandomProvider`: uniform over legal decisions from a seeded stream
//! - `JsonProvider`: wraps an external source that answers in the JSON
//!   wire form

use crate::core::{GameRng, PlayerId};

use super::decision::{Decision, DecisionContext, DecisionError};

/// Chooses the next decision for a bot seat.
pub trait DecisionProvider: Send {
    /// Decide for the active player described by `context`.
    fn decide(&mut self, context: &DecisionContext) -> Result<Decision, DecisionError>;
}

/// Plays the most powerful affordable card, then attacks with the most
/// powerful ready card, then ends the phase.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyProvider;

impl DecisionProvider for GreedyProvider {
    fn decide(&mut self, context: &DecisionContext) -> Result<Decision, DecisionError> {
        let strength = |decision: &Decision| {
            let card = match decision {
                Decision::Play(card) => context.hand.iter().find(|c| c.id == *card),
                Decision::Attack { attacker, .. } => {
                    context.battlefield.iter().find(|c| c.id == *attacker)
                }
                Decision::End => None,
            };
            card.map(|c| c.power)
        };

        // Ties keep the earliest candidate.
        let best = context
            .legal_decisions()
            .into_iter()
            .filter_map(|decision| strength(&decision).map(|power| (power, decision)))
            .fold(None, |best: Option<(u32, Decision)>, (power, decision)| match best {
                Some((top, _)) if top >= power => best,
                _ => Some((power, decision)),
            });

        Ok(best.map_or(Decision::End, |(_, decision)| decision))
    }
}

/// Picks uniformly among legal decisions.
#[derive(Clone, Debug)]
pub struct RandomProvider {
    rng: GameRng,
}

impl RandomProvider {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    /// A provider with the seat's own stream of the match seed.
    #[must_use]
    pub fn for_seat(seed: u64, seat: PlayerId) -> Self {
        Self {
            rng: GameRng::new(seed).for_seat(seat),
        }
    }
}

impl DecisionProvider for RandomProvider {
    fn decide(&mut self, context: &DecisionContext) -> Result<Decision, DecisionError> {
        let decisions = context.legal_decisions();
        Ok(self.rng.choose(&decisions).copied().unwrap_or(Decision::End))
    }
}

/// Adapts an external decision source.
///
/// The source receives the context and returns the raw JSON reply, or an
/// error message when it could not be reached.
pub struct JsonProvider<F> {
    source: F,
}

impl<F> JsonProvider<F>
where
    F: FnMut(&DecisionContext) -> Result<String, String> + Send,
{
    pub fn new(source: F) -> Self {
        Self { source }
    }
}

impl<F> DecisionProvider for JsonProvider<F>
where
    F: FnMut(&DecisionContext) -> Result<String, String> + Send,
{
    fn decide(&mut self, context: &DecisionContext) -> Result<Decision, DecisionError> {
        let reply = (self.source)(context).map_err(DecisionError::Unavailable)?;
        Decision::parse_json(&reply)
    }
}
