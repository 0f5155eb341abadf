//! Win evaluation.

use serde::{Deserialize, Serialize};

use crate::core::{MatchState, PlayerId};

/// Whether the match is still being contested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// Zero or several players still have marks.
    #[default]
    InProgress,
    /// Exactly one player has marks left.
    Won(PlayerId),
}

impl MatchOutcome {
    /// Evaluate a state: the match is won when exactly one player is alive.
    ///
    /// A table where every player hit zero at once stays in progress.
    #[must_use]
    pub fn evaluate(state: &MatchState) -> Self {
        let mut alive = state
            .players
            .iter()
            .filter(|(_, player)| player.is_alive())
            .map(|(id, _)| id);

        match (alive.next(), alive.next()) {
            (Some(winner), None) => MatchOutcome::Won(winner),
            _ => MatchOutcome::InProgress,
        }
    }

    #[must_use]
    pub fn is_over(self) -> bool {
        matches!(self, MatchOutcome::Won(_))
    }

    #[must_use]
    pub fn winner(self) -> Option<PlayerId> {
        match self {
            MatchOutcome::Won(winner) => Some(winner),
            MatchOutcome::InProgress => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MatchConfig;

    fn state_with_marks(marks: &[u32]) -> MatchState {
        let mut state = MatchState::from_config(&MatchConfig::default());
        for ((_, player), &m) in state.players.iter_mut().zip(marks) {
            player.marks = m;
        }
        state
    }

    #[test]
    fn test_seed_is_in_progress() {
        let state = MatchState::from_config(&MatchConfig::default());
        assert_eq!(MatchOutcome::evaluate(&state), MatchOutcome::InProgress);
    }

    #[test]
    fn test_single_survivor_wins() {
        let outcome = MatchOutcome::evaluate(&state_with_marks(&[0, 0, 4, 0]));

        assert_eq!(outcome, MatchOutcome::Won(PlayerId::new(2)));
        assert_eq!(outcome.winner(), Some(PlayerId::new(2)));
    }

    #[test]
    fn test_two_survivors_continue() {
        let outcome = MatchOutcome::evaluate(&state_with_marks(&[0, 1, 4, 0]));
        assert!(!outcome.is_over());
    }

    #[test]
    fn test_no_survivors_is_not_game_over() {
        let outcome = MatchOutcome::evaluate(&state_with_marks(&[0, 0, 0, 0]));

        assert_eq!(outcome, MatchOutcome::InProgress);
        assert_eq!(outcome.winner(), None);
    }
}
