//! Phase controller.
//!
//! `end_phase` steps the phase machine one state forward. Leaving End
//! hands the turn to the next seat:
//! 1. The next seat in turn order becomes the only active player
//! 2. Its pools refill to their maximum
//! 3. Its battlefield cards lose 1 heat (floored at 0)
//! 4. The turn counter advances and the phase is Upkeep

use crate::core::{MatchState, Phase, PlayerId};

use super::event::MatchEvent;

/// Advance one phase. Never rejected.
pub fn end_phase(state: &mut MatchState, events: &mut Vec<MatchEvent>) {
    let vacated = state.phase;
    state.phase = vacated.next();
    events.push(MatchEvent::PhaseChanged {
        from: vacated,
        to: state.phase,
    });

    if vacated == Phase::End {
        rotate(state, events);
    }
}

/// Step through Upkeep and End until the match rests in a phase where the
/// active player has choices. Returns the number of steps taken.
pub fn advance_pass_through(state: &mut MatchState, events: &mut Vec<MatchEvent>) -> usize {
    let mut steps = 0;
    while state.phase.is_pass_through() {
        end_phase(state, events);
        steps += 1;
    }
    steps
}

fn rotate(state: &mut MatchState, events: &mut Vec<MatchEvent>) {
    let previous = state.active_player();
    let next = match previous {
        Some(current) => state.players.next_after(current),
        None => PlayerId::new(0),
    };

    for (id, player) in state.players.iter_mut() {
        player.is_active = id == next;
        if id == next {
            player.resources = player.max_resources;
            for card in player.zones.battlefield_mut() {
                card.heat = card.heat.saturating_sub(1);
            }
        }
    }

    state.phase = Phase::Upkeep;
    state.turn_number += 1;

    tracing::info!("turn {} begins for {}", state.turn_number, next);
    events.push(MatchEvent::TurnPassed {
        from: previous,
        to: next,
        turn: state.turn_number,
    });
}
