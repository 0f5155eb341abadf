//! Card play resolver.
//!
//! Moves a card from the active player's hand into play. Every
//! precondition is checked before the first mutation, so a rejected play
//! leaves the match untouched.

use crate::cards::{CardId, Keyword};
use crate::core::{MatchState, Phase};
use crate::zones::Zone;

use super::error::RulesError;
use super::event::MatchEvent;

/// Play `card` (or the first card in hand) for the active player.
///
/// Costs are paid in full. Sites go to the sites zone ready to use; other
/// cards go to the battlefield with 1 heat unless they have Haste.
pub fn play_card(
    state: &mut MatchState,
    card: Option<CardId>,
    events: &mut Vec<MatchEvent>,
) -> Result<CardId, RulesError> {
    if state.phase != Phase::Main {
        return Err(RulesError::WrongPhase {
            expected: Phase::Main,
            actual: state.phase,
        });
    }
    let active = state.active_player().ok_or(RulesError::NoActivePlayer)?;
    let player = &state.players[active];

    let hand = player.zones.cards(Zone::Hand);
    let chosen = match card {
        _ if hand.is_empty() => return Err(RulesError::EmptyHand),
        Some(id) => player
            .zones
            .find(Zone::Hand, id)
            .ok_or(RulesError::CardNotInHand(id))?,
        None => hand.front().ok_or(RulesError::EmptyHand)?,
    };
    let id = chosen.id;
    let remaining =
        player
            .resources
            .after_paying(&chosen.cost)
            .ok_or(RulesError::InsufficientResources {
                card: id,
                cost: chosen.cost,
                available: player.resources,
            })?;

    let player = &mut state.players[active];
    let mut played = player
        .zones
        .remove(Zone::Hand, id)
        .ok_or(RulesError::CardNotInHand(id))?;
    player.resources = remaining;

    let zone = if played.is_site() {
        played.heat = 0;
        Zone::Sites
    } else {
        played.heat = if played.keywords().has(Keyword::Haste) { 0 } else { 1 };
        Zone::Battlefield
    };
    let heat = played.heat;

    tracing::debug!("{} plays {} ({}) to {}", active, id, played.name, zone);
    player.zones.push(zone, played);
    events.push(MatchEvent::CardPlayed {
        player: active,
        card: id,
        zone,
        heat,
    });

    Ok(id)
}
