//! Combat resolver.
//!
//! An attack is declared by the active player with one ready battlefield
//! card. The defender is always the next seat in turn order.
//!
//! ## Unblocked attacks
//!
//! With no (valid) blockers the attacker's power comes off the defender's
//! marks. Illegal while the defender controls a Taunt card.
//!
//! ## Blocked attacks
//!
//! 1. First strike: an attacker with First Strike distributes its power
//!    across the blockers before anything else happens.
//! 2. Retaliation: every blocker still standing hits the attacker for its
//!    combined power.
//! 3. Normal damage: an attacker without First Strike distributes its power
//!    now, even if retaliation destroyed it.
//!
//! Distribution walks the blockers in declaration order. Each takes its
//! allocation (capped at what is left) or everything left when it has no
//! allocation. A card is destroyed the moment its damage reaches its armor.
//! Power left over after the last blocker is lost; a blocked attack never
//! touches marks.

use smallvec::SmallVec;

use crate::cards::{CardId, Keyword, KeywordSet};
use crate::core::{AttackDeclaration, MatchState, Phase, PlayerId};
use crate::zones::Zone;

use super::error::RulesError;
use super::event::MatchEvent;

type Blockers = SmallVec<[CardId; 4]>;

/// One damage distribution pass.
struct Strike<'a> {
    source: CardId,
    power: u32,
    first_strike: bool,
    declaration: &'a AttackDeclaration,
}

/// Resolve an attack for the active player.
pub fn attack(
    state: &mut MatchState,
    declaration: &AttackDeclaration,
    events: &mut Vec<MatchEvent>,
) -> Result<(), RulesError> {
    if state.phase != Phase::Battle {
        return Err(RulesError::WrongPhase {
            expected: Phase::Battle,
            actual: state.phase,
        });
    }
    let active = state.active_player().ok_or(RulesError::NoActivePlayer)?;
    let attacker = state.players[active]
        .zones
        .find(Zone::Battlefield, declaration.attacker)
        .ok_or(RulesError::AttackerNotFound(declaration.attacker))?;
    if !attacker.is_ready() {
        return Err(RulesError::AttackerNotReady {
            card: attacker.id,
            heat: attacker.heat,
        });
    }
    let attacker_id = attacker.id;
    let power = attacker.power;
    let first_strike = attacker.keywords().has(Keyword::FirstStrike);

    let defender = state.defender_of(active);
    let blockers = live_blockers(state, defender, &declaration.blockers);

    if blockers.is_empty() {
        if !declaration.is_unblocked() {
            tracing::debug!(
                "none of {} declared blocker(s) is on {}'s battlefield; attack is unblocked",
                declaration.blockers.len(),
                defender
            );
        }
        let taunts = state.players[defender].battlefield_with(KeywordSet::TAUNT);
        if taunts > 0 {
            return Err(RulesError::TauntBlocksDirectAttack { defender, taunts });
        }

        let target = &mut state.players[defender];
        let lost = target.lose_marks(power);
        tracing::debug!(
            "{} hits {} directly for {} ({} marks left)",
            attacker_id,
            defender,
            lost,
            target.marks
        );
        events.push(MatchEvent::MarksLost {
            player: defender,
            amount: lost,
            remaining: target.marks,
        });
        return Ok(());
    }

    tracing::debug!(
        "{} attacks into {} blocker(s) of {}",
        attacker_id,
        blockers.len(),
        defender
    );

    let strike = Strike {
        source: attacker_id,
        power,
        first_strike,
        declaration,
    };

    if first_strike {
        distribute(state, defender, &blockers, &strike, events);
    }

    let retaliation: u32 = blockers
        .iter()
        .filter_map(|&id| state.players[defender].zones.find(Zone::Battlefield, id))
        .map(|blocker| blocker.power)
        .sum();
    if retaliation > 0 {
        retaliate(state, active, attacker_id, retaliation, &blockers, defender, events);
    }

    if !first_strike {
        distribute(state, defender, &blockers, &strike, events);
    }

    Ok(())
}

/// Declared blockers that are on the defender's battlefield, in
/// declaration order, without repeats.
///
/// Older servers walked blockers in battlefield order instead.
fn live_blockers(state: &MatchState, defender: PlayerId, declared: &[CardId]) -> Blockers {
    let zones = &state.players[defender].zones;
    let mut live = Blockers::new();
    for &id in declared {
        if !live.contains(&id) && zones.contains(Zone::Battlefield, id) {
            live.push(id);
        }
    }
    live
}

fn distribute(
    state: &mut MatchState,
    defender: PlayerId,
    blockers: &[CardId],
    strike: &Strike<'_>,
    events: &mut Vec<MatchEvent>,
) {
    let zones = &mut state.players[defender].zones;
    let source = strike.source;
    let mut remaining = strike.power;

    for &id in blockers {
        let Some(blocker) = zones.find_mut(Zone::Battlefield, id) else {
            continue;
        };
        let amount = strike
            .declaration
            .allocation_for(id)
            .map_or(remaining, |allocated| allocated.min(remaining));
        let lethal = blocker.take_damage(amount);
        remaining -= amount;
        events.push(MatchEvent::DamageDealt {
            source,
            target: id,
            amount,
            first_strike: strike.first_strike,
        });

        if lethal {
            zones.move_card(id, Zone::Battlefield, Zone::Discard);
            tracing::debug!("{} destroyed by {}", id, source);
            events.push(MatchEvent::CardDestroyed {
                owner: defender,
                card: id,
            });
        }
        if remaining == 0 {
            break;
        }
    }

    if remaining > 0 {
        tracing::debug!("{} excess damage from {} is lost", remaining, source);
    }
}

fn retaliate(
    state: &mut MatchState,
    owner: PlayerId,
    attacker: CardId,
    amount: u32,
    blockers: &[CardId],
    defender: PlayerId,
    events: &mut Vec<MatchEvent>,
) {
    let zones = &mut state.players[owner].zones;
    let Some(card) = zones.find_mut(Zone::Battlefield, attacker) else {
        return;
    };
    let lethal = card.take_damage(amount);

    let standing = &state.players[defender].zones;
    for blocker in blockers
        .iter()
        .filter_map(|&id| standing.find(Zone::Battlefield, id))
        .filter(|blocker| blocker.power > 0)
    {
        events.push(MatchEvent::DamageDealt {
            source: blocker.id,
            target: attacker,
            amount: blocker.power,
            first_strike: false,
        });
    }

    if lethal {
        state.players[owner]
            .zones
            .move_card(attacker, Zone::Battlefield, Zone::Discard);
        tracing::debug!("attacker {} destroyed in retaliation", attacker);
        events.push(MatchEvent::CardDestroyed {
            owner,
            card: attacker,
        });
    }
}
