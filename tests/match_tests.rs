//! Match lifecycle integration tests against the four-gate seed.
//!
//! Seats: North (p1), East (p2), South (p3, human, opening), West (p4).
//! South opens in Main holding c1 (Uruk Shield-Bearer) and fielding c2
//! (Canal Saboteur, heat 1).

use kudurru_rules::cards::{CardId, ResourcePools};
use kudurru_rules::core::{Action, MatchConfig, MatchSnapshot, MatchState, Phase, PlayerId};
use kudurru_rules::rules::{MatchEngine, MatchEvent, RulesError};
use kudurru_rules::zones::Zone;

const NORTH: PlayerId = PlayerId::new(0);
const SOUTH: PlayerId = PlayerId::new(2);
const WEST: PlayerId = PlayerId::new(3);

/// From Main, step through Battle and End into the next seat's Upkeep.
fn finish_turn(engine: &mut MatchEngine) {
    engine.get_state();
    engine.end_phase();
    engine.end_phase();
    engine.end_phase();
}

// =============================================================================
// Phases and turns
// =============================================================================

/// Leaving End rotates the turn, refreshes the new seat, and the next read
/// lands in Main.
#[test]
fn test_end_phase_rotation() {
    let mut engine = MatchEngine::default();
    engine.end_phase();
    engine.end_phase();
    assert_eq!(engine.snapshot().phase, Phase::End);

    let state = engine.end_phase();

    assert_eq!(state.phase, Phase::Upkeep);
    assert_eq!(state.turn_number, 2);
    assert_eq!(state.active_player().map(|p| p.id), Some(WEST));
    assert_eq!(engine.get_state().phase, Phase::Main);
}

/// A full round brings South back with refilled pools and cooled cards.
#[test]
fn test_full_round_refreshes_and_cools() {
    let mut engine = MatchEngine::default();
    engine.play_card(Some(CardId::new(1))).unwrap();
    assert_eq!(
        engine.state().players[SOUTH].resources,
        ResourcePools::new(2, 1, 1)
    );

    for _ in 0..4 {
        finish_turn(&mut engine);
    }

    let state = engine.snapshot();
    let south = state.player(SOUTH).unwrap();
    assert_eq!(state.phase, Phase::Upkeep);
    assert_eq!(state.turn_number, 5);
    assert!(south.is_active);
    assert_eq!(south.resources, ResourcePools::new(4, 1, 1));
    assert!(south.zones.battlefield.iter().all(|card| card.heat == 0));
}

/// Exactly one seat is active after any number of phase steps.
#[test]
fn test_single_active_seat() {
    let mut engine = MatchEngine::default();

    for _ in 0..23 {
        let state = engine.end_phase();
        assert_eq!(state.players.iter().filter(|p| p.is_active).count(), 1);
    }
}

/// Turns go round from the last seat to the first.
#[test]
fn test_rotation_wraps() {
    let mut engine = MatchEngine::default();
    finish_turn(&mut engine);
    finish_turn(&mut engine);

    let state = engine.get_state();

    assert_eq!(state.active_player().map(|p| p.id), Some(NORTH));
}

// =============================================================================
// Card play
// =============================================================================

/// Playing outside Main is rejected.
#[test]
fn test_play_card_wrong_phase() {
    let mut engine = MatchEngine::default();
    engine.end_phase();

    assert_eq!(
        engine.play_card(None),
        Err(RulesError::WrongPhase {
            expected: Phase::Main,
            actual: Phase::Battle
        })
    );
}

/// Omitting the card plays the first card in hand.
#[test]
fn test_play_card_defaults_to_first() {
    let mut engine = MatchEngine::default();
    engine.deal_cards();

    engine.play_card(None).unwrap();

    let south = &engine.state().players[SOUTH];
    assert_eq!(south.zones.locate(CardId::new(1)), Some(Zone::Battlefield));
    assert_eq!(south.zones.hand.len(), 6);
}

/// A site is ready immediately and never touches the battlefield.
#[test]
fn test_site_goes_to_sites() {
    let mut engine = MatchEngine::default();
    engine.deal_cards();
    engine.end_phase();
    engine.end_phase();
    engine.end_phase();
    engine.get_state();

    // West (1/2/2) can afford the Ancient Temple (0/2/1).
    let temple = engine.state().players[WEST]
        .zones
        .hand
        .iter()
        .find(|card| card.name == "Ancient Temple")
        .map(|card| card.id)
        .unwrap();
    engine.play_card(Some(temple)).unwrap();

    let west = &engine.state().players[WEST];
    assert_eq!(west.zones.locate(temple), Some(Zone::Sites));
    assert_eq!(west.zones.find(Zone::Sites, temple).map(|c| c.heat), Some(0));
    assert_eq!(west.resources, ResourcePools::new(1, 0, 1));
}

// =============================================================================
// Deal, reset, history
// =============================================================================

/// Dealing appends the batch to every hand, in catalog order.
#[test]
fn test_deal_cards() {
    let mut engine = MatchEngine::default();
    let batch: Vec<String> = engine
        .config()
        .deal_batch
        .iter()
        .map(|t| t.name.clone())
        .collect();

    let state = engine.deal_cards();

    for player in &state.players {
        let tail: Vec<&str> = player
            .zones
            .hand
            .iter()
            .rev()
            .take(batch.len())
            .rev()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(tail, batch);
    }
    let dealt = engine
        .last_events()
        .iter()
        .filter(|e| matches!(e, MatchEvent::CardsDealt { count: 6, .. }))
        .count();
    assert_eq!(dealt, 4);
}

/// Card IDs stay unique across deals.
#[test]
fn test_card_ids_unique() {
    let mut engine = MatchEngine::default();
    engine.deal_cards();
    engine.deal_cards();

    let mut ids: Vec<CardId> = engine
        .state()
        .players
        .values()
        .flat_map(|p| p.zones.hand.iter().chain(p.zones.battlefield.iter()))
        .map(|c| c.id)
        .collect();
    let total = ids.len();
    ids.sort_by_key(|id| id.raw());
    ids.dedup();

    assert_eq!(ids.len(), total);
}

/// Resetting twice gives the same state.
#[test]
fn test_reset_idempotent() {
    let mut engine = MatchEngine::default();
    engine.deal_cards();
    engine.play_card(None).unwrap();
    engine.end_phase();

    let first = engine.reset_game();
    let first_bytes = engine.state().encode().unwrap();
    let second = engine.reset_game();
    let second_bytes = engine.state().encode().unwrap();

    assert_eq!(first, second);
    assert_eq!(first_bytes, second_bytes);
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(MatchEngine::default().snapshot()).unwrap()
    );
}

/// Reset leaves a single Reset record in the history.
#[test]
fn test_reset_history() {
    let mut engine = MatchEngine::default();
    engine.end_phase();
    engine.reset_game();

    let history = &engine.state().history;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action, Action::Reset);
    assert_eq!(history[0].player, Some(SOUTH));
    assert_eq!(history[0].sequence, 0);
}

/// Auto-advanced steps are recorded like explicit ones.
#[test]
fn test_history_includes_auto_advance() {
    let mut engine = MatchEngine::default();
    engine.end_phase();
    engine.end_phase();
    engine.get_state();

    let actions: Vec<&str> = engine
        .state()
        .history
        .iter()
        .map(|r| r.action.verb())
        .collect();
    assert_eq!(actions, vec!["endPhase"; 4]);
    assert_eq!(engine.state().history[3].player, Some(WEST));
}

// =============================================================================
// Snapshots
// =============================================================================

/// The snapshot JSON uses the wire field names.
#[test]
fn test_snapshot_json_shape() {
    let snapshot = MatchEngine::default().snapshot();

    let json = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(json["phase"], "Main");
    assert_eq!(json["gameOver"], false);
    assert!(json["winnerId"].is_null());
    assert_eq!(json["players"].as_array().map(Vec::len), Some(4));
    assert_eq!(json["players"][2]["isActive"], true);
    assert_eq!(json["players"][2]["marks"], 10);

    let back: MatchSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(back, snapshot);
}

/// A checkpoint decodes to the same state.
#[test]
fn test_state_checkpoint() {
    let mut engine = MatchEngine::default();
    engine.deal_cards();
    engine.play_card(None).unwrap();

    let bytes = engine.state().encode().unwrap();

    assert_eq!(&MatchState::decode(&bytes).unwrap(), engine.state());
}

/// Matches are independent.
#[test]
fn test_engines_are_independent() {
    let mut a = MatchEngine::default();
    let b = MatchEngine::default();

    a.play_card(None).unwrap();

    assert_ne!(a.state(), b.state());
    assert_eq!(b.state().players[SOUTH].zones.hand.len(), 1);
}

/// Configurations load from JSON with defaults filled in.
#[test]
fn test_engine_from_json_config() {
    let config = MatchConfig::from_json_str(r#"{ "startingMarks": 3, "openingSeat": 0 }"#).unwrap();

    let mut engine = MatchEngine::new(config).unwrap();
    let state = engine.get_state();

    assert!(state.players.iter().all(|p| p.marks == 3));
    assert_eq!(state.active_player().map(|p| p.id), Some(NORTH));
}
