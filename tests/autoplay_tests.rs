//! Game loop integration tests.

use std::time::{Duration, Instant};

use kudurru_rules::ai::{
    DecisionContext, GameLoop, JsonProvider, RandomProvider, SharedMatch, TickOutcome,
};
use kudurru_rules::cards::{CardTemplate, CardType, Cost, Rarity, ResourcePools, World};
use kudurru_rules::core::{
    Action, Controller, MatchConfigBuilder, Phase, PlayerId, SeatConfig, SeatPosition,
};
use kudurru_rules::rules::MatchEngine;

fn brawler() -> CardTemplate {
    CardTemplate::new(
        "Brawler",
        CardType::Character,
        World::Nibiru,
        Rarity::Mid,
        5,
        5,
        Cost::default(),
    )
}

/// Two seats, each fielding one ready brawler.
fn brawl(controllers: [Controller; 2]) -> SharedMatch {
    let seat = |name: &str, controller| {
        SeatConfig::new(name, SeatPosition::Top, ResourcePools::new(1, 1, 1))
            .controlled_by(controller)
            .with_battlefield_card(brawler())
    };
    let config = MatchConfigBuilder::new()
        .seat(seat("First", controllers[0]))
        .seat(seat("Second", controllers[1]))
        .build()
        .unwrap();
    SharedMatch::new(MatchEngine::new(config).unwrap())
}

// =============================================================================
// Running to completion
// =============================================================================

/// Greedy bots finish a brawl: the opener ends Main, then attacks twice.
#[test]
fn test_greedy_brawl_finishes() {
    let shared = brawl([Controller::Bot, Controller::Bot]);
    let mut game_loop = GameLoop::new(shared.clone());

    let summary = game_loop.run(100);

    assert_eq!(summary.winner(), Some(PlayerId::new(0)));
    assert_eq!(summary.ticks, 4);

    let engine = shared.lock();
    let verbs: Vec<&str> = engine
        .state()
        .history
        .iter()
        .map(|r| r.action.verb())
        .collect();
    assert_eq!(verbs, vec!["endPhase", "attack", "attack"]);
    assert_eq!(engine.snapshot().players[1].marks, 0);
}

/// Random bots also finish, and the same seed replays the same match.
#[test]
fn test_random_brawl_is_reproducible() {
    let play = || {
        let shared = brawl([Controller::Bot, Controller::Bot]);
        let mut game_loop = GameLoop::new(shared.clone())
            .seat_provider(PlayerId::new(0), RandomProvider::for_seat(9, PlayerId::new(0)))
            .seat_provider(PlayerId::new(1), RandomProvider::for_seat(9, PlayerId::new(1)));
        let summary = game_loop.run(5_000);
        let history: Vec<Action> = shared
            .lock()
            .state()
            .history
            .iter()
            .map(|r| r.action.clone())
            .collect();
        (summary, history)
    };

    let (first, first_history) = play();
    let (second, second_history) = play();

    assert!(first.winner().is_some());
    assert_eq!(first, second);
    assert_eq!(first_history, second_history);
}

/// Once the match is won, further ticks do nothing.
#[test]
fn test_ticks_after_game_over_are_idle() {
    let shared = brawl([Controller::Bot, Controller::Bot]);
    let mut game_loop = GameLoop::new(shared.clone());
    game_loop.run(100);
    let before = shared.lock().state().clone();

    assert_eq!(game_loop.tick(), TickOutcome::GameOver(PlayerId::new(0)));
    assert_eq!(shared.lock().state(), &before);
}

// =============================================================================
// Degraded decisions
// =============================================================================

/// An unreachable or confused provider only ever ends phases.
#[test]
fn test_broken_provider_only_ends_phases() {
    let shared = brawl([Controller::Bot, Controller::Bot]);
    let mut replies = ["", "{}", r#"{"action":"attack","cardId":"c99"}"#, "nonsense"]
        .into_iter()
        .cycle();
    let provider = JsonProvider::new(move |_: &DecisionContext| {
        Ok(replies.next().unwrap_or_default().to_string())
    });
    let mut game_loop = GameLoop::with_provider(shared.clone(), provider);

    for _ in 0..12 {
        assert!(matches!(game_loop.tick(), TickOutcome::Degraded { .. }));
    }

    let engine = shared.lock();
    assert!(engine
        .state()
        .history
        .iter()
        .all(|r| r.action == Action::EndPhase));
    assert!(engine.state().players.values().all(|p| p.marks == 10));
}

/// Wire decisions are applied like any other.
#[test]
fn test_json_provider_attacks() {
    let shared = brawl([Controller::Bot, Controller::Bot]);
    let provider = JsonProvider::new(|context: &DecisionContext| {
        Ok(match context.phase {
            Phase::Battle => {
                let attacker = context.battlefield[0].id;
                format!(r#"{{"action":"attack","cardId":"{attacker}"}}"#)
            }
            _ => r#"{"action":"end"}"#.to_string(),
        })
    });
    let mut game_loop = GameLoop::with_provider(shared.clone(), provider);

    let summary = game_loop.run(10);

    assert_eq!(summary.winner(), Some(PlayerId::new(0)));
}

// =============================================================================
// Human seats
// =============================================================================

/// The loop waits on a human seat and resumes once the human passes.
#[test]
fn test_loop_waits_for_human() {
    let config = MatchConfigBuilder::new()
        .seat(SeatConfig::new("Bot", SeatPosition::Top, ResourcePools::default()))
        .seat(
            SeatConfig::new("Human", SeatPosition::Bottom, ResourcePools::default())
                .controlled_by(Controller::Human),
        )
        .build()
        .unwrap();
    let shared = SharedMatch::new(MatchEngine::new(config).unwrap());
    let mut game_loop = GameLoop::new(shared.clone());

    let summary = game_loop.run(100);
    assert_eq!(summary.last, Some(TickOutcome::AwaitingHuman(PlayerId::new(1))));
    assert_eq!(summary.ticks, 3);

    shared.with(|engine| {
        engine.end_phase();
        engine.end_phase();
        engine.end_phase();
    });

    let outcome = game_loop.tick();
    assert!(matches!(outcome, TickOutcome::Applied { seat, .. } if seat == PlayerId::new(0)));
}

// =============================================================================
// Background thread
// =============================================================================

/// A spawned loop plays a bot match to the end and stops by itself.
#[test]
fn test_spawned_loop_finishes() {
    let shared = brawl([Controller::Bot, Controller::Bot]);
    let handle = GameLoop::new(shared.clone()).spawn(Duration::from_millis(1));

    let deadline = Instant::now() + Duration::from_secs(10);
    while !handle.is_finished() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }

    assert!(handle.is_finished());
    assert!(handle.stop().is_some());
    assert_eq!(shared.lock().snapshot().winner_id, Some(PlayerId::new(0)));
}

/// Stopping a loop that is waiting on a human returns promptly.
#[test]
fn test_spawned_loop_stops_on_request() {
    let shared = brawl([Controller::Human, Controller::Bot]);
    let handle = GameLoop::new(shared.clone()).spawn(Duration::from_secs(60));

    std::thread::sleep(Duration::from_millis(20));
    let game_loop = handle.stop();

    assert!(game_loop.is_some());
    assert!(shared.lock().state().history.is_empty());
}
