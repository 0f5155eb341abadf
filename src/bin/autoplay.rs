//! Plays a match with every seat controlled by a bot.
//!
//! ```text
//! kudurru-autoplay [CONFIG.json] [--random]
//! ```
//!
//! Without a config file the four-gate seed is used. `--random` gives every
//! seat a seeded random provider instead of the greedy one. Set `RUST_LOG`
//! to see individual turns.

use std::error::Error;

use kudurru_rules::ai::{GameLoop, RandomProvider, SharedMatch};
use kudurru_rules::core::{Controller, MatchConfig, PlayerId};
use kudurru_rules::rules::MatchEngine;

const MAX_TICKS: usize = 10_000;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut random = false;
    let mut config_path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--random" => random = true,
            _ => config_path = Some(arg),
        }
    }

    let mut config = match config_path {
        Some(path) => MatchConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => MatchConfig::default(),
    };
    for seat in &mut config.seats {
        seat.controller = Controller::Bot;
    }

    let seed = config.rng_seed;
    let seats = config.seats.len();
    let shared = SharedMatch::new(MatchEngine::new(config)?);

    let mut game_loop = GameLoop::new(shared.clone());
    if random {
        for seat in PlayerId::all(seats) {
            game_loop = game_loop.seat_provider(seat, RandomProvider::for_seat(seed, seat));
        }
    }

    let summary = game_loop.run(MAX_TICKS);
    let snapshot = shared.lock().snapshot();

    match summary.winner() {
        Some(winner) => tracing::info!(
            "{} won on turn {} after {} ticks",
            snapshot.player(winner).map_or("?", |p| p.name.as_str()),
            snapshot.turn_number,
            summary.ticks
        ),
        None => tracing::warn!(
            "no winner after {} ticks (turn {}, last: {:?})",
            summary.ticks,
            snapshot.turn_number,
            summary.last
        ),
    }

    for player in &snapshot.players {
        println!("{:<12} {:>3} marks", player.name, player.marks);
    }

    Ok(())
}
