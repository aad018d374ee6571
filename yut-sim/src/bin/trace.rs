//! Play one seeded game and print every event.
//!
//! The closing digest is an xxh64 checksum of the JSON event log, so two runs
//! with the same options can be compared at a glance.
//!
//! Usage:
//!   cargo run --bin trace -- --seed 7 --shape hexagon --teams 3
//!   cargo run --bin trace -- --seed 7 --json

use std::env;

use yut_core::Game;
use yut_sim::options::print_usage;
use yut_sim::{event_digest, play_game, RandomPlayer, SimOptions, StickRoller};

fn main() {
    let args: Vec<String> = env::args().collect();
    let opts = match SimOptions::parse(&args, true) {
        Ok(Some(opts)) => opts,
        Ok(None) => {
            print_usage(&args[0], true);
            return;
        }
        Err(e) => {
            eprintln!("{}", e);
            print_usage(&args[0], true);
            std::process::exit(1);
        }
    };
    let seed = opts.seed.unwrap_or(0);

    let mut game = match Game::new(opts.config) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let mut roller = StickRoller::new(seed);
    let mut player = RandomPlayer::new(seed.wrapping_add(1));

    let record = match play_game(&mut game, &mut roller, &mut player, opts.max_actions) {
        Ok(record) => record,
        Err(e) => {
            eprintln!("Game aborted: {}", e);
            std::process::exit(1);
        }
    };

    let digest = match event_digest(&record.events) {
        Ok(digest) => digest,
        Err(e) => {
            eprintln!("Failed to serialize events: {}", e);
            std::process::exit(1);
        }
    };

    if !opts.quiet {
        for event in &record.events {
            if opts.json {
                match serde_json::to_string(event) {
                    Ok(line) => println!("{}", line),
                    Err(e) => eprintln!("Failed to serialize event: {}", e),
                }
            } else {
                println!("{}", event);
            }
        }
        println!();
    }

    match record.winner {
        Some(team) => println!("Winner: {} after {} turns", team, record.turns()),
        None => println!("No winner after {} actions", record.actions),
    }
    println!("Events: {}", record.events.len());
    println!("Digest: {:016x}", digest);
}
