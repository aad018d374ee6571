//! Yutnori Simulator
//!
//! Plays a batch of games with random rolls and random choices and reports
//! win shares, catches and stacking statistics.

use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use yut_core::Game;
use yut_sim::options::print_usage;
use yut_sim::{play_game, RandomPlayer, SimOptions, SimStats, StickRoller};

fn main() {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let opts = match SimOptions::parse(&args, false) {
        Ok(Some(opts)) => opts,
        Ok(None) => {
            print_usage(&args[0], false);
            return;
        }
        Err(e) => {
            eprintln!("{}", e);
            print_usage(&args[0], false);
            std::process::exit(1);
        }
    };
    let seed = opts.seed.unwrap_or_else(rand::random);

    println!("Yutnori Simulator");
    println!("=================");
    println!(
        "Board: {}  Teams: {}  Pieces: {}",
        opts.config.shape, opts.config.teams, opts.config.pieces_per_team
    );
    println!("Games: {}  Seed: {}", opts.games, seed);
    println!();

    // Set up SIGINT handler for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        println!("\n\nInterrupt received, finishing current game...");
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");

    let mut roller = StickRoller::new(seed);
    let mut player = RandomPlayer::new(seed.wrapping_add(1));
    let mut stats = SimStats::new(opts.config.teams);

    let mut game = match Game::new(opts.config) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let start = Instant::now();
    for _ in 0..opts.games {
        if !running.load(Ordering::SeqCst) {
            break;
        }
        game.restart();
        match play_game(&mut game, &mut roller, &mut player, opts.max_actions) {
            Ok(record) => stats.record_game(&record),
            Err(e) => {
                println!("Warning: game aborted: {}", e);
                continue;
            }
        }
        if !opts.quiet && stats.should_log(opts.log_interval_secs) {
            stats.log_progress();
        }
    }
    let elapsed = start.elapsed();

    // Final stats
    println!("\n=================");
    if running.load(Ordering::SeqCst) {
        println!("Simulation complete!");
    } else {
        println!("Simulation interrupted!");
    }
    println!("=================");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!();
    stats.print_summary();
}
