//! Print the path graph of a board shape.
//!
//! Usage:
//!   cargo run --bin topology -- pentagon
//!   cargo run --bin topology -- --all

use std::env;

use yut_core::{BoardShape, BoardTopology, Position};

fn join(squares: &[Position]) -> String {
    squares.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(",")
}

fn describe(topology: &BoardTopology) {
    println!(
        "{} board: {} points, start {}, finish {}",
        topology.shape(),
        topology.point_count(),
        topology.start(),
        topology.finish()
    );
    let vertices: Vec<Position> = topology.vertices().collect();
    println!("Shortcut vertices: {}", join(&vertices));
    println!("Back-Do from start: {}", topology.back_do_from_start());
    for hub in topology.hubs() {
        let exits: Vec<String> = hub
            .exits()
            .iter()
            .map(|(from, to)| format!("from {} -> {}", from, to))
            .collect();
        println!("Hub {}: {}, stopped -> {}", hub.hub(), exits.join(", "), hub.stopped());
    }
    println!();
    println!("  pos  next       prev  notes");
    for p in 0..topology.point_count() {
        let pos = Position(p as u8);
        let mut notes = Vec::new();
        if pos == topology.start() {
            notes.push("start");
        }
        if pos == topology.finish() {
            notes.push("finish");
        }
        if topology.is_hub(pos) {
            notes.push("hub");
        }
        if topology.is_vertex(pos) {
            notes.push("vertex");
        }
        if topology.is_capture_free(pos) {
            notes.push("safe");
        }
        println!(
            "  {:>3}  {:<9}  {:>4}  {}",
            pos,
            join(&topology.successors(pos)),
            topology.prev_step(pos),
            notes.join(" ")
        );
    }
    println!();
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let shapes: Vec<BoardShape> = if args.contains(&"--all".to_string()) {
        BoardShape::all().collect()
    } else {
        match args.get(1).map(|s| s.parse::<BoardShape>()) {
            None => vec![BoardShape::Square],
            Some(Ok(shape)) => vec![shape],
            Some(Err(e)) => {
                eprintln!("{}", e);
                eprintln!("Usage: {} [square|pentagon|hexagon|--all]", args[0]);
                std::process::exit(1);
            }
        }
    };

    for shape in shapes {
        describe(&BoardTopology::new(shape));
    }
}
