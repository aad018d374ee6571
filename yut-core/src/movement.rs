//! Movement resolution: where a piece ends up for a given roll.
//!
//! Everything here is pure. The caller applies the result with
//! [`Roster::move_to`](crate::Roster::move_to).

use crate::pieces::Piece;
use crate::topology::{BoardTopology, Position, StepContext};

/// Final square of `piece` after a roll of `steps`.
///
/// * finished pieces stay on the finish
/// * `-1` is Back-Do: the fixed special square when waiting at start,
///   otherwise one step back along the owning path
/// * positive rolls walk forward, stopping early on the finish
/// * anything else leaves the piece where it is
pub fn resolve(topology: &BoardTopology, piece: &Piece, steps: i8) -> Position {
    if piece.is_finished() {
        return topology.finish();
    }
    match steps {
        -1 => back_do(topology, piece.position()),
        s if s > 0 => walk(topology, piece.position(), s as u8)
            .last()
            .unwrap_or(piece.position()),
        _ => piece.position(),
    }
}

/// Every square visited by the roll, in order, ending on the landing square.
/// Empty when the piece does not move.
pub fn path(topology: &BoardTopology, piece: &Piece, steps: i8) -> Vec<Position> {
    if piece.is_finished() {
        return Vec::new();
    }
    match steps {
        -1 => vec![back_do(topology, piece.position())],
        s if s > 0 => walk(topology, piece.position(), s as u8).collect(),
        _ => Vec::new(),
    }
}

fn back_do(topology: &BoardTopology, from: Position) -> Position {
    if from == topology.start() {
        topology.back_do_from_start()
    } else {
        topology.prev_step(from)
    }
}

/// Forward walk of `steps` squares from `origin`.
pub fn walk(topology: &BoardTopology, origin: Position, steps: u8) -> Walk<'_> {
    Walk {
        topology,
        current: origin,
        step: StepContext::first(origin),
        remaining: steps,
    }
}

/// Iterator over the squares of a forward walk.
///
/// The roll origin stays fixed for the whole walk; the arrival square is
/// recorded each time the walk enters a hub, so a piece passing through takes
/// the exit for its leg while a piece whose roll began on the hub takes the
/// stopped exit.
#[derive(Clone, Debug)]
pub struct Walk<'a> {
    topology: &'a BoardTopology,
    current: Position,
    step: StepContext,
    remaining: u8,
}

impl Iterator for Walk<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.remaining == 0 {
            return None;
        }
        let mut next = self.topology.next_step(self.current, self.step);
        if !self.topology.contains(next) {
            next = self.topology.finish();
        }
        if next == self.current {
            self.remaining = 0;
            return None;
        }
        if self.topology.is_hub(next) {
            self.step.arrival = Some(self.current);
        }
        self.step.first_step = false;
        self.current = next;
        self.remaining -= 1;
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining as usize))
    }
}
