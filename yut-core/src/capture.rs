//! Catching: which opposing pieces a landing sends home.

use crate::pieces::{PieceId, Roster, TeamId};
use crate::topology::{BoardTopology, Position};

/// Opposing leaders and lone pieces standing on `position`.
///
/// Stacked members are never returned on their own; resetting their leader
/// sends them home as well. Capture-free squares (start, finish) return
/// nothing.
pub fn captured_at(
    topology: &BoardTopology,
    roster: &Roster,
    position: Position,
    moving_team: TeamId,
) -> Vec<PieceId> {
    if topology.is_capture_free(position) {
        return Vec::new();
    }
    roster
        .iter()
        .filter(|p| p.team() != moving_team)
        .filter(|p| !p.is_finished() && !p.is_stacked() && p.position() == position)
        .map(|p| p.id())
        .collect()
}
