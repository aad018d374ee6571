//! Yutnori board engine: path graphs for square, pentagon and hexagon boards,
//! movement resolution, stacking, catching and a turn controller.
//!
//! # Board model
//!
//! ```text
//! start ──outer loop──> vertex ──(first step only)──> leg ──> hub ──exit──> ...
//!                                                         ──> finish
//! ```
//!
//! Each shape is a declarative [`TopologyTable`] validated by
//! [`BoardTopology::from_table`]. Movement is shape-agnostic: a roll walks the
//! graph one step at a time, carrying the roll origin (for the first-step
//! shortcut at vertices) and the square a hub was entered from (to pick the
//! hub exit).
//!
//! # Pieces
//!
//! Pieces live in a [`Roster`] addressed by [`PieceId`]. A stack is a leader
//! holding member ids; members point back at their leader and move only with
//! it.
//!
//! # Turns
//!
//! [`Game`] drives rolls, piece selection, the grouping question and catches,
//! and reports everything that happened as [`Event`]s.

#[cfg(feature = "wasm")]
pub mod wasm;

pub mod capture;
pub mod game;
pub mod movement;
pub mod pieces;
pub mod roll;
pub mod topology;

pub use capture::captured_at;
pub use game::{ConfigError, Event, Game, GameConfig, PendingGroup, Phase, PieceView, TurnError};
pub use movement::{path, resolve, walk};
pub use pieces::{Piece, PieceId, Roster, StackError, TeamId};
pub use roll::{Roll, RollSource, ScriptedRolls, UnknownRoll};
pub use topology::{
    BoardShape, BoardTopology, HubExit, HubTable, Position, StepContext, TopologyError, TopologyTable,
    UnknownShape, HEXAGON, PENTAGON, SQUARE,
};
