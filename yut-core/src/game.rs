//! Turn controller.
//!
//! A [`Game`] moves through explicit phases:
//!
//! ```text
//! AwaitingRoll --(record_roll, no extra)--> AwaitingPiece
//!      ^                                        |
//!      |                                  select_piece
//!      |                                        v
//!      +---- end of turn / next roll <-- [AwaitingGrouping] --decide_grouping-->
//! ```
//!
//! Grouping is opt-in: when a piece lands next to its own team the game stops
//! in [`Phase::AwaitingGrouping`] until [`Game::decide_grouping`] is called.
//! Captures are only checked after that decision.
//!
//! Every operation returns the [`Event`]s it produced, in order.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capture::captured_at;
use crate::movement::resolve;
use crate::pieces::{Piece, PieceId, Roster, StackError, TeamId};
use crate::roll::Roll;
use crate::topology::{BoardShape, BoardTopology, Position};

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Setup choices made before the first roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub shape: BoardShape,
    pub teams: u8,
    pub pieces_per_team: u8,
}

impl GameConfig {
    pub const MIN_TEAMS: u8 = 2;
    pub const MAX_TEAMS: u8 = 4;
    pub const MIN_PIECES: u8 = 1;
    pub const MAX_PIECES: u8 = 5;

    pub fn new(shape: BoardShape, teams: u8, pieces_per_team: u8) -> GameConfig {
        GameConfig {
            shape,
            teams,
            pieces_per_team,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(Self::MIN_TEAMS..=Self::MAX_TEAMS).contains(&self.teams) {
            return Err(ConfigError::TeamCount(self.teams));
        }
        if !(Self::MIN_PIECES..=Self::MAX_PIECES).contains(&self.pieces_per_team) {
            return Err(ConfigError::PieceCount(self.pieces_per_team));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::new(BoardShape::Square, 2, 4)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} teams requested, a game needs 2 to 4")]
    TeamCount(u8),
    #[error("{0} pieces per team requested, allowed are 1 to 5")]
    PieceCount(u8),
}

// ============================================================================
// PHASES, EVENTS, ERRORS
// ============================================================================

/// A move that landed next to pieces of its own team and waits for the
/// group/no-group decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingGroup {
    pub piece: PieceId,
    pub friendlies: Vec<PieceId>,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    AwaitingRoll,
    AwaitingPiece,
    AwaitingGrouping(PendingGroup),
    Over { winner: TeamId },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::AwaitingRoll => "awaiting a roll",
            Phase::AwaitingPiece => "awaiting a piece",
            Phase::AwaitingGrouping(_) => "awaiting a grouping decision",
            Phase::Over { .. } => "over",
        }
    }
}

/// Something that happened during a game operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    TurnStarted { team: TeamId },
    Rolled { team: TeamId, roll: Roll },
    ExtraRoll { team: TeamId },
    RollsReordered { rolls: Vec<Roll> },
    Moved { team: TeamId, piece: PieceId, from: Position, to: Position, roll: Roll },
    GroupingOffered { piece: PieceId, friendlies: Vec<PieceId> },
    Grouped { leader: PieceId, size: usize, position: Position },
    GroupingDeclined { piece: PieceId, position: Position },
    Caught { by: PieceId, captured: Vec<PieceId>, position: Position },
    Finished { piece: PieceId, count: usize },
    ExtraTurn { team: TeamId },
    TurnEnded { team: TeamId },
    GameWon { team: TeamId },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::TurnStarted { team } => write!(f, "--- {} to roll ---", team),
            Event::Rolled { team, roll } => write!(f, "{} rolled {}", team, roll),
            Event::ExtraRoll { team } => write!(f, "{} earned an extra roll", team),
            Event::RollsReordered { rolls } => {
                let names: Vec<&str> = rolls.iter().map(|r| r.name()).collect();
                write!(f, "rolls reordered: {}", names.join(", "))
            }
            Event::Moved { team, piece, from, to, roll } => {
                write!(f, "{} moved {} from {} to {} with {}", team, piece, from, to, roll)
            }
            Event::GroupingOffered { piece, friendlies } => {
                write!(f, "{} landed on {} own piece(s), group?", piece, friendlies.len())
            }
            Event::Grouped { leader, size, position } => {
                write!(f, "{} now leads a stack of {} at {}", leader, size, position)
            }
            Event::GroupingDeclined { piece, position } => {
                write!(f, "{} not grouped at {}", piece, position)
            }
            Event::Caught { by, captured, position } => {
                write!(f, "{} caught {} piece(s) at {}", by, captured.len(), position)
            }
            Event::Finished { piece, count } => write!(f, "{} finished ({} piece(s))", piece, count),
            Event::ExtraTurn { team } => write!(f, "{} caught a piece and rolls again", team),
            Event::TurnEnded { team } => write!(f, "end of {}'s turn", team),
            Event::GameWon { team } => write!(f, "{} wins the game!", team),
        }
    }
}

/// A request the controller refused. The game state is unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TurnError {
    #[error("cannot {action} while {phase}")]
    WrongPhase { action: &'static str, phase: &'static str },
    #[error("no piece {0}")]
    UnknownPiece(PieceId),
    #[error("piece {piece} does not belong to {team}")]
    NotYourPiece { piece: PieceId, team: TeamId },
    #[error("piece {piece} cannot move with {roll}")]
    CannotMove { piece: PieceId, roll: Roll },
    #[error("no rolls pending")]
    NoPendingRoll,
    #[error("reordered rolls must be a permutation of the pending rolls")]
    InvalidReorder,
    #[error(transparent)]
    Stack(#[from] StackError),
}

/// What a presentation layer needs to draw one piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceView {
    pub id: PieceId,
    pub team: TeamId,
    pub number: u8,
    pub position: Position,
    pub finished: bool,
    pub leader: Option<PieceId>,
    pub group_size: usize,
}

impl From<&Piece> for PieceView {
    fn from(piece: &Piece) -> Self {
        PieceView {
            id: piece.id(),
            team: piece.team(),
            number: piece.number(),
            position: piece.position(),
            finished: piece.is_finished(),
            leader: piece.leader(),
            group_size: piece.group_size(),
        }
    }
}

// ============================================================================
// GAME
// ============================================================================

#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    topology: BoardTopology,
    roster: Roster,
    current: TeamId,
    pending: Vec<Roll>,
    phase: Phase,
    caught_this_turn: bool,
}

impl Game {
    /// A fresh game, first team to roll.
    pub fn new(config: GameConfig) -> Result<Game, ConfigError> {
        config.validate()?;
        Ok(Game::fresh(config))
    }

    fn fresh(config: GameConfig) -> Game {
        let topology = BoardTopology::new(config.shape);
        let roster = Roster::new(config.teams, config.pieces_per_team, topology.start());
        Game {
            config,
            topology,
            roster,
            current: TeamId(0),
            pending: Vec::new(),
            phase: Phase::AwaitingRoll,
            caught_this_turn: false,
        }
    }

    /// Announce the first turn.
    pub fn start(&self) -> Vec<Event> {
        vec![Event::TurnStarted { team: self.current }]
    }

    /// Start over with the same configuration.
    pub fn restart(&mut self) -> Vec<Event> {
        *self = Game::fresh(self.config);
        self.start()
    }

    // ========== Queries ==========

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn topology(&self) -> &BoardTopology {
        &self.topology
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn current_team(&self) -> TeamId {
        self.current
    }

    /// Rolls still to be spent this turn, next one first.
    pub fn pending_rolls(&self) -> &[Roll] {
        &self.pending
    }

    pub fn winner(&self) -> Option<TeamId> {
        match self.phase {
            Phase::Over { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    pub fn piece_views(&self) -> Vec<PieceView> {
        self.roster.iter().map(PieceView::from).collect()
    }

    /// Pieces of the current team that can use the next pending roll.
    pub fn playable_pieces(&self) -> Vec<PieceId> {
        match (&self.phase, self.pending.first()) {
            (Phase::AwaitingPiece, Some(&roll)) => self.usable_by(roll),
            _ => Vec::new(),
        }
    }

    /// Where `piece` would land with the next pending roll.
    pub fn target_for(&self, piece: PieceId) -> Option<Position> {
        let &roll = self.pending.first()?;
        if !self.playable_pieces().contains(&piece) {
            return None;
        }
        let piece = self.roster.get(piece)?;
        Some(resolve(&self.topology, piece, roll.steps()))
    }

    fn usable_by(&self, roll: Roll) -> Vec<PieceId> {
        let finish = self.topology.finish();
        self.roster
            .playable(self.current)
            .into_iter()
            .filter(|&id| self.roster.can_move(id, roll.steps(), finish))
            .collect()
    }

    fn expect_phase(&self, wanted: &Phase, action: &'static str) -> Result<(), TurnError> {
        if std::mem::discriminant(&self.phase) == std::mem::discriminant(wanted) {
            Ok(())
        } else {
            Err(TurnError::WrongPhase {
                action,
                phase: self.phase.name(),
            })
        }
    }

    // ========== Operations ==========

    /// Record one throw for the current team. Yut and Mo keep the game waiting
    /// for another throw; anything else moves on to piece selection.
    pub fn record_roll(&mut self, roll: Roll) -> Result<Vec<Event>, TurnError> {
        self.expect_phase(&Phase::AwaitingRoll, "roll")?;
        let mut events = vec![Event::Rolled { team: self.current, roll }];
        self.pending.push(roll);
        if roll.grants_extra_roll() {
            events.push(Event::ExtraRoll { team: self.current });
        } else {
            self.next_roll(&mut events);
        }
        Ok(events)
    }

    /// Spend the pending rolls in a different order.
    pub fn reorder_rolls(&mut self, order: Vec<Roll>) -> Result<Vec<Event>, TurnError> {
        self.expect_phase(&Phase::AwaitingPiece, "reorder rolls")?;
        let mut wanted = order.clone();
        let mut have = self.pending.clone();
        wanted.sort();
        have.sort();
        if wanted != have {
            return Err(TurnError::InvalidReorder);
        }
        self.pending = order;
        let mut events = vec![Event::RollsReordered {
            rolls: self.pending.clone(),
        }];
        self.next_roll(&mut events);
        Ok(events)
    }

    /// Move `id` with the next pending roll.
    pub fn select_piece(&mut self, id: PieceId) -> Result<Vec<Event>, TurnError> {
        self.expect_phase(&Phase::AwaitingPiece, "select a piece")?;
        let &roll = self.pending.first().ok_or(TurnError::NoPendingRoll)?;
        let piece = self.roster.get(id).ok_or(TurnError::UnknownPiece(id))?;
        if piece.team() != self.current {
            return Err(TurnError::NotYourPiece {
                piece: id,
                team: self.current,
            });
        }
        let finish = self.topology.finish();
        if !self.roster.can_move(id, roll.steps(), finish) {
            return Err(TurnError::CannotMove { piece: id, roll });
        }

        let from = piece.position();
        let target = resolve(&self.topology, piece, roll.steps());
        self.roster.move_to(id, target, finish)?;
        self.pending.remove(0);

        let mut events = vec![Event::Moved {
            team: self.current,
            piece: id,
            from,
            to: target,
            roll,
        }];

        if !self.topology.is_capture_free(target) {
            let friendlies: Vec<PieceId> = self
                .roster
                .interactive_at(self.current, target)
                .into_iter()
                .filter(|&other| other != id)
                .collect();
            if !friendlies.is_empty() {
                events.push(Event::GroupingOffered {
                    piece: id,
                    friendlies: friendlies.clone(),
                });
                self.phase = Phase::AwaitingGrouping(PendingGroup {
                    piece: id,
                    friendlies,
                    position: target,
                });
                return Ok(events);
            }
        }

        self.complete_move(id, target, &mut events)?;
        Ok(events)
    }

    /// Answer the grouping question raised by the last move.
    pub fn decide_grouping(&mut self, accept: bool) -> Result<Vec<Event>, TurnError> {
        let Phase::AwaitingGrouping(pending) = &self.phase else {
            return Err(TurnError::WrongPhase {
                action: "decide grouping",
                phase: self.phase.name(),
            });
        };
        let pending = pending.clone();

        let mut events = Vec::new();
        if accept {
            let size = self.roster.try_group(pending.piece, &pending.friendlies)?;
            events.push(Event::Grouped {
                leader: pending.piece,
                size,
                position: pending.position,
            });
        } else {
            events.push(Event::GroupingDeclined {
                piece: pending.piece,
                position: pending.position,
            });
        }
        self.complete_move(pending.piece, pending.position, &mut events)?;
        Ok(events)
    }

    // ========== Internal flow ==========

    /// Catch, finish and win checks after a move (and its grouping decision).
    fn complete_move(&mut self, id: PieceId, target: Position, events: &mut Vec<Event>) -> Result<(), TurnError> {
        let captured = captured_at(&self.topology, &self.roster, target, self.current);
        if !captured.is_empty() {
            for &piece in &captured {
                self.roster.reset(piece, self.topology.start())?;
            }
            events.push(Event::Caught {
                by: id,
                captured,
                position: target,
            });
            self.caught_this_turn = true;
        }

        if let Some(piece) = self.roster.get(id) {
            if piece.is_finished() {
                events.push(Event::Finished {
                    piece: id,
                    count: piece.group_size(),
                });
            }
        }

        if self.roster.team_finished(self.current) {
            self.phase = Phase::Over { winner: self.current };
            self.pending.clear();
            events.push(Event::GameWon { team: self.current });
            return Ok(());
        }

        self.next_roll(events);
        Ok(())
    }

    /// Wait for a piece while rolls are pending, otherwise end the turn.
    ///
    /// Every roll moves any unfinished lone piece or leader, and a team without
    /// one has already won, so a pending roll always has a taker.
    fn next_roll(&mut self, events: &mut Vec<Event>) {
        if self.pending.is_empty() {
            self.end_turn(events);
        } else {
            self.phase = Phase::AwaitingPiece;
        }
    }

    fn end_turn(&mut self, events: &mut Vec<Event>) {
        if self.caught_this_turn {
            events.push(Event::ExtraTurn { team: self.current });
        } else {
            events.push(Event::TurnEnded { team: self.current });
            self.current = TeamId((self.current.0 + 1) % self.config.teams);
        }
        self.caught_this_turn = false;
        self.pending.clear();
        self.phase = Phase::AwaitingRoll;
        events.push(Event::TurnStarted { team: self.current });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(teams: u8, pieces: u8) -> Game {
        Game::new(GameConfig::new(BoardShape::Square, teams, pieces)).unwrap()
    }

    fn position(game: &Game, id: u8) -> Position {
        game.roster().get(PieceId(id)).unwrap().position()
    }

    #[test]
    fn test_config_validation() {
        assert!(GameConfig::default().validate().is_ok());
        assert_eq!(GameConfig::new(BoardShape::Square, 1, 4).validate(), Err(ConfigError::TeamCount(1)));
        assert_eq!(GameConfig::new(BoardShape::Square, 5, 4).validate(), Err(ConfigError::TeamCount(5)));
        assert_eq!(GameConfig::new(BoardShape::Hexagon, 4, 0).validate(), Err(ConfigError::PieceCount(0)));
        assert_eq!(GameConfig::new(BoardShape::Hexagon, 4, 6).validate(), Err(ConfigError::PieceCount(6)));
        assert!(Game::new(GameConfig::new(BoardShape::Pentagon, 1, 2)).is_err());
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config: GameConfig = serde_json::from_str(r#"{"shape":"hexagon"}"#).unwrap();
        assert_eq!(config, GameConfig::new(BoardShape::Hexagon, 2, 4));
    }

    #[test]
    fn test_simple_roll_and_move() {
        let mut game = square(2, 2);
        let events = game.record_roll(Roll::Geol).unwrap();
        assert_eq!(events, vec![Event::Rolled { team: TeamId(0), roll: Roll::Geol }]);
        assert_eq!(game.phase(), &Phase::AwaitingPiece);
        assert_eq!(game.playable_pieces(), vec![PieceId(0), PieceId(1)]);
        assert_eq!(game.target_for(PieceId(0)), Some(Position(3)));

        let events = game.select_piece(PieceId(0)).unwrap();
        assert_eq!(position(&game, 0), Position(3));
        assert_eq!(
            events,
            vec![
                Event::Moved {
                    team: TeamId(0),
                    piece: PieceId(0),
                    from: Position(0),
                    to: Position(3),
                    roll: Roll::Geol
                },
                Event::TurnEnded { team: TeamId(0) },
                Event::TurnStarted { team: TeamId(1) },
            ]
        );
        assert_eq!(game.current_team(), TeamId(1));
    }

    #[test]
    fn test_extra_roll_keeps_waiting_for_roll() {
        let mut game = square(2, 2);
        let events = game.record_roll(Roll::Yut).unwrap();
        assert!(events.contains(&Event::ExtraRoll { team: TeamId(0) }));
        assert_eq!(game.phase(), &Phase::AwaitingRoll);
        game.record_roll(Roll::Do).unwrap();
        assert_eq!(game.pending_rolls(), &[Roll::Yut, Roll::Do]);
        assert_eq!(game.phase(), &Phase::AwaitingPiece);

        game.select_piece(PieceId(0)).unwrap();
        assert_eq!(game.pending_rolls(), &[Roll::Do]);
        assert_eq!(game.current_team(), TeamId(0));
        game.select_piece(PieceId(0)).unwrap();
        assert_eq!(position(&game, 0), Position(5));
        assert_eq!(game.current_team(), TeamId(1));
    }

    #[test]
    fn test_reorder_rolls() {
        let mut game = square(2, 2);
        game.record_roll(Roll::Mo).unwrap();
        game.record_roll(Roll::Gae).unwrap();
        assert_eq!(game.reorder_rolls(vec![Roll::Gae, Roll::Gae]), Err(TurnError::InvalidReorder));
        let events = game.reorder_rolls(vec![Roll::Gae, Roll::Mo]).unwrap();
        assert_eq!(events, vec![Event::RollsReordered { rolls: vec![Roll::Gae, Roll::Mo] }]);
        game.select_piece(PieceId(0)).unwrap();
        assert_eq!(position(&game, 0), Position(2));
        game.select_piece(PieceId(0)).unwrap();
        assert_eq!(position(&game, 0), Position(7));
    }

    #[test]
    fn test_wrong_phase_and_bad_selection() {
        let mut game = square(2, 2);
        assert!(matches!(game.select_piece(PieceId(0)), Err(TurnError::WrongPhase { .. })));
        assert!(matches!(game.decide_grouping(true), Err(TurnError::WrongPhase { .. })));
        game.record_roll(Roll::Do).unwrap();
        assert!(matches!(game.record_roll(Roll::Do), Err(TurnError::WrongPhase { .. })));
        assert_eq!(
            game.select_piece(PieceId(2)),
            Err(TurnError::NotYourPiece { piece: PieceId(2), team: TeamId(0) })
        );
        assert_eq!(game.select_piece(PieceId(9)), Err(TurnError::UnknownPiece(PieceId(9))));
        // Nothing changed.
        assert_eq!(game.pending_rolls(), &[Roll::Do]);
        assert_eq!(game.phase(), &Phase::AwaitingPiece);
    }

    #[test]
    fn test_grouping_offer_accept() {
        let mut game = square(2, 2);
        game.record_roll(Roll::Yut).unwrap();
        game.record_roll(Roll::Yut).unwrap();
        game.record_roll(Roll::Do).unwrap();
        game.select_piece(PieceId(0)).unwrap();
        let events = game.select_piece(PieceId(1)).unwrap();
        assert_eq!(
            events.last(),
            Some(&Event::GroupingOffered { piece: PieceId(1), friendlies: vec![PieceId(0)] })
        );
        assert!(matches!(game.phase(), Phase::AwaitingGrouping(_)));
        assert!(matches!(game.select_piece(PieceId(1)), Err(TurnError::WrongPhase { .. })));

        let events = game.decide_grouping(true).unwrap();
        assert_eq!(
            events[0],
            Event::Grouped { leader: PieceId(1), size: 2, position: Position(4) }
        );
        assert_eq!(game.playable_pieces(), vec![PieceId(1)]);

        // Do from 4 carries both pieces to 5.
        game.select_piece(PieceId(1)).unwrap();
        assert_eq!(position(&game, 0), Position(5));
        assert_eq!(position(&game, 1), Position(5));
        assert!(game.roster().check_integrity().is_ok());
    }

    #[test]
    fn test_grouping_offer_decline() {
        let mut game = square(2, 2);
        game.record_roll(Roll::Yut).unwrap();
        game.record_roll(Roll::Gae).unwrap();
        game.reorder_rolls(vec![Roll::Gae, Roll::Yut]).unwrap();
        game.select_piece(PieceId(0)).unwrap();
        game.select_piece(PieceId(1)).unwrap(); // 0 -> 4
        assert_eq!(game.phase(), &Phase::AwaitingRoll);

        game.record_roll(Roll::Do).unwrap(); // team 1
        game.select_piece(PieceId(2)).unwrap();
        game.record_roll(Roll::Gae).unwrap(); // team 0
        let events = game.select_piece(PieceId(0)).unwrap(); // 2 -> 4
        assert!(events.iter().any(|e| matches!(e, Event::GroupingOffered { .. })));
        let events = game.decide_grouping(false).unwrap();
        assert_eq!(events[0], Event::GroupingDeclined { piece: PieceId(0), position: Position(4) });
        assert!(!game.roster().get(PieceId(0)).unwrap().is_leader());
        assert_eq!(game.roster().interactive_at(TeamId(0), Position(4)).len(), 2);
    }

    #[test]
    fn test_catch_grants_extra_turn() {
        let mut game = square(2, 1);
        game.record_roll(Roll::Geol).unwrap();
        game.select_piece(PieceId(0)).unwrap(); // team 0 -> 3
        game.record_roll(Roll::Geol).unwrap();
        let events = game.select_piece(PieceId(1)).unwrap(); // team 1 -> 3, catches
        assert_eq!(
            events[1],
            Event::Caught { by: PieceId(1), captured: vec![PieceId(0)], position: Position(3) }
        );
        assert_eq!(events[2], Event::ExtraTurn { team: TeamId(1) });
        assert_eq!(game.current_team(), TeamId(1));
        assert!(game.roster().get(PieceId(0)).unwrap().is_at(Position(0)));
    }

    #[test]
    fn test_back_do_from_start_and_finish() {
        let mut game = square(2, 1);
        game.record_roll(Roll::BackDo).unwrap();
        game.select_piece(PieceId(0)).unwrap();
        assert_eq!(position(&game, 0), Position(20));

        game.record_roll(Roll::Do).unwrap();
        game.select_piece(PieceId(1)).unwrap();

        game.record_roll(Roll::Do).unwrap();
        let events = game.select_piece(PieceId(0)).unwrap();
        assert!(events.contains(&Event::Finished { piece: PieceId(0), count: 1 }));
        assert!(events.contains(&Event::GameWon { team: TeamId(0) }));
        assert_eq!(game.winner(), Some(TeamId(0)));
        assert!(matches!(game.record_roll(Roll::Do), Err(TurnError::WrongPhase { .. })));
    }

    #[test]
    fn test_stack_finishes_together() {
        let mut game = square(2, 2);
        // Piece 0 to the corner at 10, passing 5 without turning.
        game.record_roll(Roll::Yut).unwrap();
        game.record_roll(Roll::Yut).unwrap();
        game.record_roll(Roll::Gae).unwrap();
        for _ in 0..3 {
            game.select_piece(PieceId(0)).unwrap();
        }
        assert_eq!(position(&game, 0), Position(10));

        game.record_roll(Roll::Do).unwrap();
        game.select_piece(PieceId(2)).unwrap();

        game.record_roll(Roll::Yut).unwrap();
        game.record_roll(Roll::Yut).unwrap();
        game.record_roll(Roll::Gae).unwrap();
        game.select_piece(PieceId(1)).unwrap();
        game.select_piece(PieceId(1)).unwrap();
        game.select_piece(PieceId(1)).unwrap();
        game.decide_grouping(true).unwrap();
        assert_eq!(game.current_team(), TeamId(1));

        game.record_roll(Roll::Do).unwrap();
        game.select_piece(PieceId(2)).unwrap();

        // 10 -> 26 27 23 28 29, then 30 31.
        game.record_roll(Roll::Mo).unwrap();
        game.record_roll(Roll::Gae).unwrap();
        assert_eq!(game.playable_pieces(), vec![PieceId(1)]);
        game.select_piece(PieceId(1)).unwrap();
        assert_eq!(position(&game, 0), Position(29));
        let events = game.select_piece(PieceId(1)).unwrap();
        assert!(events.contains(&Event::Finished { piece: PieceId(1), count: 2 }));
        assert!(events.contains(&Event::GameWon { team: TeamId(0) }));
        assert!(game.pending_rolls().is_empty());
        assert!(game.playable_pieces().is_empty());
    }

    #[test]
    fn test_restart() {
        let mut game = square(3, 2);
        game.record_roll(Roll::Gae).unwrap();
        game.select_piece(PieceId(1)).unwrap();
        let events = game.restart();
        assert_eq!(events, vec![Event::TurnStarted { team: TeamId(0) }]);
        assert_eq!(game.phase(), &Phase::AwaitingRoll);
        assert!(game.roster().iter().all(|p| p.is_at(Position(0))));
    }

    #[test]
    fn test_views_and_events_serialize() {
        let mut game = square(2, 2);
        let mut events = game.record_roll(Roll::Gae).unwrap();
        events.extend(game.select_piece(PieceId(1)).unwrap());

        let views = serde_json::to_value(game.piece_views()).unwrap();
        let moved = &views[1];
        assert_eq!(moved["id"], 1);
        assert_eq!(moved["position"], position(&game, 1).0);
        assert_eq!(moved["finished"], false);
        assert_eq!(moved["leader"], serde_json::Value::Null);
        assert_eq!(moved["group_size"], 1);

        let json = serde_json::to_value(&events).unwrap();
        assert_eq!(json[0]["event"], "rolled");
        assert_eq!(json[1]["event"], "moved");
    }

    #[test]
    fn test_event_display() {
        let event = Event::Moved {
            team: TeamId(0),
            piece: PieceId(1),
            from: Position(5),
            to: Position(23),
            roll: Roll::Geol,
        };
        assert_eq!(event.to_string(), "Team 1 moved #1 from 5 to 23 with Geol");
        assert_eq!(Event::GameWon { team: TeamId(1) }.to_string(), "Team 2 wins the game!");
    }
}
