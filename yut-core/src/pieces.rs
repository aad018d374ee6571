//! Pieces, teams and stacks.
//!
//! All pieces of a game live in one [`Roster`] and refer to each other by
//! [`PieceId`]. A stack is a leader plus the members it carries:
//!
//! ```text
//! leader.members = [a, b]      a.leader = Some(leader)
//!                              b.leader = Some(leader)
//! ```
//!
//! Both directions are kept in step by [`Roster::try_group`] and
//! [`Roster::reset`]; [`Roster::check_integrity`] verifies them.

use std::fmt;
use std::mem;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::topology::Position;

/// Team identifier (0-based).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamId(pub u8);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Team {}", self.0 + 1)
    }
}

/// Piece identifier, unique across all teams of a game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u8);

impl PieceId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One piece on (or off) the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    id: PieceId,
    team: TeamId,
    /// 0-based number within the team.
    number: u8,
    position: Position,
    finished: bool,
    leader: Option<PieceId>,
    members: Vec<PieceId>,
}

impl Piece {
    fn new(id: PieceId, team: TeamId, number: u8, start: Position) -> Piece {
        Piece {
            id,
            team,
            number,
            position: start,
            finished: false,
            leader: None,
            members: Vec::new(),
        }
    }

    /// A lone piece standing on `position`, for resolving moves without a roster.
    pub fn standing(id: PieceId, team: TeamId, position: Position) -> Piece {
        Piece::new(id, team, 0, position)
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn team(&self) -> TeamId {
        self.team
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The piece carrying this one, if any.
    pub fn leader(&self) -> Option<PieceId> {
        self.leader
    }

    /// Pieces carried by this one.
    pub fn members(&self) -> &[PieceId] {
        &self.members
    }

    #[inline]
    pub fn is_leader(&self) -> bool {
        !self.members.is_empty()
    }

    #[inline]
    pub fn is_stacked(&self) -> bool {
        self.leader.is_some()
    }

    /// Itself plus the pieces it carries.
    #[inline]
    pub fn group_size(&self) -> usize {
        1 + self.members.len()
    }

    /// Waiting at `start` and not yet finished.
    pub fn is_at(&self, start: Position) -> bool {
        self.position == start && !self.finished
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.number + 1)?;
        if self.finished {
            write!(f, "(F)")?;
        } else {
            write!(f, "({})", self.position)?;
        }
        if self.is_leader() {
            write!(f, "x{}", self.group_size())?;
        }
        Ok(())
    }
}

/// Misuse of the stacking operations, or a broken stack found by
/// [`Roster::check_integrity`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StackError {
    #[error("no piece {0}")]
    UnknownPiece(PieceId),
    #[error("piece {0} cannot group with itself")]
    SelfGroup(PieceId),
    #[error("piece {0} is carried by another piece")]
    MoverStacked(PieceId),
    #[error("piece {0} belongs to another team")]
    TeamMismatch(PieceId),
    #[error("piece {0} is on another square")]
    PositionMismatch(PieceId),
    #[error("piece {0} is already carried by another piece")]
    AlreadyStacked(PieceId),
    #[error("piece {0} has already finished")]
    Finished(PieceId),
    #[error("piece {0} is listed twice")]
    DuplicateMember(PieceId),
    #[error("piece {0} both leads and is carried")]
    LeaderAndMember(PieceId),
    #[error("piece {member} points at leader {leader}, which does not carry it")]
    DanglingLeader { member: PieceId, leader: PieceId },
    #[error("piece {leader} carries {member}, which points elsewhere")]
    DanglingMember { leader: PieceId, member: PieceId },
    #[error("piece {member} is not on the square of its leader {leader}")]
    Scattered { leader: PieceId, member: PieceId },
}

/// Every piece of every team, addressed by [`PieceId`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pieces: Vec<Piece>,
    teams: u8,
    pieces_per_team: u8,
}

impl Roster {
    /// All pieces at `start`, unfinished and ungrouped. Team `t` owns ids
    /// `t * pieces_per_team ..`.
    pub fn new(teams: u8, pieces_per_team: u8, start: Position) -> Roster {
        let mut pieces = Vec::with_capacity(teams as usize * pieces_per_team as usize);
        for team in 0..teams {
            for number in 0..pieces_per_team {
                let id = PieceId(team * pieces_per_team + number);
                pieces.push(Piece::new(id, TeamId(team), number, start));
            }
        }
        Roster {
            pieces,
            teams,
            pieces_per_team,
        }
    }

    pub fn teams(&self) -> u8 {
        self.teams
    }

    pub fn pieces_per_team(&self) -> u8 {
        self.pieces_per_team
    }

    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }

    fn piece(&self, id: PieceId) -> Result<&Piece, StackError> {
        self.pieces.get(id.index()).ok_or(StackError::UnknownPiece(id))
    }

    fn piece_mut(&mut self, id: PieceId) -> Result<&mut Piece, StackError> {
        self.pieces.get_mut(id.index()).ok_or(StackError::UnknownPiece(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    pub fn team_pieces(&self, team: TeamId) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |p| p.team == team)
    }

    /// Leaders and lone pieces of `team` on `position`: the pieces a player can
    /// point at there.
    pub fn interactive_at(&self, team: TeamId, position: Position) -> Vec<PieceId> {
        self.team_pieces(team)
            .filter(|p| !p.finished && !p.is_stacked() && p.position == position)
            .map(|p| p.id)
            .collect()
    }

    /// Leaders and lone pieces of any team on `position`.
    pub fn occupants(&self, position: Position) -> Vec<PieceId> {
        self.pieces
            .iter()
            .filter(|p| !p.finished && !p.is_stacked() && p.position == position)
            .map(|p| p.id)
            .collect()
    }

    /// Pieces of `team` that can be selected to move at all.
    pub fn playable(&self, team: TeamId) -> Vec<PieceId> {
        self.team_pieces(team)
            .filter(|p| !p.finished && !p.is_stacked())
            .map(|p| p.id)
            .collect()
    }

    pub fn finished_count(&self, team: TeamId) -> usize {
        self.team_pieces(team).filter(|p| p.finished).count()
    }

    /// Every piece of `team` has finished.
    pub fn team_finished(&self, team: TeamId) -> bool {
        self.team_pieces(team).all(|p| p.finished)
    }

    /// Whether `id` may be moved by a roll of `steps`.
    ///
    /// Stacked members move only with their leader; finished pieces never move.
    pub fn can_move(&self, id: PieceId, steps: i8, finish: Position) -> bool {
        let Some(piece) = self.get(id) else {
            return false;
        };
        if piece.finished || piece.is_stacked() || piece.position == finish {
            return false;
        }
        steps == -1 || steps > 0
    }

    // ========== Mutation ==========

    /// Put `id` (and everything it carries) on `target`. Reaching `finish`
    /// finishes the whole stack.
    pub fn move_to(&mut self, id: PieceId, target: Position, finish: Position) -> Result<(), StackError> {
        let piece = self.piece_mut(id)?;
        if piece.is_stacked() {
            return Err(StackError::MoverStacked(id));
        }
        piece.position = target;
        if target == finish {
            piece.finished = true;
        }
        self.sync_members(id);
        Ok(())
    }

    /// Merge `others` into the stack led by `mover`.
    ///
    /// Every candidate is checked before anything changes: same team, same
    /// square, not `mover`, not carried, not finished. A candidate that leads
    /// its own stack hands its members over to `mover`. Returns the new group
    /// size.
    pub fn try_group(&mut self, mover: PieceId, others: &[PieceId]) -> Result<usize, StackError> {
        let lead = self.piece(mover)?;
        if lead.is_stacked() {
            return Err(StackError::MoverStacked(mover));
        }
        if lead.finished {
            return Err(StackError::Finished(mover));
        }
        for (i, &other) in others.iter().enumerate() {
            let piece = self.piece(other)?;
            if other == mover {
                return Err(StackError::SelfGroup(other));
            }
            if others[..i].contains(&other) {
                return Err(StackError::DuplicateMember(other));
            }
            if piece.team != lead.team {
                return Err(StackError::TeamMismatch(other));
            }
            if piece.position != lead.position {
                return Err(StackError::PositionMismatch(other));
            }
            if piece.is_stacked() {
                return Err(StackError::AlreadyStacked(other));
            }
            if piece.finished {
                return Err(StackError::Finished(other));
            }
        }

        for &other in others {
            let absorbed = mem::take(&mut self.pieces[other.index()].members);
            for &member in &absorbed {
                self.pieces[member.index()].leader = Some(mover);
            }
            self.pieces[other.index()].leader = Some(mover);
            let lead = &mut self.pieces[mover.index()];
            lead.members.extend(absorbed);
            lead.members.push(other);
        }
        self.sync_members(mover);
        Ok(self.pieces[mover.index()].group_size())
    }

    /// Send `id` back to `start`: it leaves its leader's stack, and if it led a
    /// stack, every member is released and sent back individually.
    pub fn reset(&mut self, id: PieceId, start: Position) -> Result<(), StackError> {
        let piece = self.piece_mut(id)?;
        let leader = piece.leader.take();
        let members = mem::take(&mut piece.members);
        piece.position = start;
        piece.finished = false;

        if let Some(leader) = leader {
            self.piece_mut(leader)?.members.retain(|&m| m != id);
        }
        for member in members {
            self.piece_mut(member)?.leader = None;
            self.reset(member, start)?;
        }
        Ok(())
    }

    fn sync_members(&mut self, leader: PieceId) {
        let Some(lead) = self.pieces.get(leader.index()) else {
            return;
        };
        let (position, finished) = (lead.position, lead.finished);
        let members = lead.members.clone();
        for member in members {
            if let Some(piece) = self.pieces.get_mut(member.index()) {
                piece.position = position;
                piece.finished = finished;
            }
        }
    }

    /// Verify leader/member links in both directions.
    pub fn check_integrity(&self) -> Result<(), StackError> {
        for piece in &self.pieces {
            if piece.is_stacked() && piece.is_leader() {
                return Err(StackError::LeaderAndMember(piece.id));
            }
            if let Some(leader) = piece.leader {
                let lead = self.piece(leader)?;
                if !lead.members.contains(&piece.id) {
                    return Err(StackError::DanglingLeader {
                        member: piece.id,
                        leader,
                    });
                }
                if lead.position != piece.position || lead.finished != piece.finished {
                    return Err(StackError::Scattered {
                        leader,
                        member: piece.id,
                    });
                }
            }
            for (i, &member) in piece.members.iter().enumerate() {
                if piece.members[..i].contains(&member) {
                    return Err(StackError::DuplicateMember(member));
                }
                if self.piece(member)?.leader != Some(piece.id) {
                    return Err(StackError::DanglingMember {
                        leader: piece.id,
                        member,
                    });
                }
            }
        }
        Ok(())
    }
}
