//! Board topology: the path graph of one board shape.
//!
//! Every shape is described by a [`TopologyTable`] of plain indices and turned
//! into a validated [`BoardTopology`] once. The movement code only ever talks to
//! [`BoardTopology::next_step`] and [`BoardTopology::prev_step`], so it never
//! needs to know which shape it is walking.
//!
//! # Square board
//!
//! ```text
//!   10   9   8   7   6   5
//!   11  26          21   4
//!   12      27  22       3
//!             23
//!   13      24  28       2
//!   14  25          29   1
//!   15  16  17  18  19   0
//! ```
//!
//! Square 20 (end of the outer loop) and 30 (end of the diagonal) both sit on
//! the home corner next to 0, and 31 (finish) lies just beyond it;
//! from either of them the next step is the finish.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A square on one board shape's graph.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position(pub u8);

impl Position {
    /// Index into per-square tables.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three supported board shapes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardShape {
    #[default]
    Square,
    Pentagon,
    Hexagon,
}

impl BoardShape {
    /// The built-in table for this shape.
    pub fn table(self) -> &'static TopologyTable {
        match self {
            BoardShape::Square => &SQUARE,
            BoardShape::Pentagon => &PENTAGON,
            BoardShape::Hexagon => &HEXAGON,
        }
    }

    /// Get all shapes as an iterator.
    pub fn all() -> impl Iterator<Item = BoardShape> {
        [BoardShape::Square, BoardShape::Pentagon, BoardShape::Hexagon].into_iter()
    }
}

impl fmt::Display for BoardShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoardShape::Square => "square",
            BoardShape::Pentagon => "pentagon",
            BoardShape::Hexagon => "hexagon",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown board shape: {0}")]
pub struct UnknownShape(pub String);

impl FromStr for BoardShape {
    type Err = UnknownShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "square" | "rectangle" | "4" => Ok(BoardShape::Square),
            "pentagon" | "5" => Ok(BoardShape::Pentagon),
            "hexagon" | "6" => Ok(BoardShape::Hexagon),
            _ => Err(UnknownShape(s.to_string())),
        }
    }
}

// ============================================================================
// DECLARATIVE TABLES
// ============================================================================

/// Exit rule of one hub.
#[derive(Debug)]
pub struct HubTable {
    pub hub: u8,
    /// `(arrived from, leave to)` for pieces passing through.
    pub exits: &'static [(u8, u8)],
    /// Exit for a roll that begins on the hub.
    pub stopped: u8,
}

/// Plain-index description of a board shape.
#[derive(Debug)]
pub struct TopologyTable {
    pub shape: BoardShape,
    pub point_count: u8,
    pub start: u8,
    pub finish: u8,
    pub main_route: &'static [u8],
    pub branch_edges: &'static [(u8, u8)],
    pub vertex_branches: &'static [(u8, u8)],
    pub hubs: &'static [HubTable],
    pub no_capture: &'static [u8],
    pub back_do_from_start: u8,
}

pub const SQUARE: TopologyTable = TopologyTable {
    shape: BoardShape::Square,
    point_count: 32,
    start: 0,
    finish: 31,
    main_route: &[
        0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 31,
    ],
    branch_edges: &[
        (21, 22), (22, 23), // from corner 5
        (26, 27), (27, 23), // from corner 10
        (24, 25), (25, 15), // towards corner 15
        (28, 29), (29, 30), (30, 31), // towards home
    ],
    vertex_branches: &[(5, 21), (10, 26)],
    hubs: &[HubTable {
        hub: 23,
        exits: &[(22, 24), (27, 28)],
        stopped: 28,
    }],
    no_capture: &[0, 31],
    back_do_from_start: 20,
};

pub const PENTAGON: TopologyTable = TopologyTable {
    shape: BoardShape::Pentagon,
    point_count: 39,
    start: 0,
    finish: 38,
    main_route: &[
        0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23,
        24, 36, 38,
    ],
    branch_edges: &[
        (25, 26), (26, 35),
        (27, 28), (28, 35),
        (29, 30), (30, 35),
        (31, 32), (32, 20),
        (33, 34), (34, 37), (37, 38),
    ],
    vertex_branches: &[(5, 25), (10, 27), (15, 29)],
    hubs: &[HubTable {
        hub: 35,
        exits: &[(26, 31), (28, 31), (30, 33)],
        stopped: 33,
    }],
    no_capture: &[0, 38],
    back_do_from_start: 36,
};

pub const HEXAGON: TopologyTable = TopologyTable {
    shape: BoardShape::Hexagon,
    point_count: 46,
    start: 0,
    finish: 45,
    main_route: &[
        0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23,
        24, 25, 26, 27, 28, 29, 43, 45,
    ],
    branch_edges: &[
        (30, 31), (31, 42),
        (32, 33), (33, 42),
        (34, 35), (35, 42),
        (36, 37), (37, 20),
        (38, 39), (39, 25),
        (40, 41), (41, 44), (44, 45),
    ],
    vertex_branches: &[(5, 30), (10, 32), (15, 34)],
    hubs: &[HubTable {
        hub: 42,
        exits: &[(31, 36), (33, 38), (35, 40)],
        stopped: 40,
    }],
    no_capture: &[0, 45],
    back_do_from_start: 43,
};

// ============================================================================
// VALIDATED TOPOLOGY
// ============================================================================

/// Reasons a [`TopologyTable`] is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    #[error("square {position} is outside a board of {point_count} squares")]
    OutOfRange { position: u8, point_count: u8 },
    #[error("main route must run from start {start} to finish {finish}")]
    RouteEndpoints { start: Position, finish: Position },
    #[error("square {0} has more than one default successor")]
    AmbiguousSuccessor(Position),
    #[error("square {0} has no way forward")]
    MissingSuccessor(Position),
    #[error("hub {0} also has a default edge")]
    HubWithDefaultEdge(Position),
    #[error("hub {hub} has no exit for pieces arriving from {arrival}")]
    MissingHubExit { hub: Position, arrival: Position },
    #[error("hub {hub} has more than one exit for pieces arriving from {arrival}")]
    DuplicateHubExit { hub: Position, arrival: Position },
    #[error("hub {hub} lists an exit for {arrival}, which does not lead into it")]
    StrayHubExit { hub: Position, arrival: Position },
    #[error("hub {hub} exits back onto itself or into one of its own legs ({target})")]
    InvalidHubExit { hub: Position, target: Position },
    #[error("shortcut entrance {0} is not a pre-finish square of the main route")]
    VertexOffRoute(Position),
    #[error("square {0} must be capture-free")]
    CaptureFreeMissing(Position),
    #[error("square {0} cannot be reached from start")]
    Unreachable(Position),
}

/// Runtime exit rule of one hub.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HubExit {
    hub: Position,
    exits: Vec<(Position, Position)>,
    stopped: Position,
}

impl HubExit {
    pub fn hub(&self) -> Position {
        self.hub
    }

    /// `(arrived from, leave to)` pairs for pieces passing through.
    pub fn exits(&self) -> &[(Position, Position)] {
        &self.exits
    }

    /// Exit for a roll that begins on the hub.
    pub fn stopped(&self) -> Position {
        self.stopped
    }

    /// Exit taken by a piece that arrived from `arrival` during this roll, or by
    /// a piece whose roll began on the hub (`None`).
    pub fn exit_for(&self, arrival: Option<Position>) -> Position {
        arrival
            .and_then(|from| self.exits.iter().find(|(a, _)| *a == from).map(|&(_, to)| to))
            .unwrap_or(self.stopped)
    }

    /// Every distinct square a piece can leave the hub onto.
    pub fn targets(&self) -> Vec<Position> {
        let mut targets: Vec<Position> = self.exits.iter().map(|&(_, to)| to).collect();
        targets.push(self.stopped);
        targets.sort();
        targets.dedup();
        targets
    }
}

/// What the step loop knows when it asks for the next square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepContext {
    /// This is the first step of the roll.
    pub first_step: bool,
    /// Where the piece stood before the roll began.
    pub roll_origin: Position,
    /// Square stepped from when the piece most recently entered a hub this roll.
    pub arrival: Option<Position>,
}

impl StepContext {
    /// Context for the first step of a roll starting at `origin`.
    pub fn first(origin: Position) -> StepContext {
        StepContext {
            first_step: true,
            roll_origin: origin,
            arrival: None,
        }
    }
}

/// Immutable path graph of one board shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardTopology {
    shape: BoardShape,
    start: Position,
    finish: Position,
    main_route: Vec<Position>,
    branch_edges: Vec<(Position, Position)>,
    vertex_branches: Vec<(Position, Position)>,
    hubs: Vec<HubExit>,
    no_capture: Vec<Position>,
    back_do_from_start: Position,
    /// Default successor of every square (None for finish and hubs).
    forward: Vec<Option<Position>>,
    /// Predecessor along the path that owns each square.
    backward: Vec<Option<Position>>,
}

impl BoardTopology {
    /// The built-in topology for `shape`.
    pub fn new(shape: BoardShape) -> BoardTopology {
        match BoardTopology::from_table(shape.table()) {
            Ok(topology) => topology,
            // Built-in tables are covered by tests.
            Err(e) => unreachable!("built-in {} table is invalid: {}", shape, e),
        }
    }

    /// Build and validate a topology from a declarative table.
    pub fn from_table(table: &TopologyTable) -> Result<BoardTopology, TopologyError> {
        let count = table.point_count;
        let pos = |p: u8| -> Result<Position, TopologyError> {
            if p < count {
                Ok(Position(p))
            } else {
                Err(TopologyError::OutOfRange {
                    position: p,
                    point_count: count,
                })
            }
        };
        let edge = |(a, b): (u8, u8)| -> Result<(Position, Position), TopologyError> {
            Ok((pos(a)?, pos(b)?))
        };

        let start = pos(table.start)?;
        let finish = pos(table.finish)?;
        let main_route = table.main_route.iter().map(|&p| pos(p)).collect::<Result<Vec<_>, _>>()?;
        let branch_edges = table.branch_edges.iter().map(|&e| edge(e)).collect::<Result<Vec<_>, _>>()?;
        let vertex_branches = table.vertex_branches.iter().map(|&e| edge(e)).collect::<Result<Vec<_>, _>>()?;
        let no_capture = table.no_capture.iter().map(|&p| pos(p)).collect::<Result<Vec<_>, _>>()?;
        let back_do_from_start = pos(table.back_do_from_start)?;
        let mut hubs = Vec::with_capacity(table.hubs.len());
        for h in table.hubs {
            hubs.push(HubExit {
                hub: pos(h.hub)?,
                exits: h.exits.iter().map(|&e| edge(e)).collect::<Result<Vec<_>, _>>()?,
                stopped: pos(h.stopped)?,
            });
        }

        if main_route.first() != Some(&start) || main_route.last() != Some(&finish) {
            return Err(TopologyError::RouteEndpoints { start, finish });
        }

        let mut forward: Vec<Option<Position>> = vec![None; count as usize];
        for (from, to) in main_route.windows(2).map(|w| (w[0], w[1])).chain(branch_edges.iter().copied()) {
            let slot = &mut forward[from.index()];
            if slot.is_some() || from == finish {
                return Err(TopologyError::AmbiguousSuccessor(from));
            }
            *slot = Some(to);
        }

        for hub in &hubs {
            if forward[hub.hub.index()].is_some() {
                return Err(TopologyError::HubWithDefaultEdge(hub.hub));
            }
        }

        for &(vertex, _) in &vertex_branches {
            let on_route = main_route.contains(&vertex);
            if !on_route || vertex == finish {
                return Err(TopologyError::VertexOffRoute(vertex));
            }
        }

        for p in 0..count {
            let p = Position(p);
            let is_hub = hubs.iter().any(|h| h.hub == p);
            if p != finish && !is_hub && forward[p.index()].is_none() {
                return Err(TopologyError::MissingSuccessor(p));
            }
        }

        for hub in &hubs {
            Self::validate_hub(hub, &forward, &vertex_branches)?;
        }

        for required in [start, finish] {
            if !no_capture.contains(&required) {
                return Err(TopologyError::CaptureFreeMissing(required));
            }
        }

        // Owning-path predecessors: main route first, then shortcuts, legs, hub exits.
        let mut backward: Vec<Option<Position>> = vec![None; count as usize];
        let hub_edges: Vec<(Position, Position)> = hubs
            .iter()
            .flat_map(|h| h.targets().into_iter().map(move |t| (h.hub, t)))
            .collect();
        for (from, to) in main_route
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(vertex_branches.iter().copied())
            .chain(branch_edges.iter().copied())
            .chain(hub_edges)
        {
            backward[to.index()].get_or_insert(from);
        }

        let topology = BoardTopology {
            shape: table.shape,
            start,
            finish,
            main_route,
            branch_edges,
            vertex_branches,
            hubs,
            no_capture,
            back_do_from_start,
            forward,
            backward,
        };
        topology.validate_reachability()?;
        Ok(topology)
    }

    fn validate_hub(
        hub: &HubExit,
        forward: &[Option<Position>],
        vertex_branches: &[(Position, Position)],
    ) -> Result<(), TopologyError> {
        let inbound: Vec<Position> = forward
            .iter()
            .enumerate()
            .filter(|(_, next)| **next == Some(hub.hub))
            .map(|(p, _)| Position(p as u8))
            .chain(vertex_branches.iter().filter(|(_, to)| *to == hub.hub).map(|&(v, _)| v))
            .collect();

        for &arrival in &inbound {
            match hub.exits.iter().filter(|(a, _)| *a == arrival).count() {
                0 => return Err(TopologyError::MissingHubExit { hub: hub.hub, arrival }),
                1 => {}
                _ => return Err(TopologyError::DuplicateHubExit { hub: hub.hub, arrival }),
            }
        }
        for &(arrival, _) in &hub.exits {
            if !inbound.contains(&arrival) {
                return Err(TopologyError::StrayHubExit { hub: hub.hub, arrival });
            }
        }
        for target in hub.targets() {
            if target == hub.hub || inbound.contains(&target) {
                return Err(TopologyError::InvalidHubExit { hub: hub.hub, target });
            }
        }
        Ok(())
    }

    fn validate_reachability(&self) -> Result<(), TopologyError> {
        let mut seen = vec![false; self.point_count()];
        let mut queue = vec![self.start];
        seen[self.start.index()] = true;
        while let Some(p) = queue.pop() {
            for next in self.successors(p) {
                if !seen[next.index()] {
                    seen[next.index()] = true;
                    queue.push(next);
                }
            }
        }
        match seen.iter().position(|&s| !s) {
            Some(p) => Err(TopologyError::Unreachable(Position(p as u8))),
            None => Ok(()),
        }
    }

    // ========== Queries ==========

    pub fn shape(&self) -> BoardShape {
        self.shape
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn finish(&self) -> Position {
        self.finish
    }

    /// Number of squares, finish included.
    pub fn point_count(&self) -> usize {
        self.forward.len()
    }

    pub fn main_route(&self) -> &[Position] {
        &self.main_route
    }

    pub fn branch_edges(&self) -> &[(Position, Position)] {
        &self.branch_edges
    }

    pub fn hubs(&self) -> &[HubExit] {
        &self.hubs
    }

    pub fn hub(&self, pos: Position) -> Option<&HubExit> {
        self.hubs.iter().find(|h| h.hub == pos)
    }

    #[inline]
    pub fn is_hub(&self, pos: Position) -> bool {
        self.hub(pos).is_some()
    }

    /// Shortcut entrances, in table order.
    pub fn vertices(&self) -> impl Iterator<Item = Position> + '_ {
        self.vertex_branches.iter().map(|&(v, _)| v)
    }

    #[inline]
    pub fn is_vertex(&self, pos: Position) -> bool {
        self.vertex_branches.iter().any(|&(v, _)| v == pos)
    }

    /// Landing here never catches anything.
    #[inline]
    pub fn is_capture_free(&self, pos: Position) -> bool {
        self.no_capture.contains(&pos)
    }

    /// Back-Do target for a piece still waiting at start.
    pub fn back_do_from_start(&self) -> Position {
        self.back_do_from_start
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.index() < self.point_count()
    }

    // ========== Stepping ==========

    /// One forward step from `from`.
    ///
    /// Returns `from` itself when it is the finish (no further movement).
    /// Priority: hub exit rule, then the first-step shortcut of a vertex the
    /// roll began on, then the square's default edge.
    pub fn next_step(&self, from: Position, step: StepContext) -> Position {
        if from == self.finish {
            return from;
        }
        if let Some(hub) = self.hub(from) {
            return hub.exit_for(step.arrival);
        }
        if step.first_step && step.roll_origin == from {
            if let Some(&(_, to)) = self.vertex_branches.iter().find(|(v, _)| *v == from) {
                return to;
            }
        }
        self.forward.get(from.index()).copied().flatten().unwrap_or(from)
    }

    /// One backward step (Back-Do) from `from`.
    ///
    /// Start has no predecessor and maps to itself.
    pub fn prev_step(&self, from: Position) -> Position {
        self.backward.get(from.index()).copied().flatten().unwrap_or(from)
    }

    /// Every square reachable in one forward step from `pos`, under any roll
    /// context.
    pub fn successors(&self, pos: Position) -> Vec<Position> {
        if let Some(hub) = self.hub(pos) {
            return hub.targets();
        }
        let mut out: Vec<Position> = self.forward.get(pos.index()).copied().flatten().into_iter().collect();
        out.extend(self.vertex_branches.iter().filter(|(v, _)| *v == pos).map(|&(_, to)| to));
        out
    }

    /// All directed one-step edges of the board.
    pub fn edges(&self) -> Vec<(Position, Position)> {
        (0..self.point_count())
            .map(|p| Position(p as u8))
            .flat_map(|p| self.successors(p).into_iter().map(move |to| (p, to)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(origin: u8) -> StepContext {
        StepContext::first(Position(origin))
    }

    fn later(origin: u8, arrival: Option<u8>) -> StepContext {
        StepContext {
            first_step: false,
            roll_origin: Position(origin),
            arrival: arrival.map(Position),
        }
    }

    #[test]
    fn test_builtin_tables_validate() {
        for shape in BoardShape::all() {
            let topology = BoardTopology::from_table(shape.table());
            assert!(topology.is_ok(), "{}: {:?}", shape, topology.err());
        }
    }

    #[test]
    fn test_point_counts() {
        assert_eq!(BoardTopology::new(BoardShape::Square).point_count(), 32);
        assert_eq!(BoardTopology::new(BoardShape::Pentagon).point_count(), 39);
        assert_eq!(BoardTopology::new(BoardShape::Hexagon).point_count(), 46);
    }

    #[test]
    fn test_shape_from_str() {
        assert_eq!("Square".parse::<BoardShape>(), Ok(BoardShape::Square));
        assert_eq!("rectangle".parse::<BoardShape>(), Ok(BoardShape::Square));
        assert_eq!("HEXAGON".parse::<BoardShape>(), Ok(BoardShape::Hexagon));
        assert_eq!("5".parse::<BoardShape>(), Ok(BoardShape::Pentagon));
        assert!("circle".parse::<BoardShape>().is_err());
    }

    #[test]
    fn test_square_perimeter_steps() {
        let t = BoardTopology::new(BoardShape::Square);
        assert_eq!(t.next_step(Position(0), first(0)), Position(1));
        assert_eq!(t.next_step(Position(19), first(19)), Position(20));
        assert_eq!(t.next_step(Position(20), first(20)), Position(31));
    }

    #[test]
    fn test_vertex_shortcut_only_on_first_step_from_origin() {
        let t = BoardTopology::new(BoardShape::Square);
        assert_eq!(t.next_step(Position(5), first(5)), Position(21));
        assert_eq!(t.next_step(Position(10), first(10)), Position(26));
        // Passing through a vertex stays on the perimeter.
        assert_eq!(t.next_step(Position(5), later(3, None)), Position(6));
        // First step but the roll began elsewhere.
        assert_eq!(t.next_step(Position(5), first(4)), Position(6));
    }

    #[test]
    fn test_square_hub_exits() {
        let t = BoardTopology::new(BoardShape::Square);
        let hub = Position(23);
        assert_eq!(t.next_step(hub, later(5, Some(22))), Position(24));
        assert_eq!(t.next_step(hub, later(10, Some(27))), Position(28));
        assert_eq!(t.next_step(hub, first(23)), Position(28));
    }

    #[test]
    fn test_finish_is_terminal() {
        for shape in BoardShape::all() {
            let t = BoardTopology::new(shape);
            let finish = t.finish();
            assert_eq!(t.next_step(finish, first(finish.0)), finish);
            assert!(t.successors(finish).is_empty());
        }
    }

    #[test]
    fn test_square_prev_step() {
        let t = BoardTopology::new(BoardShape::Square);
        let cases = [
            (1, 0),
            (15, 14),
            (21, 5),
            (22, 21),
            (23, 22),
            (24, 23),
            (25, 24),
            (26, 10),
            (28, 23),
            (30, 29),
            (20, 19),
        ];
        for (from, expected) in cases {
            assert_eq!(t.prev_step(Position(from)), Position(expected), "prev of {}", from);
        }
        assert_eq!(t.prev_step(t.start()), t.start());
    }

    #[test]
    fn test_prev_step_inverts_default_edges() {
        for shape in BoardShape::all() {
            let t = BoardTopology::new(shape);
            for p in 0..t.point_count() {
                let p = Position(p as u8);
                if p == t.start() {
                    continue;
                }
                let prev = t.prev_step(p);
                assert!(
                    t.successors(prev).contains(&p),
                    "{}: {} is not a successor of its predecessor {}",
                    shape,
                    p,
                    prev
                );
            }
        }
    }

    #[test]
    fn test_hub_exit_targets() {
        let t = BoardTopology::new(BoardShape::Hexagon);
        let hub = t.hub(Position(42)).unwrap();
        assert_eq!(hub.targets(), vec![Position(36), Position(38), Position(40)]);
        assert_eq!(hub.exit_for(None), Position(40));
        assert_eq!(hub.exit_for(Some(Position(33))), Position(38));
    }

    #[test]
    fn test_vertices_and_capture_free() {
        let t = BoardTopology::new(BoardShape::Pentagon);
        assert_eq!(t.vertices().collect::<Vec<_>>(), vec![Position(5), Position(10), Position(15)]);
        assert!(t.is_capture_free(t.start()));
        assert!(t.is_capture_free(t.finish()));
        assert!(!t.is_capture_free(Position(35)));
    }

    #[test]
    fn test_edges_cover_every_square() {
        for shape in BoardShape::all() {
            let t = BoardTopology::new(shape);
            let edges = t.edges();
            for p in 0..t.point_count() {
                let p = Position(p as u8);
                if p != t.start() {
                    assert!(edges.iter().any(|&(_, to)| to == p), "{}: nothing leads to {}", shape, p);
                }
            }
        }
    }

    // ========== Table validation ==========

    const LINE_ROUTE: &[u8] = &[0, 1, 2, 3];

    fn line(hubs: &'static [HubTable], branch_edges: &'static [(u8, u8)]) -> TopologyTable {
        TopologyTable {
            shape: BoardShape::Square,
            point_count: 4,
            start: 0,
            finish: 3,
            main_route: LINE_ROUTE,
            branch_edges,
            vertex_branches: &[],
            hubs,
            no_capture: &[0, 3],
            back_do_from_start: 2,
        }
    }

    #[test]
    fn test_plain_line_validates() {
        assert!(BoardTopology::from_table(&line(&[], &[])).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        let mut table = line(&[], &[]);
        table.back_do_from_start = 9;
        assert_eq!(
            BoardTopology::from_table(&table),
            Err(TopologyError::OutOfRange { position: 9, point_count: 4 })
        );
    }

    #[test]
    fn test_rejects_ambiguous_successor() {
        let table = line(&[], &[(1, 3)]);
        assert_eq!(
            BoardTopology::from_table(&table),
            Err(TopologyError::AmbiguousSuccessor(Position(1)))
        );
    }

    #[test]
    fn test_rejects_dead_end_square() {
        let mut table = line(&[], &[]);
        table.point_count = 5;
        assert_eq!(
            BoardTopology::from_table(&table),
            Err(TopologyError::MissingSuccessor(Position(4)))
        );
    }

    #[test]
    fn test_rejects_hub_on_default_edge() {
        let table = line(&[HubTable { hub: 2, exits: &[(1, 3)], stopped: 3 }], &[]);
        assert_eq!(
            BoardTopology::from_table(&table),
            Err(TopologyError::HubWithDefaultEdge(Position(2)))
        );
    }

    #[test]
    fn test_rejects_bad_route_endpoints() {
        let mut table = line(&[], &[]);
        table.main_route = &[1, 2, 3];
        assert!(matches!(
            BoardTopology::from_table(&table),
            Err(TopologyError::RouteEndpoints { .. })
        ));
    }

    #[test]
    fn test_rejects_missing_capture_free_finish() {
        let mut table = line(&[], &[]);
        table.no_capture = &[0];
        assert_eq!(
            BoardTopology::from_table(&table),
            Err(TopologyError::CaptureFreeMissing(Position(3)))
        );
    }

    /// Square table with one hub exit entry removed.
    #[test]
    fn test_rejects_missing_hub_exit() {
        let table = TopologyTable {
            hubs: &[HubTable { hub: 23, exits: &[(22, 24)], stopped: 28 }],
            ..SQUARE
        };
        assert_eq!(
            BoardTopology::from_table(&table),
            Err(TopologyError::MissingHubExit { hub: Position(23), arrival: Position(27) })
        );
    }

    #[test]
    fn test_rejects_duplicate_hub_exit() {
        let table = TopologyTable {
            hubs: &[HubTable { hub: 23, exits: &[(22, 24), (27, 28), (22, 28)], stopped: 28 }],
            ..SQUARE
        };
        assert_eq!(
            BoardTopology::from_table(&table),
            Err(TopologyError::DuplicateHubExit { hub: Position(23), arrival: Position(22) })
        );
    }

    #[test]
    fn test_rejects_stray_hub_exit() {
        let table = TopologyTable {
            hubs: &[HubTable { hub: 23, exits: &[(22, 24), (27, 28), (25, 24)], stopped: 28 }],
            ..SQUARE
        };
        assert_eq!(
            BoardTopology::from_table(&table),
            Err(TopologyError::StrayHubExit { hub: Position(23), arrival: Position(25) })
        );
    }

    #[test]
    fn test_rejects_hub_exit_into_own_leg() {
        let table = TopologyTable {
            hubs: &[HubTable { hub: 23, exits: &[(22, 27), (27, 28)], stopped: 28 }],
            ..SQUARE
        };
        assert_eq!(
            BoardTopology::from_table(&table),
            Err(TopologyError::InvalidHubExit { hub: Position(23), target: Position(27) })
        );
    }

    #[test]
    fn test_rejects_unreachable_square() {
        // The diagonal exit is never taken, so 28..30 cannot be reached.
        let table = TopologyTable {
            hubs: &[HubTable { hub: 23, exits: &[(22, 24), (27, 24)], stopped: 24 }],
            ..SQUARE
        };
        assert_eq!(BoardTopology::from_table(&table), Err(TopologyError::Unreachable(Position(28))));
    }

    #[test]
    fn test_rejects_vertex_off_route() {
        let table = TopologyTable {
            vertex_branches: &[(5, 21), (26, 27)],
            ..SQUARE
        };
        assert_eq!(
            BoardTopology::from_table(&table),
            Err(TopologyError::VertexOffRoute(Position(26)))
        );
    }
}
