//! A player that makes every choice at random.

use rand::prelude::*;
use rand::rngs::StdRng;
use xxhash_rust::xxh64::xxh64;

use yut_core::{Event, Game, Phase, RollSource, TeamId, TurnError};

/// Random piece selection, grouping and roll ordering.
#[derive(Clone, Debug)]
pub struct RandomPlayer {
    rng: StdRng,
    /// Chance of accepting a grouping offer.
    pub group_chance: f64,
    /// Chance of reordering when more than one roll is pending.
    pub reorder_chance: f64,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> RandomPlayer {
        RandomPlayer {
            rng: StdRng::seed_from_u64(seed),
            group_chance: 0.5,
            reorder_chance: 0.1,
        }
    }

    /// Take one action for whatever the game is waiting on. Nothing happens once
    /// the game is over.
    pub fn act(&mut self, game: &mut Game, roller: &mut impl RollSource) -> Result<Vec<Event>, TurnError> {
        match game.phase().clone() {
            Phase::AwaitingRoll => game.record_roll(roller.roll()),
            Phase::AwaitingPiece => {
                let pending = game.pending_rolls().to_vec();
                if pending.len() > 1 && self.rng.random_bool(self.reorder_chance) {
                    let mut order = pending;
                    order.shuffle(&mut self.rng);
                    return game.reorder_rolls(order);
                }
                match game.playable_pieces().choose(&mut self.rng) {
                    Some(&piece) => game.select_piece(piece),
                    None => Err(TurnError::NoPendingRoll),
                }
            }
            Phase::AwaitingGrouping(_) => {
                let accept = self.rng.random_bool(self.group_chance);
                game.decide_grouping(accept)
            }
            Phase::Over { .. } => Ok(Vec::new()),
        }
    }
}

/// Everything that happened in one game.
#[derive(Clone, Debug, Default)]
pub struct GameRecord {
    pub winner: Option<TeamId>,
    pub events: Vec<Event>,
    pub actions: usize,
}

impl GameRecord {
    pub fn turns(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::TurnStarted { .. }))
            .count()
    }
}

/// Play `game` until someone wins or `max_actions` actions were taken.
pub fn play_game(
    game: &mut Game,
    roller: &mut impl RollSource,
    player: &mut RandomPlayer,
    max_actions: usize,
) -> Result<GameRecord, TurnError> {
    let mut record = GameRecord {
        events: game.start(),
        ..Default::default()
    };
    while !game.is_over() && record.actions < max_actions {
        let events = player.act(game, roller)?;
        record.events.extend(events);
        record.actions += 1;
    }
    record.winner = game.winner();
    Ok(record)
}

/// xxh64 checksum of the JSON event log.
pub fn event_digest(events: &[Event]) -> Result<u64, serde_json::Error> {
    Ok(xxh64(&serde_json::to_vec(events)?, 0))
}
