//! Random-play harness for yut-core: a stick roller, a random player,
//! batch statistics and command-line options shared by the binaries.

pub mod options;
pub mod player;
pub mod roller;
pub mod stats;

pub use options::SimOptions;
pub use player::{event_digest, play_game, GameRecord, RandomPlayer};
pub use roller::StickRoller;
pub use stats::SimStats;
