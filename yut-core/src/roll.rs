//! Stick-roll results and the seam through which they enter a game.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of one throw of the sticks.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Roll {
    Do,
    Gae,
    Geol,
    Yut,
    Mo,
    /// The single backward step.
    BackDo,
}

impl Roll {
    /// Signed step count: 1 to 5 forward, -1 for Back-Do.
    #[inline]
    pub const fn steps(self) -> i8 {
        match self {
            Roll::Do => 1,
            Roll::Gae => 2,
            Roll::Geol => 3,
            Roll::Yut => 4,
            Roll::Mo => 5,
            Roll::BackDo => -1,
        }
    }

    /// Yut and Mo earn another throw.
    #[inline]
    pub const fn grants_extra_roll(self) -> bool {
        matches!(self, Roll::Yut | Roll::Mo)
    }

    pub fn from_steps(steps: i8) -> Option<Roll> {
        Roll::all().find(|r| r.steps() == steps)
    }

    pub fn all() -> impl Iterator<Item = Roll> {
        [Roll::Do, Roll::Gae, Roll::Geol, Roll::Yut, Roll::Mo, Roll::BackDo].into_iter()
    }

    pub fn name(self) -> &'static str {
        match self {
            Roll::Do => "Do",
            Roll::Gae => "Gae",
            Roll::Geol => "Geol",
            Roll::Yut => "Yut",
            Roll::Mo => "Mo",
            Roll::BackDo => "Back-Do",
        }
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown roll: {0}")]
pub struct UnknownRoll(pub String);

impl FromStr for Roll {
    type Err = UnknownRoll;

    /// Accepts the roll name in any case ("geol", "BACK_DO", "back-do") or its
    /// step count ("3", "-1").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-' && *c != ' ')
            .collect::<String>()
            .to_ascii_lowercase();
        let by_name = Roll::all().find(|r| {
            let name: String = r.name().chars().filter(|c| *c != '-').collect();
            name.to_ascii_lowercase() == key
        });
        by_name
            .or_else(|| s.trim().parse::<i8>().ok().and_then(Roll::from_steps))
            .ok_or_else(|| UnknownRoll(s.to_string()))
    }
}

/// Anything that can produce rolls for a game.
pub trait RollSource {
    fn roll(&mut self) -> Roll;

    /// Throw until a roll that does not earn another throw.
    fn roll_turn(&mut self) -> Vec<Roll> {
        let mut rolls = Vec::new();
        loop {
            let roll = self.roll();
            rolls.push(roll);
            if !roll.grants_extra_roll() {
                return rolls;
            }
        }
    }
}

/// Rolls fed in ahead of time, for tests and replays.
///
/// An exhausted script keeps producing `Do`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRolls {
    queue: VecDeque<Roll>,
}

impl ScriptedRolls {
    pub fn new(rolls: impl IntoIterator<Item = Roll>) -> ScriptedRolls {
        ScriptedRolls {
            queue: rolls.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl RollSource for ScriptedRolls {
    fn roll(&mut self) -> Roll {
        self.queue.pop_front().unwrap_or(Roll::Do)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps() {
        let steps: Vec<i8> = Roll::all().map(Roll::steps).collect();
        assert_eq!(steps, vec![1, 2, 3, 4, 5, -1]);
    }

    #[test]
    fn test_extra_roll() {
        assert!(Roll::Yut.grants_extra_roll());
        assert!(Roll::Mo.grants_extra_roll());
        assert!(!Roll::Do.grants_extra_roll());
        assert!(!Roll::Geol.grants_extra_roll());
        assert!(!Roll::BackDo.grants_extra_roll());
    }

    #[test]
    fn test_from_steps() {
        assert_eq!(Roll::from_steps(3), Some(Roll::Geol));
        assert_eq!(Roll::from_steps(-1), Some(Roll::BackDo));
        assert_eq!(Roll::from_steps(0), None);
        assert_eq!(Roll::from_steps(6), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("geol".parse::<Roll>(), Ok(Roll::Geol));
        assert_eq!("MO".parse::<Roll>(), Ok(Roll::Mo));
        assert_eq!("BACK_DO".parse::<Roll>(), Ok(Roll::BackDo));
        assert_eq!("back-do".parse::<Roll>(), Ok(Roll::BackDo));
        assert_eq!("4".parse::<Roll>(), Ok(Roll::Yut));
        assert_eq!("-1".parse::<Roll>(), Ok(Roll::BackDo));
        assert!("seven".parse::<Roll>().is_err());
    }

    #[test]
    fn test_scripted_rolls() {
        let mut source = ScriptedRolls::new([Roll::Gae, Roll::Yut]);
        assert_eq!(source.roll(), Roll::Gae);
        assert_eq!(source.remaining(), 1);
        assert_eq!(source.roll(), Roll::Yut);
        assert_eq!(source.roll(), Roll::Do);
    }

    #[test]
    fn test_roll_turn_chains_extra_rolls() {
        let mut source = ScriptedRolls::new([Roll::Mo, Roll::Yut, Roll::Gae, Roll::Geol]);
        assert_eq!(source.roll_turn(), vec![Roll::Mo, Roll::Yut, Roll::Gae]);
        assert_eq!(source.roll_turn(), vec![Roll::Geol]);
    }
}
