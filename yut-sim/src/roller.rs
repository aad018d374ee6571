//! Randomized stick throws.

use rand::prelude::*;
use rand::rngs::StdRng;

use yut_core::{Roll, RollSource};

/// Four two-sided sticks, one of them marked on its flat side.
///
/// The number of flat sides up decides the roll: none is Mo, four is Yut.
/// A single flat is Do, or Back-Do when it is the marked stick.
#[derive(Clone, Debug)]
pub struct StickRoller {
    rng: StdRng,
}

impl StickRoller {
    pub fn new(seed: u64) -> StickRoller {
        StickRoller {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RollSource for StickRoller {
    fn roll(&mut self) -> Roll {
        let flats = (0..4).filter(|_| self.rng.random_bool(0.5)).count();
        match flats {
            0 => Roll::Mo,
            1 if self.rng.random_range(0..4) == 0 => Roll::BackDo,
            1 => Roll::Do,
            2 => Roll::Gae,
            3 => Roll::Geol,
            _ => Roll::Yut,
        }
    }
}
