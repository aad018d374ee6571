//! Simulation statistics tracking.

use std::time::Instant;

use yut_core::{Event, Roll};

use crate::player::GameRecord;

/// Statistics collected over a batch of games.
#[derive(Debug, Default)]
pub struct SimStats {
    /// Games played to a winner
    pub games: u64,

    /// Games abandoned at the action limit
    pub unfinished: u64,

    /// Wins indexed by team
    pub wins: Vec<u64>,

    pub turns: u64,
    pub rolls: u64,
    pub back_dos: u64,

    /// Catching moves, and pieces sent home by them
    pub catches: u64,
    pub pieces_caught: u64,
    pub extra_turns: u64,

    pub groupings: u64,
    pub declined: u64,
    pub largest_stack: usize,

    /// Longest game in turns
    pub max_turns: u64,

    /// For rate calculation
    start_time: Option<Instant>,
    last_log_time: Option<Instant>,
    last_log_games: u64,
}

impl SimStats {
    pub fn new(teams: u8) -> Self {
        Self {
            wins: vec![0; teams as usize],
            start_time: Some(Instant::now()),
            last_log_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// Fold one finished (or abandoned) game into the totals
    pub fn record_game(&mut self, record: &GameRecord) {
        match record.winner {
            Some(team) => {
                self.games += 1;
                if let Some(wins) = self.wins.get_mut(team.0 as usize) {
                    *wins += 1;
                }
            }
            None => self.unfinished += 1,
        }

        let turns = record.turns() as u64;
        self.turns += turns;
        self.max_turns = self.max_turns.max(turns);

        for event in &record.events {
            match event {
                Event::Rolled { roll, .. } => {
                    self.rolls += 1;
                    if *roll == Roll::BackDo {
                        self.back_dos += 1;
                    }
                }
                Event::Caught { captured, .. } => {
                    self.catches += 1;
                    self.pieces_caught += captured.len() as u64;
                }
                Event::ExtraTurn { .. } => self.extra_turns += 1,
                Event::Grouped { size, .. } => {
                    self.groupings += 1;
                    self.largest_stack = self.largest_stack.max(*size);
                }
                Event::GroupingDeclined { .. } => self.declined += 1,
                _ => {}
            }
        }
    }

    /// Games played, finished or not
    pub fn total_games(&self) -> u64 {
        self.games + self.unfinished
    }

    /// Get current games per second
    pub fn games_per_sec(&self) -> f64 {
        if let Some(start) = self.start_time {
            let elapsed = start.elapsed().as_secs_f64();
            if elapsed > 0.0 {
                return self.total_games() as f64 / elapsed;
            }
        }
        0.0
    }

    /// Check if we should log progress
    pub fn should_log(&self, interval_secs: u64) -> bool {
        if let Some(last) = self.last_log_time {
            last.elapsed().as_secs() >= interval_secs
        } else {
            true
        }
    }

    fn win_shares(&self) -> String {
        self.wins
            .iter()
            .enumerate()
            .map(|(team, &wins)| {
                let pct = if self.games > 0 {
                    100.0 * wins as f64 / self.games as f64
                } else {
                    0.0
                };
                format!("t{}={:.1}%", team + 1, pct)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Log progress and reset log timer
    pub fn log_progress(&mut self) {
        let now = Instant::now();
        let elapsed_total = self.start_time.map(|s| s.elapsed().as_secs()).unwrap_or(0);

        // Calculate rate since last log
        let rate = if let Some(last) = self.last_log_time {
            let elapsed = last.elapsed().as_secs_f64();
            let games = self.total_games() - self.last_log_games;
            if elapsed > 0.0 {
                games as f64 / elapsed
            } else {
                0.0
            }
        } else {
            self.games_per_sec()
        };

        println!(
            "[{:02}:{:02}:{:02}] games={} unfinished={} rate={:.0}/s catches={} stacks={}",
            elapsed_total / 3600,
            (elapsed_total % 3600) / 60,
            elapsed_total % 60,
            self.games,
            self.unfinished,
            rate,
            self.catches,
            self.groupings,
        );
        println!("           wins: {}", self.win_shares());

        self.last_log_time = Some(now);
        self.last_log_games = self.total_games();
    }

    /// Print final summary
    pub fn print_summary(&self) {
        println!("Games finished: {}", self.games);
        println!("Games abandoned: {}", self.unfinished);
        for (team, wins) in self.wins.iter().enumerate() {
            println!("  - Team {} wins: {}", team + 1, wins);
        }
        let games = self.total_games().max(1) as f64;
        println!("Turns: {} ({:.1}/game, longest {})", self.turns, self.turns as f64 / games, self.max_turns);
        println!("Rolls: {} (Back-Do {})", self.rolls, self.back_dos);
        println!(
            "Catches: {} ({} pieces sent home, {} extra turns)",
            self.catches, self.pieces_caught, self.extra_turns
        );
        println!(
            "Groupings: {} accepted, {} declined, largest stack {}",
            self.groupings, self.declined, self.largest_stack
        );

        if let Some(start) = self.start_time {
            let elapsed = start.elapsed().as_secs_f64();
            println!("Average rate: {:.0} games/sec", self.total_games() as f64 / elapsed);
        }
    }
}
