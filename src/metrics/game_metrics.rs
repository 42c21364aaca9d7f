use std::time::{Duration, Instant};

use crate::game::Outcome;

/// Running tallies for the header line
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub games_played: u32,
    pub player_one_wins: u32,
    pub player_two_wins: u32,
    pub draws: u32,
    /// Highest level any player reached in a finished game
    pub best_level: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            games_played: 0,
            player_one_wins: 0,
            player_two_wins: 0,
            draws: 0,
            best_level: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, outcome: Outcome, top_level: u32) {
        self.games_played += 1;
        match outcome {
            Outcome::PlayerOneWins => self.player_one_wins += 1,
            Outcome::PlayerTwoWins => self.player_two_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::SoloLoss => {}
        }
        self.best_level = self.best_level.max(top_level);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
