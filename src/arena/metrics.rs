use std::time::Duration;

use crate::game::Player;

use super::game_loop::GameRecord;

/// Which of the two engines in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }
}

/// Running totals for one engine.
#[derive(Debug, Clone, Default)]
pub struct EngineTally {
    pub wins: usize,
    pub moves: usize,
    pub think_time: Duration,
}

/// Match-level counters: wins per engine, draws, and think time per move.
#[derive(Debug, Clone, Default)]
pub struct MatchMetrics {
    tallies: [EngineTally; 2],
    draws: usize,
    games: usize,
    total_plies: usize,
}

impl MatchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a finished game in. `first_color` is the color the first engine played.
    pub fn record_game(&mut self, record: &GameRecord, first_color: Player) {
        let seat_of = |color: Player| {
            if color == first_color {
                Seat::First
            } else {
                Seat::Second
            }
        };

        self.games += 1;
        self.total_plies += record.moves();

        for (color, timing) in [(Player::Red, record.red), (Player::Yellow, record.yellow)] {
            let tally = &mut self.tallies[seat_of(color).index()];
            tally.moves += timing.moves;
            tally.think_time += timing.think_time;
        }

        match record.outcome.winner() {
            Some(winner) => self.tallies[seat_of(winner).index()].wins += 1,
            None => self.draws += 1,
        }
    }

    pub fn tally(&self, seat: Seat) -> &EngineTally {
        &self.tallies[seat.index()]
    }

    pub fn games(&self) -> usize {
        self.games
    }

    pub fn draws(&self) -> usize {
        self.draws
    }

    pub fn win_rate(&self, seat: Seat) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        self.tally(seat).wins as f32 / self.games as f32
    }

    pub fn draw_rate(&self) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        self.draws as f32 / self.games as f32
    }

    /// Mean think time per move; zero when the engine never moved.
    pub fn average_move_time(&self, seat: Seat) -> Duration {
        let tally = self.tally(seat);
        if tally.moves == 0 {
            return Duration::ZERO;
        }
        tally.think_time / u32::try_from(tally.moves).unwrap_or(u32::MAX)
    }

    pub fn average_game_length(&self) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_plies as f32 / self.games as f32
    }
}
