use std::cmp::Ordering;
use std::fmt;

use crate::ai::Agent;
use crate::error::MatchError;
use crate::game::{BoardDims, GameOutcome, Player};

use super::game_loop::play_game;
use super::metrics::{MatchMetrics, Seat};

/// Match configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Swap colors every other game. When off, the first engine is always
    /// Red and moves first.
    pub alternate_colors: bool,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            num_games: 10,
            alternate_colors: false,
        }
    }
}

/// Per-engine line of a match summary.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EngineSummary {
    pub name: String,
    pub wins: usize,
    pub win_rate: f32,
    pub moves: usize,
    pub avg_move_ms: f64,
}

/// Which engine came out ahead. `None` means the two were level.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Verdict {
    pub stronger: Option<String>,
    pub faster: Option<String>,
}

/// Final report of a match.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MatchSummary {
    pub games: usize,
    pub draws: usize,
    pub draw_rate: f32,
    pub average_game_length: f32,
    pub engines: [EngineSummary; 2],
    pub verdict: Verdict,
}

impl MatchSummary {
    fn from_metrics(metrics: &MatchMetrics, names: [&str; 2]) -> Self {
        let engine = |seat: Seat, name: &str| {
            let tally = metrics.tally(seat);
            EngineSummary {
                name: name.to_string(),
                wins: tally.wins,
                win_rate: metrics.win_rate(seat),
                moves: tally.moves,
                avg_move_ms: metrics.average_move_time(seat).as_secs_f64() * 1000.0,
            }
        };
        let engines = [engine(Seat::First, names[0]), engine(Seat::Second, names[1])];
        let verdict = Verdict::judge(&engines);

        MatchSummary {
            games: metrics.games(),
            draws: metrics.draws(),
            draw_rate: metrics.draw_rate(),
            average_game_length: metrics.average_game_length(),
            engines,
            verdict,
        }
    }
}

impl Verdict {
    fn judge(engines: &[EngineSummary; 2]) -> Self {
        let [first, second] = engines;
        let stronger = match first.wins.cmp(&second.wins) {
            Ordering::Greater => Some(first.name.clone()),
            Ordering::Less => Some(second.name.clone()),
            Ordering::Equal => None,
        };
        let faster = match first.avg_move_ms.partial_cmp(&second.avg_move_ms) {
            Some(Ordering::Less) => Some(first.name.clone()),
            Some(Ordering::Greater) => Some(second.name.clone()),
            _ => None,
        };
        Verdict { stronger, faster }
    }
}

impl fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for engine in &self.engines {
            writeln!(f, "{} wins: {} / {}", engine.name, engine.wins, self.games)?;
        }
        writeln!(
            f,
            "Draws: {} / {} ({:.1}%)",
            self.draws,
            self.games,
            self.draw_rate * 100.0
        )?;
        writeln!(f, "Average game length: {:.1} moves", self.average_game_length)?;
        for engine in &self.engines {
            writeln!(
                f,
                "Average {} move time: {:.2} ms ({} moves)",
                engine.name, engine.avg_move_ms, engine.moves
            )?;
        }
        match &self.verdict.stronger {
            Some(name) => writeln!(f, "{name} is winning more games.")?,
            None => writeln!(f, "Both engines are equally strong in win rate.")?,
        }
        match &self.verdict.faster {
            Some(name) => write!(f, "{name} is faster per move."),
            None => write!(f, "Both engines take the same time per move."),
        }
    }
}

/// Runs a series of games between two engines and aggregates the results.
pub struct Arena {
    config: ArenaConfig,
    dims: BoardDims,
}

impl Arena {
    pub fn new(config: ArenaConfig, dims: BoardDims) -> Self {
        Arena { config, dims }
    }

    /// Color played by the first engine in game `game_idx`.
    fn first_color(&self, game_idx: usize) -> Player {
        if self.config.alternate_colors && game_idx % 2 == 1 {
            Player::Yellow
        } else {
            Player::Red
        }
    }

    /// Play the configured number of games. The first engine is Red unless
    /// colors alternate.
    pub fn run(
        &self,
        first: &mut dyn Agent,
        second: &mut dyn Agent,
    ) -> Result<MatchSummary, MatchError> {
        let names = [first.name().to_string(), second.name().to_string()];
        let mut metrics = MatchMetrics::new();

        log::info!(
            "Starting {} games: {} vs {} on a {}x{} board",
            self.config.num_games,
            names[0],
            names[1],
            self.dims.rows,
            self.dims.cols
        );

        for game_idx in 0..self.config.num_games {
            let first_color = self.first_color(game_idx);
            let record = match first_color {
                Player::Red => play_game(self.dims, &mut *first, &mut *second)?,
                Player::Yellow => play_game(self.dims, &mut *second, &mut *first)?,
            };
            metrics.record_game(&record, first_color);

            let result = match record.outcome {
                GameOutcome::Win(winner) if winner == first_color => format!("{} wins", names[0]),
                GameOutcome::Win(_) => format!("{} wins", names[1]),
                GameOutcome::Draw | GameOutcome::InProgress => "draw".to_string(),
            };
            log::info!(
                "Game {}/{}: {} after {} moves ({} played {})",
                game_idx + 1,
                self.config.num_games,
                result,
                record.moves(),
                names[0],
                first_color.name()
            );
        }

        Ok(MatchSummary::from_metrics(&metrics, [names[0].as_str(), names[1].as_str()]))
    }
}
