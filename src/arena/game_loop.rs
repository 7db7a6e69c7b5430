use std::time::{Duration, Instant};

use crate::ai::Agent;
use crate::error::MatchError;
use crate::game::{Board, BoardDims, GameOutcome, Player};

/// Think-time accounting for one side of a game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideTiming {
    pub moves: usize,
    pub think_time: Duration,
}

impl SideTiming {
    fn record(&mut self, elapsed: Duration) {
        self.moves += 1;
        self.think_time += elapsed;
    }
}

/// Result of a single game between two agents.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub outcome: GameOutcome,
    pub final_board: Board,
    pub red: SideTiming,
    pub yellow: SideTiming,
}

impl GameRecord {
    /// Total plies played.
    pub fn moves(&self) -> usize {
        self.red.moves + self.yellow.moves
    }
}

/// Play one game on a fresh board, Red moving first.
///
/// This is the only place the live board is mutated. The outcome is checked
/// after every accepted move and the game stops on a win or a full board.
pub fn play_game(
    dims: BoardDims,
    red: &mut dyn Agent,
    yellow: &mut dyn Agent,
) -> Result<GameRecord, MatchError> {
    let mut board = Board::new(dims);
    let mut player = Player::Red;
    let mut red_timing = SideTiming::default();
    let mut yellow_timing = SideTiming::default();

    let mut outcome = board.outcome();
    while !outcome.is_terminal() {
        let agent: &mut dyn Agent = match player {
            Player::Red => &mut *red,
            Player::Yellow => &mut *yellow,
        };

        let start = Instant::now();
        let column = agent
            .select_move(&board, player)
            .map_err(|source| MatchError::Engine {
                engine: agent.name().to_string(),
                source,
            })?;
        let elapsed = start.elapsed();
        match player {
            Player::Red => red_timing.record(elapsed),
            Player::Yellow => yellow_timing.record(elapsed),
        }

        board
            .apply(column, player)
            .map_err(|_| MatchError::IllegalMove {
                engine: agent.name().to_string(),
                column,
                legal: board.legal_moves(),
            })?;
        log::debug!(
            "{} ({}) played column {} in {:.1?}\n{}",
            agent.name(),
            player,
            column,
            elapsed,
            board
        );

        outcome = board.outcome();
        player = player.other();
    }

    Ok(GameRecord {
        outcome,
        final_board: board,
        red: red_timing,
        yellow: yellow_timing,
    })
}
