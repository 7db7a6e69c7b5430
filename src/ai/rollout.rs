use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::error::{MoveError, SearchError};
use crate::game::{Board, Player};

use super::agent::{ensure_playable, Agent};

/// Accumulated rollout score of one candidate column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveScore {
    pub column: usize,
    pub score: i64,
}

/// Play uniformly random moves from `board` until the game ends, with
/// `to_move` moving first. Returns +1 if `player` wins, -1 if the opponent
/// wins, 0 on a full board.
pub fn rollout<R: Rng + ?Sized>(
    mut board: Board,
    player: Player,
    to_move: Player,
    rng: &mut R,
) -> Result<i32, MoveError> {
    let mut current = to_move;
    loop {
        let legal = board.legal_moves();
        if legal.is_empty() {
            return Ok(0);
        }
        let col = legal[rng.random_range(0..legal.len())];
        let row = board.apply(col, current)?;
        if board.is_winning_drop(row, col) {
            return Ok(if current == player { 1 } else { -1 });
        }
        current = current.other();
    }
}

/// Score every legal move for `player` by summing `simulations` random
/// rollouts from the position after it.
///
/// One seed per candidate is drawn from `rng` in ascending column order, and
/// each candidate runs its rollouts on its own generator. The scores are the
/// same whether candidates run sequentially or across the rayon pool.
pub fn evaluate_moves<R: Rng + ?Sized>(
    board: &Board,
    player: Player,
    simulations: usize,
    rng: &mut R,
    parallel: bool,
) -> Result<Vec<MoveScore>, SearchError> {
    if simulations == 0 {
        return Err(SearchError::ZeroSimulations);
    }
    ensure_playable(board)?;

    let candidates: Vec<(usize, Board, u64)> = board
        .successors(player)
        .map(|(col, child)| (col, child, rng.random::<u64>()))
        .collect();

    let score = |(col, child, seed): &(usize, Board, u64)| {
        score_candidate(*col, child, player, simulations, *seed)
    };
    let scores: Result<Vec<MoveScore>, MoveError> = if parallel {
        candidates.par_iter().map(score).collect()
    } else {
        candidates.iter().map(score).collect()
    };
    Ok(scores?)
}

fn score_candidate(
    column: usize,
    child: &Board,
    player: Player,
    simulations: usize,
    seed: u64,
) -> Result<MoveScore, MoveError> {
    // The candidate itself ends the game; every rollout is a win.
    if child.has_four_in_row(player) {
        return Ok(MoveScore {
            column,
            score: simulations as i64,
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut score = 0i64;
    for _ in 0..simulations {
        score += i64::from(rollout(child.clone(), player, player.other(), &mut rng)?);
    }
    Ok(MoveScore { column, score })
}

/// Column with the highest score. Ties keep the first column scanned.
pub fn best_move(scores: &[MoveScore]) -> Option<usize> {
    let mut best: Option<MoveScore> = None;
    for &candidate in scores {
        if best.map_or(true, |b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }
    best.map(|b| b.column)
}

/// Pick a move for `player` by Monte Carlo rollouts, evaluating candidates
/// sequentially.
pub fn select_move<R: Rng + ?Sized>(
    board: &Board,
    player: Player,
    simulations: usize,
    rng: &mut R,
) -> Result<usize, SearchError> {
    let scores = evaluate_moves(board, player, simulations, rng, false)?;
    best_move(&scores).ok_or(SearchError::NoLegalMoves)
}

/// Rollout engine configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RolloutConfig {
    /// Random playouts per candidate move.
    pub simulations_per_move: usize,
    /// Evaluate candidate moves on the rayon thread pool.
    pub parallel: bool,
    /// Fixed RNG seed; drawn from the OS when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        RolloutConfig {
            simulations_per_move: 100,
            parallel: false,
            seed: None,
        }
    }
}

/// Monte Carlo agent: random-playout scoring of each legal move.
pub struct RolloutAgent<R = StdRng> {
    simulations: usize,
    parallel: bool,
    rng: R,
}

impl RolloutAgent<StdRng> {
    pub fn new(simulations: usize) -> Self {
        Self::with_rng(simulations, StdRng::from_os_rng())
    }

    /// Agent with a fixed seed, for reproducible matches.
    pub fn seeded(simulations: usize, seed: u64) -> Self {
        Self::with_rng(simulations, StdRng::seed_from_u64(seed))
    }

    pub fn from_config(config: &RolloutConfig) -> Self {
        let agent = match config.seed {
            Some(seed) => Self::seeded(config.simulations_per_move, seed),
            None => Self::new(config.simulations_per_move),
        };
        agent.parallel(config.parallel)
    }
}

impl<R: Rng> RolloutAgent<R> {
    pub fn with_rng(simulations: usize, rng: R) -> Self {
        RolloutAgent {
            simulations,
            parallel: false,
            rng,
        }
    }

    /// Evaluate candidate moves on the rayon thread pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn simulations(&self) -> usize {
        self.simulations
    }
}

impl<R: Rng> Agent for RolloutAgent<R> {
    fn select_move(&mut self, board: &Board, player: Player) -> Result<usize, SearchError> {
        let scores = evaluate_moves(board, player, self.simulations, &mut self.rng, self.parallel)?;
        let column = best_move(&scores).ok_or(SearchError::NoLegalMoves)?;
        log::debug!(
            "rollout ({} sims/move) as {}: column {} from {:?}",
            self.simulations,
            player,
            column,
            scores.iter().map(|s| (s.column, s.score)).collect::<Vec<_>>()
        );
        Ok(column)
    }

    fn name(&self) -> &str {
        "Rollout"
    }
}
