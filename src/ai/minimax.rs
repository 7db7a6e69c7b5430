use crate::error::SearchError;
use crate::game::{Board, Player};

use super::agent::{ensure_playable, Agent};

/// Score of a position where Red has four in a row. Yellow wins score the
/// negation. Any positional score must stay well below this.
pub const WIN_SCORE: i32 = 1_000_000;

/// Best column and the minimax value of the position, from Red's point of
/// view. `column` is `None` when the position itself is a cutoff (depth 0, a
/// completed four, or a full board) and only its score is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub column: Option<usize>,
    pub score: i32,
}

/// Node and cutoff counters for one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

/// Depth-limited minimax with alpha-beta pruning.
///
/// Red maximizes and Yellow minimizes. Cutoff nodes are scored only by
/// win/loss: `WIN_SCORE`, `-WIN_SCORE`, or `0`. Columns are tried in ascending
/// order and only a strict improvement replaces the best column, so ties go
/// to the leftmost column.
pub fn search(
    board: &Board,
    depth: usize,
    alpha: i32,
    beta: i32,
    maximizing: bool,
) -> SearchResult {
    search_with_stats(board, depth, alpha, beta, maximizing).0
}

/// Search from the root with the full window.
///
/// Fails only when the board has no legal moves. A finished position or
/// `depth == 0` yields its cutoff score with no column.
pub fn adversarial_search(
    board: &Board,
    depth: usize,
    maximizing: bool,
) -> Result<SearchResult, SearchError> {
    if board.is_full() {
        return Err(SearchError::NoLegalMoves);
    }
    Ok(search(board, depth, i32::MIN, i32::MAX, maximizing))
}

/// Like [`search`], also returning node and cutoff counts.
pub fn search_with_stats(
    board: &Board,
    depth: usize,
    alpha: i32,
    beta: i32,
    maximizing: bool,
) -> (SearchResult, SearchStats) {
    let mut stats = SearchStats::default();
    let (column, score) = minimax(board, depth, alpha, beta, maximizing, &mut stats);
    (SearchResult { column, score }, stats)
}

/// Static value of a cutoff node.
fn leaf_score(red_won: bool, yellow_won: bool) -> i32 {
    if red_won {
        WIN_SCORE
    } else if yellow_won {
        -WIN_SCORE
    } else {
        0
    }
}

fn minimax(
    board: &Board,
    depth: usize,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    stats: &mut SearchStats,
) -> (Option<usize>, i32) {
    stats.nodes += 1;

    let legal = board.legal_moves();
    let red_won = board.has_four_in_row(Player::Red);
    let yellow_won = board.has_four_in_row(Player::Yellow);
    if depth == 0 || red_won || yellow_won || legal.is_empty() {
        return (None, leaf_score(red_won, yellow_won));
    }

    let player = if maximizing { Player::Red } else { Player::Yellow };
    let mut best_column = legal[0];
    let mut best_score = if maximizing { i32::MIN } else { i32::MAX };

    for (col, child) in board.successors(player) {
        let (_, score) = minimax(&child, depth - 1, alpha, beta, !maximizing, stats);
        if maximizing {
            if score > best_score {
                best_score = score;
                best_column = col;
            }
            alpha = alpha.max(best_score);
        } else {
            if score < best_score {
                best_score = score;
                best_column = col;
            }
            beta = beta.min(best_score);
        }
        if alpha >= beta {
            stats.cutoffs += 1;
            break;
        }
    }

    (Some(best_column), best_score)
}

/// Minimax engine configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MinimaxConfig {
    /// Search depth in plies.
    pub depth: usize,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        MinimaxConfig { depth: 3 }
    }
}

/// Minimax agent with alpha-beta pruning. Plays as maximizer when it is Red.
pub struct MinimaxAgent {
    depth: usize,
    last_stats: SearchStats,
}

impl MinimaxAgent {
    pub fn new(depth: usize) -> Self {
        MinimaxAgent {
            depth,
            last_stats: SearchStats::default(),
        }
    }

    pub fn from_config(config: &MinimaxConfig) -> Self {
        Self::new(config.depth)
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Counters from the most recent decision.
    pub fn last_stats(&self) -> SearchStats {
        self.last_stats
    }
}

impl Agent for MinimaxAgent {
    fn select_move(&mut self, board: &Board, player: Player) -> Result<usize, SearchError> {
        if self.depth == 0 {
            return Err(SearchError::ZeroDepth);
        }
        ensure_playable(board)?;

        let (result, stats) = search_with_stats(
            board,
            self.depth,
            i32::MIN,
            i32::MAX,
            player.is_maximizing(),
        );
        self.last_stats = stats;
        // A live root with depth >= 1 always expands, so a column is chosen.
        let column = result.column.ok_or(SearchError::NoLegalMoves)?;
        log::debug!(
            "minimax (depth {}) as {}: column {} score {} ({} nodes, {} cutoffs)",
            self.depth,
            player,
            column,
            result.score,
            stats.nodes,
            stats.cutoffs
        );
        Ok(column)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
