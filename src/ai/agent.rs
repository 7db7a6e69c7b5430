use crate::error::SearchError;
use crate::game::{Board, GameOutcome, Player};

/// Calling contract between the match runner and a decision engine.
///
/// Engines receive a shared reference to the live board and must not keep it;
/// any exploration happens on private clones.
pub trait Agent {
    /// Select a column for `player` to drop into on `board`.
    fn select_move(&mut self, board: &Board, player: Player) -> Result<usize, SearchError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

/// Common root checks: a move can only be chosen on a live board.
pub(crate) fn ensure_playable(board: &Board) -> Result<(), SearchError> {
    let outcome = board.outcome();
    if let GameOutcome::Win(_) = outcome {
        return Err(SearchError::GameOver(outcome));
    }
    if board.legal_moves().is_empty() {
        return Err(SearchError::NoLegalMoves);
    }
    Ok(())
}
