use super::Player;

/// Result of a position: still being played, won by one side, or drawn on a
/// full board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum GameOutcome {
    InProgress,
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Check if game is over
    pub fn is_terminal(self) -> bool {
        self != GameOutcome::InProgress
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(player),
            GameOutcome::InProgress | GameOutcome::Draw => None,
        }
    }
}
