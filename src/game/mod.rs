//! Core Connect Four rules: board representation with gravity drops, player
//! types, and terminal-state detection.

mod board;
mod outcome;
mod player;

pub use board::{Board, BoardDims, Cell, COLS, ROWS, WIN_LENGTH};
pub use outcome::GameOutcome;
pub use player::Player;
