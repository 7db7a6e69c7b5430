use std::fmt;

use super::{GameOutcome, Player};
use crate::error::MoveError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Number of consecutive pieces needed to win.
pub const WIN_LENGTH: usize = 4;

/// Row/column steps for the four line orientations: horizontal, vertical,
/// diagonal `\` and diagonal `/`.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

/// Grid dimensions of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardDims {
    pub rows: usize,
    pub cols: usize,
}

impl BoardDims {
    /// The standard 6 x 7 Connect Four grid.
    pub const STANDARD: BoardDims = BoardDims {
        rows: ROWS,
        cols: COLS,
    };

    pub fn new(rows: usize, cols: usize) -> Self {
        BoardDims { rows, cols }
    }

    /// Total number of cells, which bounds the length of any game.
    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }
}

impl Default for BoardDims {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A Connect Four grid. Row 0 is the top, row `rows - 1` is the bottom;
/// pieces dropped into a column land on the lowest empty row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    dims: BoardDims,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board with the given dimensions
    pub fn new(dims: BoardDims) -> Self {
        Board {
            dims,
            cells: vec![Cell::Empty; dims.capacity()],
        }
    }

    /// Create a new empty 6 x 7 board
    pub fn standard() -> Self {
        Self::new(BoardDims::STANDARD)
    }

    pub fn dims(&self) -> BoardDims {
        self.dims
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.dims.cols + col]
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.dims.cols + col] = cell;
    }

    /// Check if a piece can be dropped into a column
    pub fn is_playable(&self, col: usize) -> bool {
        col < self.dims.cols && self.dims.rows > 0 && self.get(0, col) == Cell::Empty
    }

    /// Playable columns in ascending order. Empty once the board is full.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..self.dims.cols)
            .filter(|&col| self.is_playable(col))
            .collect()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..self.dims.cols).all(|col| !self.is_playable(col))
    }

    /// Number of pieces on the board
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Drop a piece for `player` in a column, returns the row where it landed.
    /// The board is left untouched if the column is out of range or full.
    pub fn apply(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= self.dims.cols {
            return Err(MoveError::InvalidColumn {
                column: col,
                cols: self.dims.cols,
            });
        }
        if !self.is_playable(col) {
            return Err(MoveError::ColumnFull(col));
        }

        // Row 0 is empty, so the scan always finds a landing row.
        let row = (0..self.dims.rows)
            .rev()
            .find(|&row| self.get(row, col) == Cell::Empty)
            .ok_or(MoveError::ColumnFull(col))?;
        self.set(row, col, player.to_cell());
        Ok(row)
    }

    /// Private copies of the board after each legal move for `player`, in
    /// ascending column order. Columns that `apply` rejects are the illegal
    /// ones and are skipped.
    pub fn successors(&self, player: Player) -> impl Iterator<Item = (usize, Board)> + '_ {
        (0..self.dims.cols).filter_map(move |col| {
            let mut child = self.clone();
            match child.apply(col, player) {
                Ok(_) => Some((col, child)),
                Err(MoveError::ColumnFull(_) | MoveError::InvalidColumn { .. }) => None,
            }
        })
    }

    /// Scan the whole board for four consecutive pieces owned by `player`
    /// in any orientation.
    pub fn has_four_in_row(&self, player: Player) -> bool {
        let cell = player.to_cell();
        (0..self.dims.rows).any(|row| {
            (0..self.dims.cols).any(|col| {
                DIRECTIONS
                    .iter()
                    .any(|&(dr, dc)| self.line_from(row, col, dr, dc, cell))
            })
        })
    }

    /// Check if the piece at (row, col) is part of a four-in-a-row.
    /// Only lines through that cell are inspected, so this is the cheap check
    /// to run right after `apply`.
    pub fn is_winning_drop(&self, row: usize, col: usize) -> bool {
        let cell = self.get(row, col);
        if cell == Cell::Empty {
            return false;
        }

        DIRECTIONS.iter().any(|&(dr, dc)| {
            1 + self.run_length(row, col, dr, dc, cell) + self.run_length(row, col, -dr, -dc, cell)
                >= WIN_LENGTH
        })
    }

    /// Game result: a win for either player, a draw on a full board, or in progress.
    pub fn outcome(&self) -> GameOutcome {
        if self.has_four_in_row(Player::Red) {
            GameOutcome::Win(Player::Red)
        } else if self.has_four_in_row(Player::Yellow) {
            GameOutcome::Win(Player::Yellow)
        } else if self.is_full() {
            GameOutcome::Draw
        } else {
            GameOutcome::InProgress
        }
    }

    fn offset(
        &self,
        row: usize,
        col: usize,
        dr: isize,
        dc: isize,
        step: usize,
    ) -> Option<(usize, usize)> {
        let r = row as isize + dr * step as isize;
        let c = col as isize + dc * step as isize;
        if r < 0 || c < 0 || r >= self.dims.rows as isize || c >= self.dims.cols as isize {
            return None;
        }
        Some((r as usize, c as usize))
    }

    /// True if WIN_LENGTH cells starting at (row, col) along (dr, dc) all hold `cell`.
    fn line_from(&self, row: usize, col: usize, dr: isize, dc: isize, cell: Cell) -> bool {
        (0..WIN_LENGTH).all(|step| {
            self.offset(row, col, dr, dc, step)
                .is_some_and(|(r, c)| self.get(r, c) == cell)
        })
    }

    /// Count matching cells beyond (row, col) along (dr, dc), excluding the start.
    fn run_length(&self, row: usize, col: usize, dr: isize, dc: isize, cell: Cell) -> usize {
        (1..WIN_LENGTH)
            .take_while(|&step| {
                self.offset(row, col, dr, dc, step)
                    .is_some_and(|(r, c)| self.get(r, c) == cell)
            })
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.dims.rows {
            for col in 0..self.dims.cols {
                let symbol = match self.get(row, col) {
                    Cell::Empty => '.',
                    Cell::Red => 'R',
                    Cell::Yellow => 'Y',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        for col in 0..self.dims.cols {
            write!(f, "{}", col % 10)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn board_with(moves: &[(usize, Player)]) -> Board {
        let mut board = Board::standard();
        for &(col, player) in moves {
            board.apply(col, player).unwrap();
        }
        board
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::standard();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert_eq!(board.piece_count(), 0);
        assert_eq!(board.outcome(), GameOutcome::InProgress);
    }

    #[test]
    fn test_apply() {
        let mut board = Board::standard();

        // First piece lands at the bottom
        let row = board.apply(3, Player::Red).unwrap();
        assert_eq!(row, 5);
        assert_eq!(board.get(5, 3), Cell::Red);

        // Second piece stacks on top
        let row = board.apply(3, Player::Yellow).unwrap();
        assert_eq!(row, 4);
        assert_eq!(board.get(4, 3), Cell::Yellow);
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::standard();
        for _ in 0..ROWS {
            board.apply(0, Player::Red).unwrap();
        }

        assert!(!board.is_playable(0));
        let before = board.clone();
        assert_eq!(board.apply(0, Player::Yellow), Err(MoveError::ColumnFull(0)));
        assert_eq!(board, before, "failed apply must not touch the board");
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::standard();
        assert_eq!(
            board.apply(7, Player::Red),
            Err(MoveError::InvalidColumn { column: 7, cols: 7 })
        );
        assert!(!board.is_playable(7));
    }

    #[test]
    fn test_legal_moves_ascending() {
        let board = Board::standard();
        assert_eq!(board.legal_moves(), vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_legal_moves_drop_only_filled_column() {
        let mut board = Board::standard();
        for i in 0..ROWS {
            let player = if i % 2 == 0 { Player::Red } else { Player::Yellow };
            let before: Vec<bool> = (0..COLS).map(|c| board.is_playable(c)).collect();
            board.apply(2, player).unwrap();
            for c in (0..COLS).filter(|&c| c != 2) {
                assert_eq!(board.is_playable(c), before[c], "column {c} changed");
            }
        }
        assert_eq!(board.legal_moves(), vec![0, 1, 3, 4, 5, 6]);
    }

    #[test]
    fn test_successors_are_independent_copies() {
        let mut board = Board::standard();
        for _ in 0..ROWS {
            board.apply(4, Player::Yellow).unwrap();
        }
        let before = board.clone();
        let children: Vec<(usize, Board)> = board.successors(Player::Red).collect();

        let columns: Vec<usize> = children.iter().map(|(col, _)| *col).collect();
        assert_eq!(columns, vec![0, 1, 2, 3, 5, 6]);
        assert_eq!(columns, board.legal_moves());
        for (col, child) in &children {
            assert_eq!(child.get(ROWS - 1, *col), Cell::Red);
            assert_eq!(child.piece_count(), board.piece_count() + 1);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_full_board_has_no_legal_moves() {
        let mut board = Board::standard();
        for col in 0..COLS {
            for _ in 0..ROWS {
                board.apply(col, Player::Red).unwrap();
            }
        }
        assert!(board.is_full());
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn test_horizontal_win() {
        let board = board_with(&[
            (0, Player::Red),
            (1, Player::Red),
            (2, Player::Red),
            (3, Player::Red),
        ]);
        assert!(board.has_four_in_row(Player::Red));
        assert!(!board.has_four_in_row(Player::Yellow));
        assert!(board.is_winning_drop(5, 2));
        assert_eq!(board.outcome(), GameOutcome::Win(Player::Red));
    }

    #[test]
    fn test_horizontal_win_at_right_edge() {
        let board = board_with(&[
            (3, Player::Yellow),
            (4, Player::Yellow),
            (5, Player::Yellow),
            (6, Player::Yellow),
        ]);
        assert!(board.has_four_in_row(Player::Yellow));
        assert_eq!(board.outcome(), GameOutcome::Win(Player::Yellow));
    }

    #[test]
    fn test_vertical_win() {
        let board = board_with(&[
            (3, Player::Yellow),
            (3, Player::Yellow),
            (3, Player::Yellow),
            (3, Player::Yellow),
        ]);
        assert!(board.has_four_in_row(Player::Yellow));
        assert!(board.is_winning_drop(2, 3));
        assert_eq!(board.outcome(), GameOutcome::Win(Player::Yellow));
    }

    #[test]
    fn test_vertical_win_at_top() {
        let board = board_with(&[
            (6, Player::Red),
            (6, Player::Red),
            (6, Player::Yellow),
            (6, Player::Yellow),
            (6, Player::Yellow),
            (6, Player::Yellow),
        ]);
        assert!(board.has_four_in_row(Player::Yellow));
        assert!(!board.has_four_in_row(Player::Red));
    }

    #[test]
    fn test_diagonal_up_win() {
        // Diagonal / from (5,0) to (2,3)
        let board = board_with(&[
            (0, Player::Red),
            (1, Player::Yellow),
            (1, Player::Red),
            (2, Player::Yellow),
            (2, Player::Yellow),
            (2, Player::Red),
            (3, Player::Yellow),
            (3, Player::Yellow),
            (3, Player::Yellow),
            (3, Player::Red),
        ]);
        assert!(board.has_four_in_row(Player::Red));
        assert!(!board.has_four_in_row(Player::Yellow));
        assert!(board.is_winning_drop(2, 3));
        assert!(board.is_winning_drop(5, 0));
    }

    #[test]
    fn test_diagonal_down_win() {
        // Diagonal \ from (2,3) to (5,6)
        let board = board_with(&[
            (6, Player::Red),
            (5, Player::Yellow),
            (5, Player::Red),
            (4, Player::Yellow),
            (4, Player::Yellow),
            (4, Player::Red),
            (3, Player::Yellow),
            (3, Player::Yellow),
            (3, Player::Yellow),
            (3, Player::Red),
        ]);
        assert!(board.has_four_in_row(Player::Red));
        assert!(!board.has_four_in_row(Player::Yellow));
        assert!(board.is_winning_drop(2, 3));
    }

    #[test]
    fn test_every_window_detected() {
        for (dr, dc) in DIRECTIONS {
            for row in 0..ROWS {
                for col in 0..COLS {
                    let end_r = row as isize + dr * 3;
                    let end_c = col as isize + dc * 3;
                    if end_r < 0 || end_c < 0 || end_r >= ROWS as isize || end_c >= COLS as isize {
                        continue;
                    }
                    let mut board = Board::standard();
                    for step in 0..WIN_LENGTH {
                        let r = (row as isize + dr * step as isize) as usize;
                        let c = (col as isize + dc * step as isize) as usize;
                        board.set(r, c, Cell::Yellow);
                    }
                    assert!(
                        board.has_four_in_row(Player::Yellow),
                        "missed window at ({row},{col}) dir ({dr},{dc})"
                    );
                    assert!(!board.has_four_in_row(Player::Red));
                }
            }
        }
    }

    #[test]
    fn test_no_win_with_three() {
        let board = board_with(&[(0, Player::Red), (1, Player::Red), (2, Player::Red)]);
        assert!(!board.has_four_in_row(Player::Red));
        assert!(!board.is_winning_drop(5, 1));
    }

    #[test]
    fn test_broken_line_is_not_a_win() {
        let board = board_with(&[
            (0, Player::Red),
            (1, Player::Red),
            (2, Player::Yellow),
            (3, Player::Red),
            (4, Player::Red),
        ]);
        assert!(!board.has_four_in_row(Player::Red));
    }

    #[test]
    fn test_incremental_matches_full_scan() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let mut board = Board::standard();
            let mut player = Player::Red;
            loop {
                let legal = board.legal_moves();
                if legal.is_empty() {
                    break;
                }
                let col = legal[rng.random_range(0..legal.len())];
                let row = board.apply(col, player).unwrap();
                assert_eq!(board.is_winning_drop(row, col), board.has_four_in_row(player));
                if board.has_four_in_row(player) {
                    break;
                }
                player = player.other();
            }
        }
    }

    #[test]
    fn test_custom_dimensions() {
        let mut board = Board::new(BoardDims::new(4, 5));
        assert_eq!(board.legal_moves(), vec![0, 1, 2, 3, 4]);
        for _ in 0..4 {
            board.apply(4, Player::Red).unwrap();
        }
        assert!(board.has_four_in_row(Player::Red));
        assert!(!board.is_playable(4));
    }

    #[test]
    fn test_display() {
        let board = board_with(&[(0, Player::Red), (1, Player::Yellow)]);
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), ROWS + 1);
        assert_eq!(lines[0], ".......");
        assert_eq!(lines[5], "RY.....");
        assert_eq!(lines[6], "0123456");
    }
}
