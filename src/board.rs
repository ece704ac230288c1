//! Game board representation and collision detection

use crate::tetromino::{Rotation, TetrominoType};

/// Standard Tetris board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;
/// Hidden rows above the visible board for spawning
pub const BUFFER_HEIGHT: usize = 20;
pub const TOTAL_HEIGHT: usize = BOARD_HEIGHT + BUFFER_HEIGHT;

/// A cell on the board - either empty or filled by a locked piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(TetrominoType),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// Result of [`Board::clear_lines`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearedLines {
    pub count: usize,
    /// Row indices as they were before compaction, top to bottom
    pub rows: Vec<usize>,
}

/// The game board
#[derive(Debug, Clone)]
pub struct Board {
    /// Grid stored as [row][col]. Row 0 is the top of the hidden buffer,
    /// rows `BUFFER_HEIGHT..` are visible.
    cells: [[Cell; BOARD_WIDTH]; TOTAL_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_WIDTH]; TOTAL_HEIGHT],
        }
    }

    /// Get the cell at a position (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        let row = row as usize;
        let col = col as usize;
        if row >= TOTAL_HEIGHT || col >= BOARD_WIDTH {
            return None;
        }
        Some(self.cells[row][col])
    }

    /// Set a cell at a position
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        let row = row as usize;
        let col = col as usize;
        if row >= TOTAL_HEIGHT || col >= BOARD_WIDTH {
            return false;
        }
        self.cells[row][col] = cell;
        true
    }

    /// Off-board counts as occupied
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        self.get(row, col).is_none_or(|cell| cell.is_filled())
    }

    /// Check if a set of block positions are all inside the board and empty
    pub fn are_positions_valid(&self, positions: &[(i32, i32)]) -> bool {
        positions
            .iter()
            .all(|&(row, col)| !self.is_occupied(row, col))
    }

    /// Check whether `piece` fits with its origin at (row, col)
    pub fn is_valid_position(
        &self,
        piece: TetrominoType,
        rotation: Rotation,
        row: i32,
        col: i32,
    ) -> bool {
        self.are_positions_valid(&piece.cells_at(rotation, row, col))
    }

    /// Lock a piece onto the board. The position must already be validated.
    pub fn lock_piece(&mut self, piece: TetrominoType, rotation: Rotation, row: i32, col: i32) {
        for (r, c) in piece.cells_at(rotation, row, col) {
            self.set(r, c, Cell::Filled(piece));
        }
    }

    /// Remove every complete row at once and compact the rest downward
    pub fn clear_lines(&mut self) -> ClearedLines {
        let rows: Vec<usize> = (0..TOTAL_HEIGHT)
            .filter(|&row| self.is_line_full(row))
            .collect();
        if rows.is_empty() {
            return ClearedLines::default();
        }

        // Walk bottom-up, copying surviving rows to the next free slot
        let mut write_row = TOTAL_HEIGHT;
        for read_row in (0..TOTAL_HEIGHT).rev() {
            if !self.is_line_full(read_row) {
                write_row -= 1;
                if write_row != read_row {
                    self.cells[write_row] = self.cells[read_row];
                }
            }
        }

        // Fill the top with empty rows
        for row in 0..write_row {
            self.cells[row] = [Cell::Empty; BOARD_WIDTH];
        }

        ClearedLines {
            count: rows.len(),
            rows,
        }
    }

    /// Check if a line is completely filled
    fn is_line_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|cell| cell.is_filled())
    }

    /// Lowest row the piece could fall to from `row`
    pub fn ghost_row(&self, piece: TetrominoType, rotation: Rotation, row: i32, col: i32) -> i32 {
        let mut ghost_row = row;
        while self.is_valid_position(piece, rotation, ghost_row + 1, col) {
            ghost_row += 1;
        }
        ghost_row
    }

    /// Whether anything sits in the hidden buffer rows
    pub fn is_top_row_occupied(&self) -> bool {
        self.cells[..BUFFER_HEIGHT]
            .iter()
            .any(|row| row.iter().any(|cell| cell.is_filled()))
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    pub fn reset(&mut self) {
        self.cells = [[Cell::Empty; BOARD_WIDTH]; TOTAL_HEIGHT];
    }

    /// All rows, top of the hidden buffer first
    pub fn rows(&self) -> &[[Cell; BOARD_WIDTH]; TOTAL_HEIGHT] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOTTOM: i32 = TOTAL_HEIGHT as i32 - 1;

    fn fill_row(board: &mut Board, row: i32) {
        for col in 0..BOARD_WIDTH as i32 {
            board.set(row, col, Cell::Filled(TetrominoType::I));
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert!(!board.is_top_row_occupied());
        assert_eq!(board.rows().len(), BUFFER_HEIGHT + BOARD_HEIGHT);
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new();
        assert!(board.set(5, 5, Cell::Filled(TetrominoType::Z)));
        assert_eq!(board.get(5, 5), Some(Cell::Filled(TetrominoType::Z)));
    }

    #[test]
    fn test_out_of_bounds() {
        let board = Board::new();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(TOTAL_HEIGHT as i32, 0), None);
        assert_eq!(board.get(0, BOARD_WIDTH as i32), None);
        assert!(board.is_occupied(-1, 0));
        assert!(board.is_occupied(TOTAL_HEIGHT as i32, 3));
    }

    #[test]
    fn test_valid_position_walls_and_floor() {
        let board = Board::new();
        assert!(board.is_valid_position(TetrominoType::T, Rotation::North, 19, 3));
        // Left wall: T North occupies cols col..col+2
        assert!(board.is_valid_position(TetrominoType::T, Rotation::North, 19, 0));
        assert!(!board.is_valid_position(TetrominoType::T, Rotation::North, 19, -1));
        assert!(!board.is_valid_position(TetrominoType::T, Rotation::North, 19, 8));
        // Floor: T North occupies rows row..row+1
        assert!(board.is_valid_position(TetrominoType::T, Rotation::North, BOTTOM - 1, 3));
        assert!(!board.is_valid_position(TetrominoType::T, Rotation::North, BOTTOM, 3));
    }

    #[test]
    fn test_lock_piece_blocks_position() {
        let mut board = Board::new();
        board.lock_piece(TetrominoType::O, Rotation::North, BOTTOM - 1, 3);
        assert_eq!(board.get(BOTTOM, 4), Some(Cell::Filled(TetrominoType::O)));
        assert!(!board.is_valid_position(TetrominoType::O, Rotation::North, BOTTOM - 1, 3));
    }

    #[test]
    fn test_clear_on_empty_board() {
        let mut board = Board::new();
        assert_eq!(board.clear_lines(), ClearedLines::default());
    }

    #[test]
    fn test_clear_single_line() {
        let mut board = Board::new();
        fill_row(&mut board, BOTTOM);
        board.set(BOTTOM - 1, 0, Cell::Filled(TetrominoType::S));

        let cleared = board.clear_lines();
        assert_eq!(cleared.count, 1);
        assert_eq!(cleared.rows, vec![BOTTOM as usize]);
        // The block above drops by one row
        assert_eq!(board.get(BOTTOM, 0), Some(Cell::Filled(TetrominoType::S)));
        assert!(board.get(BOTTOM - 1, 0).unwrap().is_empty());
        assert!((1..BOARD_WIDTH as i32).all(|c| board.get(BOTTOM, c).unwrap().is_empty()));
    }

    #[test]
    fn test_clear_non_adjacent_lines() {
        let mut board = Board::new();
        fill_row(&mut board, BOTTOM);
        fill_row(&mut board, BOTTOM - 2);
        board.set(BOTTOM - 1, 7, Cell::Filled(TetrominoType::J));
        board.set(BOTTOM - 3, 2, Cell::Filled(TetrominoType::L));

        let cleared = board.clear_lines();
        assert_eq!(cleared.count, 2);
        assert_eq!(cleared.rows, vec![BOTTOM as usize - 2, BOTTOM as usize]);
        assert_eq!(board.get(BOTTOM, 7), Some(Cell::Filled(TetrominoType::J)));
        assert_eq!(board.get(BOTTOM - 1, 2), Some(Cell::Filled(TetrominoType::L)));
        assert_eq!(board.get(BOTTOM - 3, 2), Some(Cell::Empty));
    }

    #[test]
    fn test_ghost_row() {
        let mut board = Board::new();
        assert_eq!(board.ghost_row(TetrominoType::T, Rotation::North, 19, 3), BOTTOM - 1);
        fill_row(&mut board, BOTTOM);
        assert_eq!(board.ghost_row(TetrominoType::T, Rotation::North, 19, 3), BOTTOM - 2);
        // Already resting: ghost is the current row
        assert_eq!(
            board.ghost_row(TetrominoType::T, Rotation::North, BOTTOM - 2, 3),
            BOTTOM - 2
        );
    }

    #[test]
    fn test_top_row_occupied_and_reset() {
        let mut board = Board::new();
        board.set(BUFFER_HEIGHT as i32, 0, Cell::Filled(TetrominoType::T));
        assert!(!board.is_top_row_occupied());
        board.set(BUFFER_HEIGHT as i32 - 1, 0, Cell::Filled(TetrominoType::T));
        assert!(board.is_top_row_occupied());
        board.reset();
        assert!(board.is_empty());
    }

    proptest! {
        #[test]
        fn clearing_full_rows_shifts_marker_down(
            full in proptest::collection::btree_set(25usize..TOTAL_HEIGHT, 1..5),
        ) {
            let mut board = Board::new();
            for &row in &full {
                fill_row(&mut board, row as i32);
            }
            // Marker sits above every full row
            board.set(20, 4, Cell::Filled(TetrominoType::T));

            let cleared = board.clear_lines();
            prop_assert_eq!(cleared.count, full.len());
            prop_assert_eq!(cleared.rows, full.iter().copied().collect::<Vec<_>>());
            let expected = 20 + full.len() as i32;
            prop_assert_eq!(board.get(expected, 4), Some(Cell::Filled(TetrominoType::T)));
            let filled = board.rows().iter().flatten().filter(|c| c.is_filled()).count();
            prop_assert_eq!(filled, 1);
        }
    }
}
