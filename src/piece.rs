//! Active falling piece logic

use crate::board::{BUFFER_HEIGHT, Board};
use crate::srs::{RotationResult, try_rotate};
use crate::tetromino::{Cell, Rotation, RotationDirection, TetrominoType};
use serde::{Deserialize, Serialize};

/// Pieces spawn with their bounding box starting in this column
pub const SPAWN_COL: i32 = 3;

/// An active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    /// The type of tetromino
    pub piece_type: TetrominoType,
    /// Current rotation state
    pub rotation: Rotation,
    /// Origin of the piece's bounding box. Row 0 is the top of the
    /// hidden buffer, increasing downward.
    pub row: i32,
    pub col: i32,
}

impl Piece {
    /// Create a new piece at spawn position, just above the visible area
    pub fn new(piece_type: TetrominoType) -> Self {
        let row = match piece_type {
            TetrominoType::I => BUFFER_HEIGHT as i32 - 2,
            _ => BUFFER_HEIGHT as i32 - 1,
        };
        Self {
            piece_type,
            rotation: Rotation::North,
            row,
            col: SPAWN_COL,
        }
    }

    /// Get the absolute positions of all 4 blocks
    pub fn block_positions(&self) -> [Cell; 4] {
        self.piece_type.cells_at(self.rotation, self.row, self.col)
    }

    pub fn fits(&self, board: &Board) -> bool {
        board.is_valid_position(self.piece_type, self.rotation, self.row, self.col)
    }

    /// Whether the piece cannot fall any further
    pub fn is_resting(&self, board: &Board) -> bool {
        !board.is_valid_position(self.piece_type, self.rotation, self.row + 1, self.col)
    }

    /// Try to translate by (rows, cols), returns true if successful
    pub fn try_shift(&mut self, board: &Board, rows: i32, cols: i32) -> bool {
        if board.is_valid_position(self.piece_type, self.rotation, self.row + rows, self.col + cols) {
            self.row += rows;
            self.col += cols;
            true
        } else {
            false
        }
    }

    /// Try to rotate, using SRS wall kicks. The piece is left untouched on failure.
    pub fn rotate(&mut self, direction: RotationDirection, board: &Board) -> Option<RotationResult> {
        let result = try_rotate(
            board,
            self.piece_type,
            self.rotation,
            self.row,
            self.col,
            direction,
        )?;
        self.rotation = result.rotation;
        self.row += result.kick_row;
        self.col += result.kick_col;
        Some(result)
    }

    /// Get the ghost piece position (where the piece would land)
    pub fn ghost_row(&self, board: &Board) -> i32 {
        board.ghost_row(self.piece_type, self.rotation, self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TOTAL_HEIGHT;

    #[test]
    fn test_spawn_position() {
        let piece = Piece::new(TetrominoType::T);
        assert_eq!((piece.row, piece.col), (19, 3));
        let piece = Piece::new(TetrominoType::I);
        assert_eq!((piece.row, piece.col), (18, 3));
        assert_eq!(piece.rotation, Rotation::North);
    }

    #[test]
    fn test_every_piece_spawns_on_empty_board() {
        let board = Board::new();
        for piece_type in TetrominoType::all() {
            assert!(Piece::new(piece_type).fits(&board));
        }
    }

    #[test]
    fn test_shift_blocked_by_wall() {
        let board = Board::new();
        let mut piece = Piece::new(TetrominoType::O);
        // O occupies cols col+1..=col+2
        let mut moves = 0;
        while piece.try_shift(&board, 0, -1) {
            moves += 1;
        }
        assert_eq!(moves, 4);
        assert_eq!(piece.col, -1);
    }

    #[test]
    fn test_resting_and_ghost() {
        let board = Board::new();
        let mut piece = Piece::new(TetrominoType::T);
        let ghost = piece.ghost_row(&board);
        assert_eq!(ghost, TOTAL_HEIGHT as i32 - 2);
        assert!(!piece.is_resting(&board));
        piece.row = ghost;
        assert!(piece.is_resting(&board));
    }

    #[test]
    fn test_rotate_applies_kick() {
        let board = Board::new();
        let mut piece = Piece::new(TetrominoType::T);
        piece.row = TOTAL_HEIGHT as i32 - 2;
        piece.col = 4;
        let result = piece.rotate(RotationDirection::Clockwise, &board).unwrap();
        assert_eq!(piece.rotation, Rotation::East);
        assert_eq!(piece.row, TOTAL_HEIGHT as i32 - 2 + result.kick_row);
        assert_eq!(piece.col, 4 + result.kick_col);
        assert!(piece.fits(&board));
    }

    #[test]
    fn test_o_rotation_leaves_piece_untouched() {
        let board = Board::new();
        let mut piece = Piece::new(TetrominoType::O);
        let before = piece;
        assert!(piece.rotate(RotationDirection::CounterClockwise, &board).is_none());
        assert_eq!(piece, before);
    }
}
