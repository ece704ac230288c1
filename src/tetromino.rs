//! Tetromino definitions and shapes
//!
//! All 7 standard tetrominoes with their rotations using SRS (Super Rotation System).
//! Offsets are `(row, col)` inside the piece's bounding box, row increasing downward.

use serde::{Deserialize, Serialize};

/// A `(row, col)` pair. Relative to the piece origin in shape tables,
/// absolute once placed on the board.
pub type Cell = (i32, i32);

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TetrominoType {
    I, // long bar
    O, // square
    T,
    S,
    Z,
    J,
    L,
}

impl TetrominoType {
    /// Get all tetromino types for bag randomization
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::O,
            TetrominoType::T,
            TetrominoType::S,
            TetrominoType::Z,
            TetrominoType::J,
            TetrominoType::L,
        ]
    }

    /// Get the 4 cell offsets of this tetromino in the given rotation state
    pub fn shape(&self, rotation: Rotation) -> [Cell; 4] {
        match self {
            // I lives in a 4x4 box, everything else in 3x3
            TetrominoType::I => match rotation {
                Rotation::North => [(1, 0), (1, 1), (1, 2), (1, 3)],
                Rotation::East => [(0, 2), (1, 2), (2, 2), (3, 2)],
                Rotation::South => [(2, 0), (2, 1), (2, 2), (2, 3)],
                Rotation::West => [(0, 1), (1, 1), (2, 1), (3, 1)],
            },
            TetrominoType::O => [(0, 1), (0, 2), (1, 1), (1, 2)],
            // North: .T.   East: .T.   South: ...   West: .T.
            //        TTT         .TT          TTT         TT.
            //        ...         .T.          .T.         .T.
            TetrominoType::T => match rotation {
                Rotation::North => [(0, 1), (1, 0), (1, 1), (1, 2)],
                Rotation::East => [(0, 1), (1, 1), (1, 2), (2, 1)],
                Rotation::South => [(1, 0), (1, 1), (1, 2), (2, 1)],
                Rotation::West => [(0, 1), (1, 0), (1, 1), (2, 1)],
            },
            // North: .SS   East: .S.   South: ...   West: S..
            //        SS.         .SS          .SS         SS.
            //        ...         ..S          SS.         .S.
            TetrominoType::S => match rotation {
                Rotation::North => [(0, 1), (0, 2), (1, 0), (1, 1)],
                Rotation::East => [(0, 1), (1, 1), (1, 2), (2, 2)],
                Rotation::South => [(1, 1), (1, 2), (2, 0), (2, 1)],
                Rotation::West => [(0, 0), (1, 0), (1, 1), (2, 1)],
            },
            // North: ZZ.   East: ..Z   South: ...   West: .Z.
            //        .ZZ         .ZZ          ZZ.         ZZ.
            //        ...         .Z.          .ZZ         Z..
            TetrominoType::Z => match rotation {
                Rotation::North => [(0, 0), (0, 1), (1, 1), (1, 2)],
                Rotation::East => [(0, 2), (1, 1), (1, 2), (2, 1)],
                Rotation::South => [(1, 0), (1, 1), (2, 1), (2, 2)],
                Rotation::West => [(0, 1), (1, 0), (1, 1), (2, 0)],
            },
            TetrominoType::J => match rotation {
                Rotation::North => [(0, 0), (1, 0), (1, 1), (1, 2)],
                Rotation::East => [(0, 1), (0, 2), (1, 1), (2, 1)],
                Rotation::South => [(1, 0), (1, 1), (1, 2), (2, 2)],
                Rotation::West => [(0, 1), (1, 1), (2, 0), (2, 1)],
            },
            TetrominoType::L => match rotation {
                Rotation::North => [(0, 2), (1, 0), (1, 1), (1, 2)],
                Rotation::East => [(0, 1), (1, 1), (2, 1), (2, 2)],
                Rotation::South => [(1, 0), (1, 1), (1, 2), (2, 0)],
                Rotation::West => [(0, 0), (0, 1), (1, 1), (2, 1)],
            },
        }
    }

    /// Board-space cells of this tetromino with its origin at `(row, col)`
    pub fn cells_at(&self, rotation: Rotation, row: i32, col: i32) -> [Cell; 4] {
        self.shape(rotation).map(|(dr, dc)| (row + dr, col + dc))
    }
}

/// Cell offsets for `piece` in rotation state `rotation`, taken modulo 4
pub fn cells_of(piece: TetrominoType, rotation: i32) -> [Cell; 4] {
    piece.shape(Rotation::from_index(rotation))
}

/// Board-space cells for `piece` in rotation state `rotation` at the given origin
pub fn absolute_cells_of(piece: TetrominoType, rotation: i32, row: i32, col: i32) -> [Cell; 4] {
    piece.cells_at(Rotation::from_index(rotation), row, col)
}

/// Rotation states (using SRS naming convention)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North, // Spawn state
    East,  // Clockwise from North
    South, // 180 from North
    West,  // Counter-clockwise from North
}

impl Rotation {
    /// Normalize any integer (including negatives) into a rotation state
    pub fn from_index(index: i32) -> Rotation {
        match index.rem_euclid(4) {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// State index: 0 spawn, 1 CW, 2 180, 3 CCW
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotate clockwise: North → East → South → West → North
    pub fn cw(&self) -> Rotation {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise: North → West → South → East → North
    pub fn ccw(&self) -> Rotation {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    pub fn rotated(&self, direction: RotationDirection) -> Rotation {
        Rotation::from_index(self.index() as i32 + direction.delta())
    }
}

/// Direction for rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// +1 for clockwise, -1 for counter-clockwise
    pub fn delta(&self) -> i32 {
        match self {
            RotationDirection::Clockwise => 1,
            RotationDirection::CounterClockwise => -1,
        }
    }
}
