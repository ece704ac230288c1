//! Super Rotation System (SRS) wall kicks and T-spin detection
//!
//! SRS defines the wall kicks attempted when rotating a piece.
//! If a rotation would cause collision, these offsets are tried in order.

use crate::board::Board;
use crate::tetromino::{Rotation, RotationDirection, TetrominoType};

/// Five `(col_offset, row_offset)` kicks, row offset positive = up
type Kicks = [(i32, i32); 5];

/// Kick lists indexed by `from * 4 + to`. Same-state and 180° pairs have no entry.
type KickTable = [Option<Kicks>; 16];

/// Wall kicks for J, L, S, T, Z pieces
#[rustfmt::skip]
const JLSTZ_KICKS: KickTable = [
    // from North
    None,
    Some([(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)]), // 0→R
    None,
    Some([(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)]),    // 0→L
    // from East
    Some([(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)]),     // R→0
    None,
    Some([(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)]),     // R→2
    None,
    // from South
    None,
    Some([(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)]), // 2→R
    None,
    Some([(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)]),    // 2→L
    // from West
    Some([(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)]),  // L→0
    None,
    Some([(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)]),  // L→2
    None,
];

/// Wall kicks for the I piece (different from other pieces)
#[rustfmt::skip]
const I_KICKS: KickTable = [
    // from North
    None,
    Some([(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)]),   // 0→R
    None,
    Some([(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)]),   // 0→L
    // from East
    Some([(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)]),   // R→0
    None,
    Some([(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)]),   // R→2
    None,
    // from South
    None,
    Some([(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)]),   // 2→R
    None,
    Some([(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)]),   // 2→L
    // from West
    Some([(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)]),   // L→0
    None,
    Some([(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)]),   // L→2
    None,
];

/// T pivot inside its bounding box, shared by all four states
const T_CENTER: (i32, i32) = (1, 1);

/// Diagonal neighbours of the T pivot, as `(row, col)` deltas
const TOP_LEFT: (i32, i32) = (-1, -1);
const TOP_RIGHT: (i32, i32) = (-1, 1);
const BOTTOM_LEFT: (i32, i32) = (1, -1);
const BOTTOM_RIGHT: (i32, i32) = (1, 1);

/// Corners on the side the T points toward, indexed by rotation state
const T_FRONT_CORNERS: [[(i32, i32); 2]; 4] = [
    [TOP_LEFT, TOP_RIGHT],
    [TOP_RIGHT, BOTTOM_RIGHT],
    [BOTTOM_LEFT, BOTTOM_RIGHT],
    [TOP_LEFT, BOTTOM_LEFT],
];

/// Get the kick list for a rotation attempt, `None` for the O piece
pub fn get_wall_kicks(piece: TetrominoType, from: Rotation, to: Rotation) -> Option<&'static Kicks> {
    let table = match piece {
        TetrominoType::O => return None,
        TetrominoType::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    };
    table[from.index() * 4 + to.index()].as_ref()
}

/// A successful rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationResult {
    pub rotation: Rotation,
    /// Column shift applied to the origin
    pub kick_col: i32,
    /// Row shift applied to the origin, positive = down
    pub kick_row: i32,
    pub is_t_spin: bool,
    pub is_t_spin_mini: bool,
}

/// Try to rotate a piece at (row, col), using SRS wall kicks.
///
/// Returns `None` when no kick fits (the caller's piece is untouched) and always
/// for the O piece. T-spin flags are only ever set for the T piece.
pub fn try_rotate(
    board: &Board,
    piece: TetrominoType,
    rotation: Rotation,
    row: i32,
    col: i32,
    direction: RotationDirection,
) -> Option<RotationResult> {
    let to = rotation.rotated(direction);
    let kicks = get_wall_kicks(piece, rotation, to)?;

    let (kick_col, kick_row) = kicks.iter().map(|&(dc, dr)| (dc, -dr)).find(|&(dc, dr)| {
        board.is_valid_position(piece, to, row + dr, col + dc)
    })?;

    let (is_t_spin, is_t_spin_mini) = if piece == TetrominoType::T {
        classify_t_spin(board, to, row + kick_row, col + kick_col, kick_col, kick_row)
    } else {
        (false, false)
    };

    Some(RotationResult {
        rotation: to,
        kick_col,
        kick_row,
        is_t_spin,
        is_t_spin_mini,
    })
}

/// 3-corner rule around the T pivot. Returns `(is_t_spin, is_mini)`.
///
/// Kicks larger than one cell in either axis always count as a full T-spin.
/// This approximates the Guideline rule, which singles out the last SRS kick
/// test instead.
fn classify_t_spin(
    board: &Board,
    rotation: Rotation,
    row: i32,
    col: i32,
    kick_col: i32,
    kick_row: i32,
) -> (bool, bool) {
    let center = (row + T_CENTER.0, col + T_CENTER.1);
    let occupied = |(dr, dc): (i32, i32)| board.is_occupied(center.0 + dr, center.1 + dc);

    let corners = [TOP_LEFT, TOP_RIGHT, BOTTOM_LEFT, BOTTOM_RIGHT]
        .into_iter()
        .filter(|&corner| occupied(corner))
        .count();
    if corners < 3 {
        return (false, false);
    }

    let front = T_FRONT_CORNERS[rotation.index()];
    if front.iter().all(|&corner| occupied(corner)) {
        return (true, false);
    }

    if kick_col.abs() > 1 || kick_row.abs() > 1 {
        (true, false)
    } else {
        (true, true)
    }
}
