//! Wall kicks for rotation
//!
//! One small offset list shared by every variant and every rotation state. When the
//! rotated piece does not fit in place, these anchor offsets are tried in order.

use crate::board::Board;
use crate::collision::is_valid;
use crate::piece::Piece;

/// Anchor offsets (dx, dy) tried after a rotation, in order
pub const WALL_KICKS: [(i32, i32); 6] = [(0, 0), (-1, 0), (1, 0), (0, -1), (-2, 0), (2, 0)];

/// Rotate clockwise, kicking off walls and stacks if needed.
/// Returns None when every offset collides.
pub fn rotate(board: &Board, piece: &Piece) -> Option<Piece> {
    let rotated = piece.rotated();
    WALL_KICKS
        .iter()
        .map(|&(dx, dy)| rotated.translated(dx, dy))
        .find(|candidate| is_valid(board, candidate))
}
