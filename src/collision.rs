//! Collision detection and placement
//!
//! Every function here is pure: boards and pieces go in, a verdict or a new board
//! comes out.

use crate::board::{Board, Cell};
use crate::piece::Piece;

/// Check whether a piece fits the board.
///
/// Cells above the top edge (negative `y`) are allowed and never tested for
/// occupancy; anything left, right or below the board is rejected.
pub fn is_valid(board: &Board, piece: &Piece) -> bool {
    let width = board.width() as i32;
    let height = board.height() as i32;

    piece.cells().all(|(x, y)| {
        if x < 0 || x >= width || y >= height {
            return false;
        }
        y < 0 || !board.is_occupied(x, y)
    })
}

/// How many rows the piece can fall before it would collide
pub fn drop_distance(board: &Board, piece: &Piece) -> u32 {
    let mut distance = 0;
    while is_valid(board, &piece.translated(0, distance as i32 + 1)) {
        distance += 1;
    }
    distance
}

/// The piece at its landing position (ghost piece)
pub fn ghost(board: &Board, piece: &Piece) -> Piece {
    piece.translated(0, drop_distance(board, piece) as i32)
}

/// Merge a piece into the board as locked cells.
/// Cells outside the board are dropped.
pub fn lock(board: &Board, piece: &Piece) -> Board {
    let mut locked = board.clone();
    for (x, y) in piece.cells() {
        locked.set(x, y, Cell::Occupied(piece.variant));
    }
    locked
}
