//! The active falling piece
//!
//! A `Piece` is a value: moving or rotating it yields a new piece and leaves the
//! original untouched. Whether the result fits the board is the collision module's call.

use crate::tetromino::{Rotation, Shape, Variant};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub variant: Variant,
    pub rotation: Rotation,
    /// Column of the shape's bounding-box left edge
    pub x: i32,
    /// Row of the shape's bounding-box top edge, negative while above the board
    pub y: i32,
}

impl Piece {
    pub fn new(variant: Variant, rotation: Rotation, x: i32, y: i32) -> Self {
        Self {
            variant,
            rotation,
            x,
            y,
        }
    }

    /// Spawn state: North rotation, horizontally centered, top edge on row 0
    pub fn spawn(variant: Variant, board_width: usize) -> Self {
        let shape = variant.shape(Rotation::North);
        let x = (board_width.saturating_sub(shape.width()) / 2) as i32;
        Self::new(variant, Rotation::North, x, 0)
    }

    /// Current rotation's occupancy grid
    pub fn shape(&self) -> Shape {
        self.variant.shape(self.rotation)
    }

    /// Absolute board positions (x, y) of every occupied cell
    pub fn cells(self) -> impl Iterator<Item = (i32, i32)> {
        let (x, y) = (self.x, self.y);
        self.shape()
            .cells()
            .map(move |(dx, dy)| (x + dx, y + dy))
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Piece {
        Piece {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Next rotation state clockwise, same anchor
    pub fn rotated(&self) -> Piece {
        Piece {
            rotation: self.rotation.cw(),
            ..*self
        }
    }
}
