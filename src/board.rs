//! Game board representation

use crate::tetromino::Variant;
use serde::Serialize;

/// A cell on the board - either empty or occupied by a locked variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Variant),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, Cell::Occupied(_))
    }
}

/// The game board
///
/// Stored as rows, row 0 at the top. Dimensions are fixed at construction; every
/// operation that changes rows keeps `height` rows of `width` cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    width: usize,
    rows: Vec<Vec<Cell>>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            rows: vec![vec![Cell::Empty; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Get the cell at (x, y), or None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.rows
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }

    /// Set the cell at (x, y). Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        match self
            .rows
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Whether (x, y) is inside the board and occupied
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|cell| cell.is_occupied())
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Check if a row is completely occupied
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(Cell::is_occupied))
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.iter().all(Cell::is_empty))
    }

    /// Drop every row rejected by `keep`, shifting the survivors down in their
    /// original order and refilling the top with empty rows.
    /// Returns the compacted board and how many rows were removed.
    pub fn compact<F>(&self, mut keep: F) -> (Board, usize)
    where
        F: FnMut(&[Cell]) -> bool,
    {
        let kept: Vec<Vec<Cell>> = self
            .rows
            .iter()
            .filter(|row| keep(row.as_slice()))
            .cloned()
            .collect();
        let removed = self.rows.len() - kept.len();

        let mut rows = Vec::with_capacity(self.rows.len());
        rows.extend((0..removed).map(|_| vec![Cell::Empty; self.width]));
        rows.extend(kept);

        (
            Board {
                width: self.width,
                rows,
            },
            removed,
        )
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(10, 20)
    }
}
