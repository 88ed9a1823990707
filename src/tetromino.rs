//! Tetromino definitions and shapes
//!
//! The 7 piece variants with their four hand-authored rotation states. The tables are
//! data rather than the output of a matrix rotation: the O piece never moves, and the
//! I piece swaps between rows and columns of its 4x4 box.

use crate::rules::RulesError;
use serde::Serialize;

/// Largest bounding box of any variant (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// The 7 piece variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Variant {
    I, // Cyan - long bar
    O, // Yellow - square
    T, // Purple - T-shape
    S, // Green - S-shape
    Z, // Red - Z-shape
    J, // Blue - J-shape
    L, // Orange - L-shape
}

impl Variant {
    pub const ALL: [Variant; 7] = [
        Variant::I,
        Variant::O,
        Variant::T,
        Variant::S,
        Variant::Z,
        Variant::J,
        Variant::L,
    ];

    /// Display color for this variant
    pub fn color(&self) -> Color {
        color_of(*self)
    }

    /// Shape for this variant at a given rotation
    pub fn shape(&self, rotation: Rotation) -> Shape {
        SHAPES[self.index()][rotation.index()]
    }

    fn index(&self) -> usize {
        match self {
            Variant::I => 0,
            Variant::O => 1,
            Variant::T => 2,
            Variant::S => 3,
            Variant::Z => 4,
            Variant::J => 5,
            Variant::L => 6,
        }
    }
}

/// Rotation states, `North` being the spawn state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Rotate clockwise: North → East → South → West → North
    pub fn cw(&self) -> Rotation {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotation state as an index in `0..4`
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }
}

/// An RGB display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Occupancy grid of one rotation state, anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from rows of `#` (occupied) and `.` (empty).
    /// Evaluated at compile time, so a ragged table fails the build.
    const fn from_rows(rows: &[&str]) -> Shape {
        let height = rows.len();
        assert!(height > 0 && height <= MAX_SHAPE_SIZE, "shape height out of range");
        let width = rows[0].len();
        assert!(width > 0 && width <= MAX_SHAPE_SIZE, "shape width out of range");

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < height {
            let row = rows[y].as_bytes();
            assert!(row.len() == width, "ragged shape row");
            let mut x = 0;
            while x < width {
                cells[y][x] = match row[x] {
                    b'#' => true,
                    b'.' => false,
                    _ => panic!("shape rows may only contain '#' and '.'"),
                };
                x += 1;
            }
            y += 1;
        }

        Shape {
            width: width as u8,
            height: height as u8,
            cells,
        }
    }

    /// Bounding box width
    pub fn width(&self) -> usize {
        self.width as usize
    }

    /// Bounding box height
    pub fn height(&self) -> usize {
        self.height as usize
    }

    /// Whether the cell at local (x, y) is occupied
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height() && self.cells[y][x]
    }

    /// Local (x, y) offsets of every occupied cell, row by row
    pub fn cells(self) -> impl Iterator<Item = (i32, i32)> {
        (0..self.height()).flat_map(move |y| {
            (0..self.width())
                .filter(move |&x| self.cells[y][x])
                .map(move |x| (x as i32, y as i32))
        })
    }

    /// Number of occupied cells
    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }
}

static SHAPES: [[Shape; 4]; 7] = [
    // I
    [
        Shape::from_rows(&["....", "####", "....", "...."]),
        Shape::from_rows(&["..#.", "..#.", "..#.", "..#."]),
        Shape::from_rows(&["....", "....", "####", "...."]),
        Shape::from_rows(&[".#..", ".#..", ".#..", ".#.."]),
    ],
    // O
    [
        Shape::from_rows(&["##", "##"]),
        Shape::from_rows(&["##", "##"]),
        Shape::from_rows(&["##", "##"]),
        Shape::from_rows(&["##", "##"]),
    ],
    // T
    [
        Shape::from_rows(&[".#.", "###", "..."]),
        Shape::from_rows(&[".#.", ".##", ".#."]),
        Shape::from_rows(&["...", "###", ".#."]),
        Shape::from_rows(&[".#.", "##.", ".#."]),
    ],
    // S
    [
        Shape::from_rows(&[".##", "##.", "..."]),
        Shape::from_rows(&[".#.", ".##", "..#"]),
        Shape::from_rows(&["...", ".##", "##."]),
        Shape::from_rows(&["#..", "##.", ".#."]),
    ],
    // Z
    [
        Shape::from_rows(&["##.", ".##", "..."]),
        Shape::from_rows(&["..#", ".##", ".#."]),
        Shape::from_rows(&["...", "##.", ".##"]),
        Shape::from_rows(&[".#.", "##.", "#.."]),
    ],
    // J
    [
        Shape::from_rows(&["#..", "###", "..."]),
        Shape::from_rows(&[".##", ".#.", ".#."]),
        Shape::from_rows(&["...", "###", "..#"]),
        Shape::from_rows(&[".#.", ".#.", "##."]),
    ],
    // L
    [
        Shape::from_rows(&["..#", "###", "..."]),
        Shape::from_rows(&[".#.", ".#.", ".##"]),
        Shape::from_rows(&["...", "###", "#.."]),
        Shape::from_rows(&["##.", ".#.", ".#."]),
    ],
];

/// All four rotation states of a variant, North first
pub fn shapes_of(variant: Variant) -> [Shape; 4] {
    SHAPES[variant.index()]
}

/// Display color of a variant
pub fn color_of(variant: Variant) -> Color {
    match variant {
        Variant::I => Color::rgb(0x00, 0xf0, 0xf0),
        Variant::O => Color::rgb(0xf0, 0xf0, 0x00),
        Variant::T => Color::rgb(0xa0, 0x00, 0xf0),
        Variant::S => Color::rgb(0x00, 0xf0, 0x00),
        Variant::Z => Color::rgb(0xf0, 0x00, 0x00),
        Variant::J => Color::rgb(0x00, 0x00, 0xf0),
        Variant::L => Color::rgb(0xf0, 0xa0, 0x00),
    }
}

/// Check that every variant keeps one bounding box and one cell count across its rotations
pub fn verify_catalog() -> Result<(), RulesError> {
    for variant in Variant::ALL {
        let shapes = shapes_of(variant);
        let first = shapes[0];
        if first.cell_count() == 0 {
            return Err(RulesError::MalformedShape {
                variant,
                rotation: 0,
            });
        }
        for (rotation, shape) in shapes.iter().enumerate().skip(1) {
            if shape.width() != first.width()
                || shape.height() != first.height()
                || shape.cell_count() != first.cell_count()
            {
                return Err(RulesError::MalformedShape { variant, rotation });
            }
        }
    }
    Ok(())
}
