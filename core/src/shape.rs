use serde::{Deserialize, Serialize};

use crate::*;

pub const SHAPE_COUNT: usize = 25;

/// Rectangular 0/1 matrix, `1` marking an occupied cell relative to the shape's own origin.
#[derive(Debug, PartialEq, Eq)]
pub struct Shape {
    name: &'static str,
    rows: &'static [&'static [u8]],
}

impl Shape {
    const fn new(name: &'static str, rows: &'static [&'static [u8]]) -> Self {
        Self { name, rows }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn height(&self) -> Coord {
        self.rows.len() as Coord
    }

    pub fn width(&self) -> Coord {
        self.rows.first().map_or(0, |row| row.len()) as Coord
    }

    pub fn is_occupied(&self, (row, col): Coord2) -> bool {
        self.rows
            .get(usize::from(row))
            .and_then(|cells| cells.get(usize::from(col)))
            .is_some_and(|&cell| cell == 1)
    }

    /// Occupied offsets in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|&(_, &cell)| cell == 1)
                .map(move |(col, _)| (row as Coord, col as Coord))
        })
    }

    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }
}

pub static SHAPES: [Shape; SHAPE_COUNT] = [
    Shape::new("1x1", &[&[1]]),
    Shape::new("1x2", &[&[1, 1]]),
    Shape::new("2x1", &[&[1], &[1]]),
    Shape::new("1x3", &[&[1, 1, 1]]),
    Shape::new("3x1", &[&[1], &[1], &[1]]),
    Shape::new("1x4", &[&[1, 1, 1, 1]]),
    Shape::new("4x1", &[&[1], &[1], &[1], &[1]]),
    Shape::new("1x5", &[&[1, 1, 1, 1, 1]]),
    Shape::new("5x1", &[&[1], &[1], &[1], &[1], &[1]]),
    Shape::new("square 2x2", &[&[1, 1], &[1, 1]]),
    Shape::new("rect 2x3", &[&[1, 1, 1], &[1, 1, 1]]),
    Shape::new("rect 3x2", &[&[1, 1], &[1, 1], &[1, 1]]),
    Shape::new("square 3x3", &[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]]),
    Shape::new("small L", &[&[1, 1], &[1, 0]]),
    Shape::new("small L, mirrored", &[&[1, 1], &[0, 1]]),
    Shape::new("small L, flipped", &[&[1, 0], &[1, 1]]),
    Shape::new("small L, rotated", &[&[0, 1], &[1, 1]]),
    Shape::new("large L", &[&[1, 1, 1], &[1, 0, 0], &[1, 0, 0]]),
    Shape::new("large L, mirrored", &[&[1, 1, 1], &[0, 0, 1], &[0, 0, 1]]),
    Shape::new("large L, flipped", &[&[1, 0, 0], &[1, 0, 0], &[1, 1, 1]]),
    Shape::new("large L, rotated", &[&[0, 0, 1], &[0, 0, 1], &[1, 1, 1]]),
    Shape::new("T", &[&[1, 1, 1], &[0, 1, 0]]),
    Shape::new("T, inverted", &[&[0, 1, 0], &[1, 1, 1]]),
    Shape::new("T, left", &[&[1, 0], &[1, 1], &[1, 0]]),
    Shape::new("T, right", &[&[0, 1], &[1, 1], &[0, 1]]),
];

/// Index into [`SHAPES`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ShapeId(u8);

impl ShapeId {
    pub const SINGLE: Self = Self(0);
    pub const LINE2_H: Self = Self(1);
    pub const LINE2_V: Self = Self(2);
    pub const LINE3_H: Self = Self(3);
    pub const LINE3_V: Self = Self(4);
    pub const LINE4_H: Self = Self(5);
    pub const LINE4_V: Self = Self(6);
    pub const LINE5_H: Self = Self(7);
    pub const LINE5_V: Self = Self(8);
    pub const SQUARE2: Self = Self(9);
    pub const SQUARE3: Self = Self(12);
    pub const SMALL_L: Self = Self(13);
    pub const LARGE_L: Self = Self(17);
    pub const T: Self = Self(21);

    pub const fn new(index: u8) -> Result<Self> {
        if (index as usize) < SHAPE_COUNT {
            Ok(Self(index))
        } else {
            Err(GameError::InvalidShapeId)
        }
    }

    /// Callers guarantee `index < SHAPE_COUNT`.
    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index as u8)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub fn shape(self) -> &'static Shape {
        &SHAPES[self.index()]
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..SHAPE_COUNT).map(Self::from_index)
    }
}

impl TryFrom<u8> for ShapeId {
    type Error = GameError;

    fn try_from(index: u8) -> Result<Self> {
        Self::new(index)
    }
}

impl From<ShapeId> for u8 {
    fn from(id: ShapeId) -> Self {
        id.0
    }
}
