use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Side length of the square board.
pub const GRID_SIZE: Coord = 8;

const GRID_DIM: [usize; 2] = [GRID_SIZE as usize, GRID_SIZE as usize];

/// The `GRID_SIZE`×`GRID_SIZE` board, indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Array2<Cell>", into = "Array2<Cell>")]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: Array2::default(GRID_DIM),
        }
    }

    pub fn from_cells(cells: Array2<Cell>) -> Result<Self> {
        if cells.dim() != (GRID_DIM[0], GRID_DIM[1]) {
            return Err(GameError::InvalidGridShape);
        }
        Ok(Self { cells })
    }

    /// Parses one string per row: `.` for an empty cell, a palette symbol for a filled one.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        if rows.len() != GRID_DIM[0] {
            return Err(GameError::InvalidGridShape);
        }

        let mut grid = Self::new();
        for (row, text) in rows.iter().enumerate() {
            if text.chars().count() != GRID_DIM[1] {
                return Err(GameError::InvalidGridShape);
            }
            for (col, symbol) in text.chars().enumerate() {
                grid.cells[[row, col]] = match symbol {
                    '.' => Cell::Empty,
                    other => Color::from_symbol(other)
                        .map(Cell::Filled)
                        .ok_or(GameError::InvalidGridShape)?,
                };
            }
        }
        Ok(grid)
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    /// Whether every occupied cell of `shape` lands inside the grid on an empty cell.
    pub fn can_place(&self, shape: &Shape, anchor: Offset2) -> bool {
        shape.cells().all(|offset| {
            apply_offset(anchor, offset, GRID_SIZE)
                .is_some_and(|coords| self.cell_at(coords).is_empty())
        })
    }

    /// Cells `shape` would occupy at `anchor`, or `None` if it does not fit.
    pub fn footprint(&self, shape: &Shape, anchor: Offset2) -> Option<Vec<Coord2>> {
        shape
            .cells()
            .map(|offset| {
                apply_offset(anchor, offset, GRID_SIZE)
                    .filter(|&coords| self.cell_at(coords).is_empty())
            })
            .collect()
    }

    /// Writes `color` into every cell `shape` covers at `anchor`.
    /// Callers check [`Grid::can_place`] first.
    pub(crate) fn stamp(&mut self, shape: &Shape, anchor: Offset2, color: Color) {
        for coords in shape.cells().filter_map(|offset| apply_offset(anchor, offset, GRID_SIZE)) {
            self.cells[coords.to_nd_index()] = Cell::Filled(color);
        }
    }

    pub fn full_rows(&self) -> Vec<Coord> {
        (0..GRID_SIZE)
            .filter(|&row| self.cells.row(row.into()).iter().all(|cell| cell.is_filled()))
            .collect()
    }

    pub fn full_cols(&self) -> Vec<Coord> {
        (0..GRID_SIZE)
            .filter(|&col| self.cells.column(col.into()).iter().all(|cell| cell.is_filled()))
            .collect()
    }

    /// Empties the given rows and columns. A cell on both a cleared row and a cleared column is
    /// simply emptied twice.
    pub(crate) fn clear_lines(&mut self, rows: &[Coord], cols: &[Coord]) {
        for &row in rows {
            self.cells.row_mut(row.into()).fill(Cell::Empty);
        }
        for &col in cols {
            self.cells.column_mut(col.into()).fill(Cell::Empty);
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Array2<Cell>> for Grid {
    type Error = GameError;

    fn try_from(cells: Array2<Cell>) -> Result<Self> {
        Self::from_cells(cells)
    }
}

impl From<Grid> for Array2<Cell> {
    fn from(grid: Grid) -> Self {
        grid.cells
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Placement predicate for a shape anchored at `(row, col)`. Never mutates the grid.
pub fn can_place(grid: &Grid, shape: &Shape, row: Offset, col: Offset) -> bool {
    grid.can_place(shape, (row, col))
}
