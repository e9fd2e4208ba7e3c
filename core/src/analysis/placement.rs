use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Every in-grid anchor where `shape` fits, in row-major order.
pub fn legal_placements<'a>(
    grid: &'a Grid,
    shape: &'a Shape,
) -> impl Iterator<Item = Coord2> + 'a {
    (0..GRID_SIZE)
        .flat_map(|row| (0..GRID_SIZE).map(move |col| (row, col)))
        .filter(move |&coords| grid.can_place(shape, to_anchor(coords)))
}

pub fn has_legal_placement(grid: &Grid, shape: &Shape) -> bool {
    legal_placements(grid, shape).next().is_some()
}

/// Board after a hypothetical placement, with the lines it cleared.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    pub grid: Grid,
    pub cleared_rows: Vec<Coord>,
    pub cleared_cols: Vec<Coord>,
}

impl Simulation {
    pub fn lines_cleared(&self) -> u32 {
        (self.cleared_rows.len() + self.cleared_cols.len()) as u32
    }
}

/// Plays `block` at `anchor` on a copy of `grid`. `None` when it does not fit.
pub fn simulate(grid: &Grid, block: &Block, anchor: Coord2) -> Option<Simulation> {
    let anchor = to_anchor(anchor);
    if !grid.can_place(block.shape(), anchor) {
        return None;
    }

    let mut grid = grid.clone();
    grid.stamp(block.shape(), anchor, block.color());
    let cleared_rows = grid.full_rows();
    let cleared_cols = grid.full_cols();
    grid.clear_lines(&cleared_rows, &cleared_cols);

    Some(Simulation {
        grid,
        cleared_rows,
        cleared_cols,
    })
}
