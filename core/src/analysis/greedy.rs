use serde::{Deserialize, Serialize};

use crate::*;

/// A placement the engine would accept: the block in `slot` anchored at `(row, col)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub slot: usize,
    pub row: Coord,
    pub col: Coord,
}

impl Move {
    pub const fn anchor(&self) -> Offset2 {
        to_anchor((self.row, self.col))
    }
}

const NEIGHBORS: [(Offset, Offset); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Picks the placement that clears the most lines, then the one that touches the most filled cells
/// and walls. Ties keep the first candidate in slot then row-major order.
pub fn suggest_move(grid: &Grid, supply: &BlockSupply) -> Option<Move> {
    let mut best: Option<(Move, (u32, u32))> = None;

    for (slot, block) in supply.iter() {
        for (row, col) in legal_placements(grid, block.shape()) {
            let Some(simulation) = simulate(grid, block, (row, col)) else {
                continue;
            };
            let rank = (simulation.lines_cleared(), contact(grid, block.shape(), (row, col)));
            if best.is_none_or(|(_, best_rank)| rank > best_rank) {
                best = Some((Move { slot, row, col }, rank));
            }
        }
    }

    best.map(|(mv, _)| mv)
}

/// Edges of the placed shape that touch a wall or an already filled cell.
fn contact(grid: &Grid, shape: &Shape, anchor: Coord2) -> u32 {
    let anchor = to_anchor(anchor);
    let mut touching = 0;
    for offset in shape.cells() {
        let Some((row, col)) = apply_offset(anchor, offset, GRID_SIZE) else {
            continue;
        };
        for (dr, dc) in NEIGHBORS {
            let neighbor = (Offset::from(row) + dr, Offset::from(col) + dc);
            match apply_offset(neighbor, (0, 0), GRID_SIZE) {
                None => touching += 1,
                Some(coords) if grid.cell_at(coords).is_filled() => touching += 1,
                Some(_) => {}
            }
        }
    }
    touching
}
