use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Owned copy of everything a renderer may show.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub grid: Grid,
    pub supply: BlockSupply,
    pub score: u32,
    pub high_score: u32,
    pub combo: u32,
    pub moves_since_last_clear: u32,
    pub moves: u32,
    pub lines_cleared: u32,
    pub state: EngineState,
}

impl GameSnapshot {
    pub fn from_engine<G: BlockGenerator, S: HighScoreStore>(engine: &GameEngine<G, S>) -> Self {
        Self {
            grid: engine.grid().clone(),
            supply: engine.supply().clone(),
            score: engine.score(),
            high_score: engine.high_score(),
            combo: engine.combo(),
            moves_since_last_clear: engine.moves_since_last_clear(),
            moves: engine.moves(),
            lines_cleared: engine.lines_cleared(),
            state: engine.state(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_over()
    }

    /// Overlay cells for a pending placement, `None` when the block in `slot` cannot go there.
    pub fn preview(&self, slot: usize, row: Offset, col: Offset) -> Option<Vec<Coord2>> {
        placement_preview(&self.grid, &self.supply, slot, (row, col))
    }
}

/// Cells the block in `slot` would cover at `anchor`. `None` for an empty slot or a block that
/// does not fit.
pub fn placement_preview(
    grid: &Grid,
    supply: &BlockSupply,
    slot: usize,
    anchor: Offset2,
) -> Option<Vec<Coord2>> {
    let block = supply.get(slot)?;
    grid.footprint(block.shape(), anchor)
}
