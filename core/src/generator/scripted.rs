use alloc::vec::Vec;

use super::*;

/// Replays a fixed cycle of shape/color pairs. Used for reproducible puzzles and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedBlockGenerator {
    script: Vec<(ShapeId, Color)>,
    cursor: usize,
    next_id: u32,
}

impl ScriptedBlockGenerator {
    pub fn new(script: impl IntoIterator<Item = (ShapeId, Color)>) -> Self {
        let mut script: Vec<_> = script.into_iter().collect();
        if script.is_empty() {
            log::warn!("Empty block script, falling back to single cells");
            script.push((ShapeId::SINGLE, Color::Orange));
        }
        Self {
            script,
            cursor: 0,
            next_id: 0,
        }
    }

    pub fn repeat(shape: ShapeId, color: Color) -> Self {
        Self::new([(shape, color)])
    }
}

impl BlockGenerator for ScriptedBlockGenerator {
    fn next_block(&mut self) -> Block {
        let (shape, color) = self.script[self.cursor];
        self.cursor = (self.cursor + 1) % self.script.len();
        let id = BlockId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        Block::new(id, shape, color)
    }
}
