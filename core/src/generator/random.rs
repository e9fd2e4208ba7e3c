use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Draws a shape uniformly from the catalog and a color uniformly from the palette, independently
/// for every block and with replacement.
#[derive(Clone, Debug)]
pub struct RandomBlockGenerator {
    rng: SmallRng,
    next_id: u32,
}

impl RandomBlockGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            next_id: 0,
        }
    }
}

impl BlockGenerator for RandomBlockGenerator {
    fn next_block(&mut self) -> Block {
        let shape = ShapeId::from_index(self.rng.random_range(0..SHAPE_COUNT));
        let color = Color::ALL[self.rng.random_range(0..Color::ALL.len())];
        let id = BlockId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        Block::new(id, shape, color)
    }
}
