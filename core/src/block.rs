use serde::{Deserialize, Serialize};

use crate::*;

/// Number of slots in the block supply.
pub const SLOT_COUNT: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    id: BlockId,
    shape: ShapeId,
    color: Color,
}

impl Block {
    pub const fn new(id: BlockId, shape: ShapeId, color: Color) -> Self {
        Self { id, shape, color }
    }

    pub const fn id(&self) -> BlockId {
        self.id
    }

    pub const fn shape_id(&self) -> ShapeId {
        self.shape
    }

    pub fn shape(&self) -> &'static Shape {
        self.shape.shape()
    }

    pub const fn color(&self) -> Color {
        self.color
    }
}

/// The blocks currently offered to the player. A slot is emptied when its block is placed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockSupply {
    slots: [Option<Block>; SLOT_COUNT],
}

impl BlockSupply {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn draw<G: BlockGenerator + ?Sized>(generator: &mut G) -> Self {
        let mut supply = Self::empty();
        supply.refill(generator);
        supply
    }

    /// Replaces every slot with a freshly drawn block.
    pub fn refill<G: BlockGenerator + ?Sized>(&mut self, generator: &mut G) {
        for slot in &mut self.slots {
            *slot = Some(generator.next_block());
        }
    }

    /// Block in `slot`, `None` for an empty or out-of-range slot.
    pub fn get(&self, slot: usize) -> Option<&Block> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub(crate) fn take(&mut self, slot: usize) -> Option<Block> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    pub fn slots(&self) -> &[Option<Block>; SLOT_COUNT] {
        &self.slots
    }

    /// Occupied slots with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Block)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, block)| block.as_ref().map(|block| (slot, block)))
    }

    /// Number of occupied slots.
    pub fn block_count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_exhausted(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

impl From<[Option<Block>; SLOT_COUNT]> for BlockSupply {
    fn from(slots: [Option<Block>; SLOT_COUNT]) -> Self {
        Self { slots }
    }
}
