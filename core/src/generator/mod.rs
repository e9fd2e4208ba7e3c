use crate::*;
pub use random::*;
pub use scripted::*;

mod random;
mod scripted;

/// Source of new blocks for the supply. Each call yields a block with a fresh id.
pub trait BlockGenerator {
    fn next_block(&mut self) -> Block;
}

impl<G: BlockGenerator + ?Sized> BlockGenerator for &mut G {
    fn next_block(&mut self) -> Block {
        (**self).next_block()
    }
}
