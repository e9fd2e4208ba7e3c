//! Rules engine for an 8×8 block-placement puzzle.
//!
//! The player is offered three blocks at a time and drops them anywhere they fit. Every full row
//! and every full column is cleared and scored, the supply is refilled once all three blocks are
//! used, and the game ends when none of the offered blocks fits anywhere.
//!
//! ```
//! use block_blaster_core::*;
//!
//! let mut engine = GameEngine::new(RandomBlockGenerator::new(7), MemoryStore::new());
//! engine.start().unwrap();
//!
//! if let Some(mv) = suggest_move(engine.grid(), engine.supply()) {
//!     let (row, col) = mv.anchor();
//!     let outcome = engine.try_place(mv.slot, row, col).unwrap();
//!     assert_eq!(outcome.points, engine.score());
//! }
//! ```

#![no_std]

extern crate alloc;

pub use analysis::*;
pub use block::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use scoring::*;
pub use shape::*;
pub use snapshot::*;
pub use store::*;
pub use types::*;

mod analysis;
mod block;
mod cell;
mod engine;
mod error;
mod generator;
mod grid;
mod scoring;
mod shape;
mod snapshot;
mod store;
mod types;
