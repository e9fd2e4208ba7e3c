pub use greedy::*;
pub use placement::*;

mod greedy;
mod placement;
