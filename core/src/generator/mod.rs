use crate::*;
pub use random::*;

mod random;

/// Decides where the mines go once the first cell to open is known.
pub trait MineGenerator {
    /// Produces a layout for `difficulty` in which `safe` and its neighbors hold no mine.
    fn generate(self, difficulty: Difficulty, safe: Coord2) -> MineLayout;
}
