use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::*;

/// Uniformly random placement outside the 3×3 opening around the first click.
///
/// Uses a partial Fisher-Yates shuffle over the candidate cells, so it picks exactly the
/// requested number of distinct cells in one pass and always terminates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, difficulty: Difficulty, safe: Coord2) -> MineLayout {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;
        use rand::seq::SliceRandom;

        let (rows, cols) = difficulty.size();
        let mut candidates: Vec<Coord2> = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .filter(|&pos| !within_one(safe, pos))
            .collect();

        let wanted = usize::from(difficulty.mine_count());
        if wanted > candidates.len() {
            log::warn!(
                "Not enough room outside the opening, requested {} mines but only {} fit",
                wanted,
                candidates.len()
            );
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let (mines, _) = candidates.partial_shuffle(&mut rng, wanted);

        let mut mine_mask: Array2<bool> = Array2::default(difficulty.size().to_nd_index());
        for &pos in mines.iter() {
            mine_mask[pos.to_nd_index()] = true;
        }

        let layout = MineLayout::from_mine_mask(mine_mask);
        log::debug!(
            "Placed {} mines with seed {} around opening {:?}",
            layout.mine_count(),
            self.seed,
            safe
        );
        layout
    }
}
