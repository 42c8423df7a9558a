use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Places every mine on a uniformly random cell, retrying whenever the cell already holds one.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineLayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        let (rows, cols) = config.size();
        let mut mine_mask: Array2<bool> = Array2::default(config.size().grid_index());
        let mut mines = Vec::with_capacity(config.mines().into());
        let mut draws: u64 = 0;

        // terminates because `GameConfig` keeps at least one cell free
        let mut rng = SmallRng::seed_from_u64(self.seed);
        while mines.len() < usize::from(config.mines()) {
            let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
            draws += 1;

            if !mine_mask[coords.grid_index()] {
                mine_mask[coords.grid_index()] = true;
                mines.push(coords);
            }
        }

        log::debug!(
            "Placed {} mines on {}x{} with seed {} after {} draws",
            mines.len(),
            rows,
            cols,
            self.seed,
            draws
        );
        MineLayout::from_parts(config, mine_mask, mines)
    }
}
