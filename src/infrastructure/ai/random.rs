use crate::domain::board::Board;
use crate::domain::models::Direction;
use crate::domain::services::PlayerStrategy;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Plays a uniformly random legal direction.
pub struct RandomBot {
    rng: StdRng,
}

impl RandomBot {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomBot {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerStrategy for RandomBot {
    fn get_move(&mut self, board: &Board) -> Option<Direction> {
        board.legal_directions().choose(&mut self.rng).copied()
    }
}
