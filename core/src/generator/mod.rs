use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board>;
}

/// Caps on the rejection loops used while building a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationLimits {
    /// Whole boards drawn before giving up on finding one with a path.
    pub max_boards: u32,
    /// Draws allowed for a single pick of start/end or of one obstacle.
    pub max_samples: u32,
}

impl GenerationLimits {
    pub const fn new(max_boards: u32, max_samples: u32) -> Self {
        Self {
            max_boards,
            max_samples,
        }
    }
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self::new(10_000, 10_000)
    }
}
