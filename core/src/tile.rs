use serde::{Deserialize, Serialize};

/// Marker stored in each board cell. The player is tracked separately and never
/// overwrites a marker.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Start,
    End,
    Obstacle,
}

impl Cell {
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Obstacle)
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}
