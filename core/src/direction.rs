use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::apply_delta;
use crate::*;

/// Minimum swipe length, in pixels, before a touch gesture counts as a move.
pub const SWIPE_THRESHOLD: i32 = 30;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// `(row, col)` offset of a single step.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Horizontal moves turn the player around, vertical moves keep the current facing.
    pub const fn facing(self) -> Option<Facing> {
        match self {
            Self::Left => Some(Facing::Left),
            Self::Right => Some(Facing::Right),
            Self::Up | Self::Down => None,
        }
    }

    /// Classifies a touch gesture. The dominant axis wins when it is longer than `threshold`;
    /// positive `dx` points right and positive `dy` points down.
    pub fn from_swipe(dx: i32, dy: i32, threshold: i32) -> Option<Self> {
        let (abs_x, abs_y) = (dx.unsigned_abs(), dy.unsigned_abs());
        let threshold = threshold.unsigned_abs();

        if abs_x > abs_y && abs_x > threshold {
            Some(if dx > 0 { Self::Right } else { Self::Left })
        } else if abs_y > abs_x && abs_y > threshold {
            Some(if dy > 0 { Self::Down } else { Self::Up })
        } else {
            None
        }
    }

    /// Step from `coords`, or `None` when that leaves a board of `bounds`.
    pub fn step(self, coords: Coord2, bounds: Coord2) -> Option<Coord2> {
        apply_delta(coords, self.delta(), bounds)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = GameError;

    /// Accepts direction words in any case and the browser's arrow key names.
    fn from_str(token: &str) -> Result<Self> {
        let token = token.trim();
        match token {
            "ArrowUp" => return Ok(Self::Up),
            "ArrowDown" => return Ok(Self::Down),
            "ArrowLeft" => return Ok(Self::Left),
            "ArrowRight" => return Ok(Self::Right),
            _ => {}
        }

        Self::ALL
            .into_iter()
            .find(|direction| direction.name().eq_ignore_ascii_case(token))
            .ok_or(GameError::InvalidDirection)
    }
}

/// Which way the player sprite looks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Default for Facing {
    fn default() -> Self {
        Self::Right
    }
}
