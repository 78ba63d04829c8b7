#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use direction::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use reachability::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod direction;
mod engine;
mod error;
mod generator;
mod reachability;
mod session;
mod tile;
mod types;

/// Side length of the board used by the minigame.
pub const DEFAULT_SIZE: Coord = 7;

/// Percentage of all cells turned into obstacles by [`GameConfig::standard`].
pub const OBSTACLE_PERCENT: CellCount = 35;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub obstacles: CellCount,
    pub min_distance: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, obstacles: CellCount, min_distance: CellCount) -> Self {
        Self {
            size,
            obstacles,
            min_distance,
        }
    }

    pub fn new(size: Coord, obstacles: CellCount, min_distance: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, obstacles, min_distance);
        config.validate()?;
        Ok(config)
    }

    /// `floor(N² × 0.35)` obstacles and a start-end distance of at least `floor(N / 0.7)`.
    pub fn standard(size: Coord) -> Result<Self> {
        Self::new(
            size,
            Self::standard_obstacles(size),
            Self::standard_min_distance(size),
        )
    }

    pub const fn standard_obstacles(size: Coord) -> CellCount {
        let cells = mult(size, size) as u32;
        (cells * OBSTACLE_PERCENT as u32 / 100) as CellCount
    }

    pub const fn standard_min_distance(size: Coord) -> CellCount {
        size as CellCount * 10 / 7
    }

    pub fn validate(&self) -> Result<()> {
        if self.size < 2 {
            return Err(GameError::InvalidSize);
        }
        // start and end always need a cell each
        if self.obstacles > self.total_cells() - 2 {
            return Err(GameError::TooManyObstacles);
        }
        if self.min_distance > self.max_distance() {
            return Err(GameError::DistanceTooLarge);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    /// Distance between opposite corners, the farthest two cells can be apart.
    pub const fn max_distance(&self) -> CellCount {
        2 * (self.size as CellCount).saturating_sub(1)
    }

    pub const fn bounds(&self) -> Coord2 {
        (self.size, self.size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(
            DEFAULT_SIZE,
            Self::standard_obstacles(DEFAULT_SIZE),
            Self::standard_min_distance(DEFAULT_SIZE),
        )
    }
}

/// A generated maze: markers for start, end, and obstacles on a square grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    cells: Array2<Cell>,
    start: Coord2,
    end: Coord2,
    obstacle_count: CellCount,
}

/// Wire form of [`Board`], checked by [`Board::from_cells`] before use.
#[derive(Deserialize)]
struct BoardRepr {
    cells: Array2<Cell>,
    start: Coord2,
    end: Coord2,
    obstacle_count: CellCount,
}

impl TryFrom<BoardRepr> for Board {
    type Error = GameError;

    fn try_from(repr: BoardRepr) -> Result<Self> {
        let board = Self::from_cells(repr.cells, repr.start, repr.end)?;
        if board.obstacle_count != repr.obstacle_count {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(board)
    }
}

impl Board {
    pub(crate) fn new_unchecked(
        cells: Array2<Cell>,
        start: Coord2,
        end: Coord2,
        obstacle_count: CellCount,
    ) -> Self {
        Self {
            cells,
            start,
            end,
            obstacle_count,
        }
    }

    /// Builds a board from explicit positions. Repeated obstacles are placed once.
    pub fn from_coords(
        size: Coord,
        start: Coord2,
        end: Coord2,
        obstacles: &[Coord2],
    ) -> Result<Self> {
        if size < 2 {
            return Err(GameError::InvalidSize);
        }

        let bounds = (size, size);
        let in_bounds = |(row, col): Coord2| row < bounds.0 && col < bounds.1;
        if !in_bounds(start) || !in_bounds(end) || start == end {
            return Err(GameError::InvalidCoords);
        }

        let mut cells: Array2<Cell> = Array2::default(bounds.to_nd_index());
        cells[start.to_nd_index()] = Cell::Start;
        cells[end.to_nd_index()] = Cell::End;

        let mut obstacle_count = 0;
        for &coords in obstacles {
            if !in_bounds(coords) || coords == start || coords == end {
                return Err(GameError::InvalidCoords);
            }
            let cell = &mut cells[coords.to_nd_index()];
            if cell.is_empty() {
                *cell = Cell::Obstacle;
                obstacle_count += 1;
            }
        }

        Ok(Self::new_unchecked(cells, start, end, obstacle_count))
    }

    /// Checks a filled grid: square, at least 2x2, exactly one `Start` at `start` and one `End`
    /// at `end`.
    pub fn from_cells(cells: Array2<Cell>, start: Coord2, end: Coord2) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if rows != cols || rows < 2 || rows > usize::from(Coord::MAX) {
            return Err(GameError::InvalidBoardShape);
        }

        let board = Self::new_unchecked(cells, start, end, 0);
        if !board.contains(start) || !board.contains(end) || start == end {
            return Err(GameError::InvalidCoords);
        }
        if board[start] != Cell::Start
            || board[end] != Cell::End
            || board.count(Cell::Start) != 1
            || board.count(Cell::End) != 1
        {
            return Err(GameError::InvalidBoardShape);
        }

        let obstacle_count = board.count(Cell::Obstacle);
        Ok(Self {
            obstacle_count,
            ..board
        })
    }

    pub fn size(&self) -> Coord {
        self.cells.nrows().try_into().unwrap_or(Coord::MAX)
    }

    pub fn bounds(&self) -> Coord2 {
        let size = self.size();
        (size, size)
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    pub fn start(&self) -> Coord2 {
        self.start
    }

    pub fn end(&self) -> Coord2 {
        self.end
    }

    pub fn obstacle_count(&self) -> CellCount {
        self.obstacle_count
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        let size = self.size();
        row < size && col < size
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self[coords]
    }

    pub fn is_obstacle(&self, coords: Coord2) -> bool {
        matches!(self[coords], Cell::Obstacle)
    }

    /// Whether start and end are connected through walkable cells.
    pub fn has_path(&self) -> bool {
        is_reachable(&self.cells, self.start, self.end)
    }

    pub fn count(&self, marker: Cell) -> CellCount {
        self.cells
            .iter()
            .filter(|&&cell| cell == marker)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The step would leave the board, nothing changed.
    Blocked,
    Moved,
    HitObstacle,
    Won,
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        use MoveOutcome::*;
        match self {
            Blocked => false,
            Moved => true,
            HitObstacle => true,
            Won => true,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::HitObstacle | Self::Won)
    }
}
