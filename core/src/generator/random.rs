use ndarray::Array2;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Purely random strategy: start and end far enough apart, obstacles anywhere else, and the whole
/// board redrawn until start and end are connected.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
    limits: GenerationLimits,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self::with_limits(seed, GenerationLimits::default())
    }

    pub fn with_limits(seed: u64, limits: GenerationLimits) -> Self {
        Self { seed, limits }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        generate_board(config, self.limits, &mut rng)
    }
}

/// Draws boards from `rng` until one has a path from start to end.
///
/// Every rejection loop is capped by `limits`. Running out of attempts yields
/// [`GameError::GenerationUnsatisfiable`] instead of spinning forever on a configuration that
/// cannot (or is very unlikely to) produce a connected board.
pub fn generate_board<R: Rng>(
    config: GameConfig,
    limits: GenerationLimits,
    rng: &mut R,
) -> Result<Board> {
    config.validate()?;

    for attempt in 1..=limits.max_boards {
        let board = draw_board(&config, limits, rng)?;
        if board.has_path() {
            log::debug!(
                "Generated {0}x{0} board after {1} attempt(s), start {2:?}, end {3:?}",
                config.size,
                attempt,
                board.start(),
                board.end()
            );
            return Ok(board);
        }
        log::trace!(
            "Board attempt {} has no path from {:?} to {:?}, redrawing",
            attempt,
            board.start(),
            board.end()
        );
    }

    log::warn!(
        "Gave up after {} boards without a path, size {}, obstacles {}",
        limits.max_boards,
        config.size,
        config.obstacles
    );
    Err(GameError::GenerationUnsatisfiable)
}

fn draw_board<R: Rng>(config: &GameConfig, limits: GenerationLimits, rng: &mut R) -> Result<Board> {
    let mut cells: Array2<Cell> = Array2::default(config.bounds().to_nd_index());

    let (start, end) = sample_endpoints(config, limits, rng)?;
    cells[start.to_nd_index()] = Cell::Start;
    cells[end.to_nd_index()] = Cell::End;

    for _ in 0..config.obstacles {
        let coords = sample_empty_cell(&cells, config, limits, rng)?;
        cells[coords.to_nd_index()] = Cell::Obstacle;
    }

    Ok(Board::new_unchecked(cells, start, end, config.obstacles))
}

fn random_cell<R: Rng>(size: Coord, rng: &mut R) -> Coord2 {
    (rng.random_range(0..size), rng.random_range(0..size))
}

fn sample_endpoints<R: Rng>(
    config: &GameConfig,
    limits: GenerationLimits,
    rng: &mut R,
) -> Result<(Coord2, Coord2)> {
    for _ in 0..limits.max_samples {
        let start = random_cell(config.size, rng);
        let end = random_cell(config.size, rng);
        if start != end && manhattan_distance(start, end) >= config.min_distance {
            return Ok((start, end));
        }
    }

    log::warn!(
        "No start/end pair at distance {} found in {} draws",
        config.min_distance,
        limits.max_samples
    );
    Err(GameError::GenerationUnsatisfiable)
}

fn sample_empty_cell<R: Rng>(
    cells: &Array2<Cell>,
    config: &GameConfig,
    limits: GenerationLimits,
    rng: &mut R,
) -> Result<Coord2> {
    for _ in 0..limits.max_samples {
        let coords = random_cell(config.size, rng);
        if cells[coords.to_nd_index()].is_empty() {
            return Ok(coords);
        }
    }

    log::warn!("No empty cell found in {} draws", limits.max_samples);
    Err(GameError::GenerationUnsatisfiable)
}
