use rand::Rng;
use serde::Serialize;

use crate::config::MAX_PLACEMENT_ATTEMPTS;
use crate::error::PlacementError;
use crate::grid::{GridSize, Position};
use crate::obstacle::{Obstacle, obstacle_at};
use crate::snake::Snake;

/// 24-bit display color carried with entities for the render sink.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            r: rng.gen_range(0..=255),
            g: rng.gen_range(0..=255),
            b: rng.gen_range(0..=255),
        }
    }
}

/// The single food item on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Food {
    pub position: Position,
    pub color: Rgb,
    /// Display size multiplier; 1 for regular food.
    pub size: u8,
}

impl Food {
    /// Creates regular food at `position`.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            position,
            color: Rgb {
                r: 255,
                g: 64,
                b: 64,
            },
            size: 1,
        }
    }
}

/// Returns true if an obstacle occupies `cell`, or a segment of `snake` when
/// one is given.
#[must_use]
pub fn is_occupied(cell: Position, snake: Option<&Snake>, obstacles: &[Obstacle]) -> bool {
    obstacle_at(obstacles, cell) || snake.is_some_and(|snake| snake.occupies(cell))
}

/// Places food on a cell free of snake segments and obstacles.
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
    obstacles: &[Obstacle],
) -> Result<Food, PlacementError> {
    let position = free_position(rng, bounds, |cell| is_occupied(cell, Some(snake), obstacles))?;

    Ok(Food {
        position,
        color: Rgb::random(rng),
        size: 1,
    })
}

/// Finds a uniformly random cell for which `is_occupied` is false.
///
/// Rejection sampling is tried first; after [`MAX_PLACEMENT_ATTEMPTS`] misses
/// the free cells are enumerated so a crowded board still terminates.
pub fn free_position<R, F>(
    rng: &mut R,
    bounds: GridSize,
    is_occupied: F,
) -> Result<Position, PlacementError>
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    let no_space = PlacementError::NoSpaceAvailable {
        width: bounds.width,
        height: bounds.height,
    };
    if bounds.total_cells() == 0 {
        return Err(no_space);
    }

    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let candidate = bounds.random_position(rng);
        if !is_occupied(candidate) {
            return Ok(candidate);
        }
    }

    let candidates: Vec<Position> = bounds.cells().filter(|cell| !is_occupied(*cell)).collect();
    if candidates.is_empty() {
        return Err(no_space);
    }

    Ok(candidates[rng.gen_range(0..candidates.len())])
}
