use rand::Rng;
use serde::Serialize;

use crate::config::OBSTACLE_MOVE_INTERVAL_TICKS;
use crate::grid::{GridSize, Position};

/// Static description of an obstacle in a level layout.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ObstacleSeed {
    Wall { x: i32, y: i32 },
    Moving { x: i32, y: i32 },
}

/// Obstacle variant and its per-variant state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum ObstacleKind {
    Wall,
    /// Patrols horizontally; `sign` is ±1 along x.
    Moving { sign: i32, move_counter: u32 },
}

/// Obstacle placed on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Obstacle {
    pub position: Position,
    pub kind: ObstacleKind,
}

impl Obstacle {
    #[must_use]
    pub fn wall(position: Position) -> Self {
        Self {
            position,
            kind: ObstacleKind::Wall,
        }
    }

    #[must_use]
    pub fn moving(position: Position, sign: i32) -> Self {
        Self {
            position,
            kind: ObstacleKind::Moving {
                sign,
                move_counter: 0,
            },
        }
    }

    /// Instantiates a level seed; moving obstacles start with a random sign.
    pub fn from_seed<R: Rng + ?Sized>(seed: ObstacleSeed, rng: &mut R) -> Self {
        match seed {
            ObstacleSeed::Wall { x, y } => Self::wall(Position::new(x, y)),
            ObstacleSeed::Moving { x, y } => {
                let sign = if rng.gen_bool(0.5) { 1 } else { -1 };
                Self::moving(Position::new(x, y), sign)
            }
        }
    }

    #[must_use]
    pub fn is_moving(&self) -> bool {
        matches!(self.kind, ObstacleKind::Moving { .. })
    }
}

/// Builds the live obstacle list for a level layout, dropping seeds that
/// fall outside `bounds`.
pub fn spawn_obstacles<R: Rng + ?Sized>(
    seeds: &[ObstacleSeed],
    bounds: GridSize,
    rng: &mut R,
) -> Vec<Obstacle> {
    seeds
        .iter()
        .map(|seed| Obstacle::from_seed(*seed, rng))
        .filter(|obstacle| bounds.contains(obstacle.position))
        .collect()
}

/// Returns true if any obstacle occupies `position`.
#[must_use]
pub fn obstacle_at(obstacles: &[Obstacle], position: Position) -> bool {
    obstacles.iter().any(|obstacle| obstacle.position == position)
}

/// Advances every moving obstacle by one tick.
///
/// Each moving obstacle counts ticks and attempts a one-cell step every
/// [`OBSTACLE_MOVE_INTERVAL_TICKS`]. A step into the outermost columns, onto
/// another obstacle or onto a cell for which `is_reserved` holds flips the
/// sign instead of moving. Walls never change.
pub fn advance_obstacles<F>(obstacles: &mut [Obstacle], bounds: GridSize, is_reserved: F)
where
    F: Fn(Position) -> bool,
{
    for index in 0..obstacles.len() {
        let ObstacleKind::Moving { sign, move_counter } = obstacles[index].kind else {
            continue;
        };

        let move_counter = move_counter + 1;
        if move_counter < OBSTACLE_MOVE_INTERVAL_TICKS {
            obstacles[index].kind = ObstacleKind::Moving { sign, move_counter };
            continue;
        }

        let current = obstacles[index].position;
        let next = Position::new(current.x + sign, current.y);
        let blocked = next.x <= 0
            || next.x >= i32::from(bounds.width) - 1
            || is_reserved(next)
            || obstacles
                .iter()
                .enumerate()
                .any(|(other, obstacle)| other != index && obstacle.position == next);

        let obstacle = &mut obstacles[index];
        if blocked {
            obstacle.kind = ObstacleKind::Moving {
                sign: -sign,
                move_counter: 0,
            };
        } else {
            obstacle.position = next;
            obstacle.kind = ObstacleKind::Moving {
                sign,
                move_counter: 0,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::OBSTACLE_MOVE_INTERVAL_TICKS;
    use crate::grid::{GridSize, Position};

    use super::{Obstacle, ObstacleKind, ObstacleSeed, advance_obstacles, spawn_obstacles};

    const GRID: GridSize = GridSize {
        width: 20,
        height: 20,
    };

    fn run_ticks(obstacles: &mut [Obstacle], ticks: u32) {
        for _ in 0..ticks {
            advance_obstacles(obstacles, GRID, |_| false);
        }
    }

    #[test]
    fn moving_obstacle_steps_once_per_interval() {
        let mut obstacles = [Obstacle::moving(Position::new(10, 10), 1)];

        run_ticks(&mut obstacles, OBSTACLE_MOVE_INTERVAL_TICKS - 1);
        assert_eq!(obstacles[0].position, Position::new(10, 10));

        run_ticks(&mut obstacles, 1);
        assert_eq!(obstacles[0].position, Position::new(11, 10));

        run_ticks(&mut obstacles, OBSTACLE_MOVE_INTERVAL_TICKS);
        assert_eq!(obstacles[0].position, Position::new(12, 10));
    }

    #[test]
    fn blocked_step_flips_sign_without_moving() {
        let mut obstacles = [
            Obstacle::moving(Position::new(1, 4), 1),
            Obstacle::wall(Position::new(2, 4)),
        ];

        run_ticks(&mut obstacles, OBSTACLE_MOVE_INTERVAL_TICKS);

        assert_eq!(obstacles[0].position, Position::new(1, 4));
        assert_eq!(
            obstacles[0].kind,
            ObstacleKind::Moving {
                sign: -1,
                move_counter: 0
            }
        );
    }

    #[test]
    fn reserved_cell_turns_a_patrol_around() {
        let food = Position::new(10, 15);
        let mut obstacles = [Obstacle::moving(Position::new(9, 15), 1)];

        for _ in 0..OBSTACLE_MOVE_INTERVAL_TICKS {
            advance_obstacles(&mut obstacles, GRID, |cell| cell == food);
        }

        assert_eq!(obstacles[0].position, Position::new(9, 15));
        assert!(matches!(obstacles[0].kind, ObstacleKind::Moving { sign: -1, .. }));
    }

    #[test]
    fn moving_obstacle_stays_off_the_outer_columns() {
        let mut obstacles = [Obstacle::moving(Position::new(18, 3), 1)];

        run_ticks(&mut obstacles, OBSTACLE_MOVE_INTERVAL_TICKS);
        assert_eq!(obstacles[0].position, Position::new(18, 3));

        run_ticks(&mut obstacles, OBSTACLE_MOVE_INTERVAL_TICKS);
        assert_eq!(obstacles[0].position, Position::new(17, 3));
    }

    #[test]
    fn walls_never_move() {
        let wall = Obstacle::wall(Position::new(5, 5));
        let mut obstacles = [wall];

        run_ticks(&mut obstacles, 50);

        assert_eq!(obstacles[0], wall);
    }

    #[test]
    fn seeds_outside_the_grid_are_dropped() {
        let mut rng = StdRng::seed_from_u64(5);
        let seeds = [
            ObstacleSeed::Wall { x: 3, y: 3 },
            ObstacleSeed::Wall { x: 25, y: 3 },
            ObstacleSeed::Moving { x: 10, y: 10 },
        ];

        let obstacles = spawn_obstacles(&seeds, GRID, &mut rng);

        assert_eq!(obstacles.len(), 2);
        assert!(obstacles[1].is_moving());
    }
}
