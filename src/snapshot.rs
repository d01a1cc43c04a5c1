use serde::Serialize;

use crate::controller::GameStatus;
use crate::food::Food;
use crate::grid::{GridSize, Position};
use crate::input::Direction;
use crate::obstacle::Obstacle;
use crate::powerup::PowerUpKind;
use crate::simulation::{CollisionKind, Simulation};

/// A power-up waiting on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct PowerUpView {
    pub kind: PowerUpKind,
    pub position: Position,
}

/// A power-up currently in effect.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub remaining_ms: u64,
}

/// Read-only view of one tick, handed to the render sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub status: GameStatus,
    pub bounds: GridSize,
    /// Segments from head to tail.
    pub snake: Vec<Position>,
    pub direction: Direction,
    pub food: Option<Food>,
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<PowerUpView>,
    pub active_power_ups: Vec<ActivePowerUp>,
    pub ghost: bool,
    pub score: u32,
    pub high_score: u32,
    pub new_high_score: bool,
    /// Ticks per second, including power-up multipliers.
    pub speed: f32,
    pub level: usize,
    pub level_name: &'static str,
    pub level_description: &'static str,
    pub collision: Option<CollisionKind>,
    pub show_grid: bool,
    pub tick_count: u64,
}

impl GameSnapshot {
    /// Copies everything the front-end needs out of `simulation`.
    #[must_use]
    pub fn capture(
        simulation: &Simulation,
        status: GameStatus,
        high_score: u32,
        new_high_score: bool,
        show_grid: bool,
    ) -> Self {
        let now = simulation.play_time();
        let config = simulation.level();

        Self {
            status,
            bounds: simulation.bounds(),
            snake: simulation.snake.segments().copied().collect(),
            direction: simulation.snake.direction(),
            food: simulation.food,
            obstacles: simulation.obstacles.clone(),
            power_ups: simulation
                .power_ups
                .iter()
                .filter(|p| !p.is_active())
                .map(|p| PowerUpView {
                    kind: p.kind,
                    position: p.position,
                })
                .collect(),
            active_power_ups: simulation
                .active_power_ups()
                .map(|p| ActivePowerUp {
                    kind: p.kind,
                    remaining_ms: u64::try_from(p.remaining(now).as_millis()).unwrap_or(u64::MAX),
                })
                .collect(),
            ghost: simulation.modifiers.ghost,
            score: simulation.score,
            high_score,
            new_high_score,
            speed: simulation.speed(),
            level: simulation.level_number(),
            level_name: config.name,
            level_description: config.description,
            collision: simulation.collision(),
            show_grid,
            tick_count: simulation.tick_count,
        }
    }

    /// Head cell of the snake.
    #[must_use]
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }
}
