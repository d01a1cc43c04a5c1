use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::config::{MIN_LENGTH_AFTER_SHRINK, POINTS_PER_SPEED_STEP, SHRINK_AMOUNT};
use crate::food::{Food, is_occupied, place_food};
use crate::grid::{GridSize, Position};
use crate::input::Direction;
use crate::level::{LevelConfig, clamp_level, level};
use crate::obstacle::{Obstacle, advance_obstacles, obstacle_at, spawn_obstacles};
use crate::powerup::{Modifiers, PowerUp, PowerUpKind, spawn_power_up};
use crate::snake::Snake;

/// What the snake ran into.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum CollisionKind {
    Boundary,
    SelfCollision,
    Obstacle,
}

/// Notable things that happened during one tick, in the order they happened.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickEvent {
    FoodEaten { position: Position, points: u32 },
    /// No free cell for new food; placement is retried next tick.
    FoodDeferred,
    Collision(CollisionKind),
    PowerUpSpawned(PowerUpKind),
    PowerUpActivated(PowerUpKind),
    PowerUpExpired(PowerUpKind),
}

/// Complete simulation state for one round on one level.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub snake: Snake,
    pub food: Option<Food>,
    pub obstacles: Vec<Obstacle>,
    /// Power-ups waiting on the board and power-ups in effect.
    pub power_ups: Vec<PowerUp>,
    pub modifiers: Modifiers,
    pub score: u32,
    pub tick_count: u64,
    collision: Option<CollisionKind>,
    play_time: Duration,
    level_number: usize,
    max_live_power_ups: usize,
    bounds: GridSize,
    rng: StdRng,
}

impl Simulation {
    /// Creates a deterministic round for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, level_number: usize, seed: u64) -> Self {
        Self::with_rng(bounds, level_number, 1, StdRng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn with_rng(
        bounds: GridSize,
        level_number: usize,
        max_live_power_ups: usize,
        rng: StdRng,
    ) -> Self {
        let mut simulation = Self {
            snake: Snake::new(bounds.center(), Direction::None),
            food: None,
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            modifiers: Modifiers::default(),
            score: 0,
            tick_count: 0,
            collision: None,
            play_time: Duration::ZERO,
            level_number: clamp_level(level_number),
            max_live_power_ups,
            bounds,
            rng,
        };
        simulation.reset(level_number);
        simulation
    }

    /// Starts a fresh round on `level_number`, keeping the RNG stream.
    pub fn reset(&mut self, level_number: usize) {
        self.level_number = clamp_level(level_number);
        let config = self.level();
        log::info!("loading level {} ({})", self.level_number, config.name);

        self.obstacles = spawn_obstacles(config.obstacles, self.bounds, &mut self.rng);
        self.snake = Snake::new(
            spawn_point(self.bounds, &self.obstacles),
            Direction::None,
        );
        self.power_ups.clear();
        self.modifiers = Modifiers::default();
        self.score = 0;
        self.tick_count = 0;
        self.collision = None;
        self.play_time = Duration::ZERO;
        self.food = None;
        self.try_place_food();
    }

    /// Advances the round by one tick.
    ///
    /// Order per tick: apply `intent`, move and bite, collision, food
    /// restock, power-up pickup, power-up expiry, obstacles. A bite is scored
    /// even when the same move ends the round. `elapsed` is the play time since the
    /// previous tick and drives power-up durations. After a collision every
    /// further call is a no-op until [`Simulation::reset`].
    pub fn advance(&mut self, intent: Option<Direction>, elapsed: Duration) -> Vec<TickEvent> {
        let mut events = Vec::new();
        if self.is_over() {
            return events;
        }

        self.tick_count += 1;
        self.play_time += elapsed;

        if let Some(direction) = intent {
            self.snake.steer(direction);
        }

        let head = self.snake.push_head();
        let ate = self.food.is_some_and(|food| food.position == head);
        if ate {
            let points = self.modifiers.point_multiplier;
            self.score += points;
            self.food = None;
            events.push(TickEvent::FoodEaten {
                position: head,
                points,
            });
        } else {
            self.snake.drop_tail();
        }

        if let Some(kind) = self.detect_collision(head) {
            log::info!("collision ({kind:?}) at ({}, {}) with score {}", head.x, head.y, self.score);
            self.collision = Some(kind);
            events.push(TickEvent::Collision(kind));
            return events;
        }

        if ate {
            self.restock_after_bite(&mut events);
        } else if self.food.is_none() && !self.try_place_food() {
            events.push(TickEvent::FoodDeferred);
        }

        self.collect_power_up(head, &mut events);
        self.expire_power_ups(&mut events);
        let food = self.food.map(|food| food.position);
        let power_ups = &self.power_ups;
        advance_obstacles(&mut self.obstacles, self.bounds, |cell| {
            food == Some(cell) || power_ups.iter().any(|p| !p.is_active() && p.position == cell)
        });

        events
    }

    fn detect_collision(&self, head: Position) -> Option<CollisionKind> {
        if !head.is_within_bounds(self.bounds) {
            return Some(CollisionKind::Boundary);
        }
        if self.snake.head_overlaps_body() {
            return Some(CollisionKind::SelfCollision);
        }
        if !self.modifiers.ghost && obstacle_at(&self.obstacles, head) {
            return Some(CollisionKind::Obstacle);
        }
        None
    }

    /// Replaces eaten food and rolls for a power-up.
    fn restock_after_bite(&mut self, events: &mut Vec<TickEvent>) {
        if !self.try_place_food() {
            events.push(TickEvent::FoodDeferred);
        }

        let waiting = self.power_ups.iter().filter(|p| !p.is_active()).count();
        if waiting >= self.max_live_power_ups {
            return;
        }

        let spawned = spawn_power_up(self.level(), &mut self.rng, self.bounds, |cell| {
            is_occupied(cell, Some(&self.snake), &self.obstacles)
                || self.food.is_some_and(|food| food.position == cell)
                || self.power_ups.iter().any(|p| !p.is_active() && p.position == cell)
        });
        if let Some(power_up) = spawned {
            log::debug!(
                "spawned {:?} at ({}, {})",
                power_up.kind,
                power_up.position.x,
                power_up.position.y
            );
            events.push(TickEvent::PowerUpSpawned(power_up.kind));
            self.power_ups.push(power_up);
        }
    }

    /// Returns false when the board has no room for food.
    fn try_place_food(&mut self) -> bool {
        match place_food(&mut self.rng, self.bounds, &self.snake, &self.obstacles) {
            Ok(food) => {
                self.food = Some(food);
                true
            }
            Err(error) => {
                log::warn!("deferring food spawn: {error}");
                false
            }
        }
    }

    fn collect_power_up(&mut self, head: Position, events: &mut Vec<TickEvent>) {
        let Some(index) = self
            .power_ups
            .iter()
            .position(|p| !p.is_active() && p.position == head)
        else {
            return;
        };

        let kind = self.power_ups[index].kind;
        // A second pickup of the same kind restarts its timer.
        self.power_ups.retain(|p| !(p.is_active() && p.kind == kind));
        let Some(power_up) = self
            .power_ups
            .iter_mut()
            .find(|p| !p.is_active() && p.position == head)
        else {
            return;
        };

        power_up.activate(self.play_time);
        self.modifiers = kind.apply(self.modifiers);
        if kind == PowerUpKind::Shrink {
            self.snake.shrink(SHRINK_AMOUNT, MIN_LENGTH_AFTER_SHRINK);
        }

        log::debug!("activated {kind:?}");
        events.push(TickEvent::PowerUpActivated(kind));
    }

    fn expire_power_ups(&mut self, events: &mut Vec<TickEvent>) {
        let now = self.play_time;
        let (expired, kept): (Vec<PowerUp>, Vec<PowerUp>) = self
            .power_ups
            .drain(..)
            .partition(|power_up| power_up.is_expired(now));
        self.power_ups = kept;

        if expired.is_empty() {
            return;
        }

        for power_up in &expired {
            self.modifiers = power_up.kind.revert(self.modifiers);
            log::debug!("{:?} expired", power_up.kind);
            events.push(TickEvent::PowerUpExpired(power_up.kind));
        }

        // Effects still running on a field that was just reverted win it back.
        let mut still_active: Vec<&PowerUp> =
            self.power_ups.iter().filter(|p| p.is_active()).collect();
        still_active.sort_by_key(|p| p.activated_at);
        for power_up in still_active {
            self.modifiers = power_up.kind.apply(self.modifiers);
        }
    }

    /// Base speed of the level plus one step per [`POINTS_PER_SPEED_STEP`].
    #[must_use]
    pub fn base_speed(&self) -> u32 {
        self.level().speed + self.score / POINTS_PER_SPEED_STEP
    }

    /// Effective speed in ticks per second.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.base_speed() as f32 * self.modifiers.speed_multiplier
    }

    /// Delay until the next tick at the current speed.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.speed().max(0.1))
    }

    #[must_use]
    pub fn level(&self) -> &'static LevelConfig {
        level(self.level_number)
    }

    #[must_use]
    pub fn level_number(&self) -> usize {
        self.level_number
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    #[must_use]
    pub fn play_time(&self) -> Duration {
        self.play_time
    }

    #[must_use]
    pub fn collision(&self) -> Option<CollisionKind> {
        self.collision
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.collision.is_some()
    }

    /// Power-ups currently in effect.
    pub fn active_power_ups(&self) -> impl Iterator<Item = &PowerUp> {
        self.power_ups.iter().filter(|p| p.is_active())
    }
}

/// Grid center, or the free cell closest to it when an obstacle sits there.
fn spawn_point(bounds: GridSize, obstacles: &[Obstacle]) -> Position {
    let center = bounds.center();
    if !is_occupied(center, None, obstacles) {
        return center;
    }

    bounds
        .cells()
        .filter(|cell| !is_occupied(*cell, None, obstacles))
        .min_by_key(|cell| (cell.x - center.x).abs() + (cell.y - center.y).abs())
        .unwrap_or(center)
}
