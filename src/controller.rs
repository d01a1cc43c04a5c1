use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::config::GameConfig;
use crate::input::{Direction, GameInput, direction_change_is_valid};
use crate::level::clamp_level;
use crate::scheduler::TickScheduler;
use crate::score::HighScoreStore;
use crate::simulation::{Simulation, TickEvent};
use crate::snapshot::GameSnapshot;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum GameStatus {
    Start,
    Playing,
    Paused,
    GameOver,
}

/// Owns the simulation, the tick timer and the high score, and turns
/// intents plus elapsed time into snapshots.
#[derive(Debug)]
pub struct GameController<S: HighScoreStore> {
    simulation: Simulation,
    status: GameStatus,
    scheduler: TickScheduler,
    /// Interval the pending tick was scheduled with.
    scheduled_interval: Duration,
    pending_intent: Option<Direction>,
    selected_level: usize,
    high_score: u32,
    new_high_score: bool,
    show_grid: bool,
    store: S,
    snapshot: GameSnapshot,
}

impl<S: HighScoreStore> GameController<S> {
    /// Builds a controller on the start screen. A failing store reads as a
    /// high score of 0.
    pub fn new(config: GameConfig, store: S) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let selected_level = clamp_level(config.start_level);
        let simulation =
            Simulation::with_rng(config.grid, selected_level, config.max_live_power_ups, rng);

        let high_score = store.load().unwrap_or_else(|error| {
            log::warn!("could not load high score, starting from 0: {error}");
            0
        });

        let snapshot = GameSnapshot::capture(&simulation, GameStatus::Start, high_score, false, true);

        Self {
            simulation,
            status: GameStatus::Start,
            scheduler: TickScheduler::new(),
            scheduled_interval: Duration::ZERO,
            pending_intent: None,
            selected_level,
            high_score,
            new_high_score: false,
            show_grid: true,
            store,
            snapshot,
        }
    }

    /// Applies one external intent received at `now`.
    pub fn handle_input(&mut self, input: GameInput, now: Instant) {
        match (self.status, input) {
            (GameStatus::Playing, GameInput::Direction(direction)) => {
                // Checked against the heading the next tick will start from.
                if direction_change_is_valid(self.simulation.snake.direction(), direction) {
                    self.pending_intent = Some(direction);
                }
            }
            (_, GameInput::Direction(_)) => {}
            (GameStatus::Playing, GameInput::TogglePause) => self.pause(),
            (GameStatus::Paused, GameInput::TogglePause) => self.resume(now),
            (GameStatus::Start, GameInput::Confirm) => self.start(now),
            (GameStatus::GameOver, GameInput::Confirm) => self.restart(now),
            (GameStatus::Start, GameInput::SelectLevel(number)) => {
                self.selected_level = clamp_level(number);
                self.simulation.reset(self.selected_level);
            }
            (GameStatus::GameOver, GameInput::SelectLevel(number)) => {
                self.selected_level = clamp_level(number);
            }
            (_, GameInput::ToggleGrid) => self.show_grid = !self.show_grid,
            _ => {}
        }

        self.refresh_snapshot();
    }

    /// Runs the pending tick if it is due at `now`. Returns the tick's events.
    pub fn update(&mut self, now: Instant) -> Vec<TickEvent> {
        let Some(token) = self.scheduler.poll(now) else {
            return Vec::new();
        };
        if !self.scheduler.is_current(token) || self.status != GameStatus::Playing {
            return Vec::new();
        }

        let events = self
            .simulation
            .advance(self.pending_intent.take(), self.scheduled_interval);

        if self.simulation.is_over() {
            self.finish_round();
        } else {
            self.schedule_next(now);
        }

        self.refresh_snapshot();
        events
    }

    fn start(&mut self, now: Instant) {
        log::info!("starting level {}", self.selected_level);
        self.status = GameStatus::Playing;
        self.schedule_next(now);
    }

    fn pause(&mut self) {
        log::info!("paused");
        self.scheduler.cancel();
        self.status = GameStatus::Paused;
    }

    fn resume(&mut self, now: Instant) {
        log::info!("resumed");
        self.status = GameStatus::Playing;
        self.schedule_next(now);
    }

    fn restart(&mut self, now: Instant) {
        self.simulation.reset(self.selected_level);
        self.pending_intent = None;
        self.new_high_score = false;
        self.start(now);
    }

    fn finish_round(&mut self) {
        self.scheduler.cancel();
        self.pending_intent = None;
        self.status = GameStatus::GameOver;

        let score = self.simulation.score;
        log::info!("game over with score {score}");
        if score <= self.high_score {
            return;
        }

        self.high_score = score;
        self.new_high_score = true;
        if let Err(error) = self.store.save(score) {
            log::warn!("could not save high score {score}: {error}");
        }
    }

    /// Re-derives the interval from the current speed on every tick.
    fn schedule_next(&mut self, now: Instant) {
        self.scheduled_interval = self.simulation.tick_interval();
        self.scheduler.schedule(now, self.scheduled_interval);
    }

    fn refresh_snapshot(&mut self) {
        self.snapshot = GameSnapshot::capture(
            &self.simulation,
            self.status,
            self.high_score,
            self.new_high_score,
            self.show_grid,
        );
    }

    /// Latest snapshot for the render sink.
    #[must_use]
    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn selected_level(&self) -> usize {
        self.selected_level
    }

    /// Time until the next tick is due, if one is scheduled.
    #[must_use]
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_until_due(now)
    }

    #[must_use]
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Mutable access for setting up scripted scenarios.
    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.simulation
    }

    pub fn set_show_grid(&mut self, show_grid: bool) {
        self.show_grid = show_grid;
        self.refresh_snapshot();
    }
}
