//! Level-based Snake: a tick-driven simulation core with a terminal front-end.

pub mod config;
pub mod controller;
pub mod error;
pub mod food;
pub mod grid;
pub mod input;
pub mod level;
pub mod obstacle;
pub mod powerup;
pub mod renderer;
pub mod scheduler;
pub mod score;
pub mod simulation;
pub mod snake;
pub mod snapshot;
pub mod terminal_runtime;
pub mod ui;
