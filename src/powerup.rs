use std::time::Duration;

use rand::Rng;
use serde::Serialize;

use crate::food::{Rgb, free_position};
use crate::grid::{GridSize, Position};
use crate::level::LevelConfig;

/// Power-up variants.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub enum PowerUpKind {
    SpeedBoost,
    SlowMotion,
    GhostMode,
    DoublePoints,
    Shrink,
}

impl PowerUpKind {
    pub const ALL: [Self; 5] = [
        Self::SpeedBoost,
        Self::SlowMotion,
        Self::GhostMode,
        Self::DoublePoints,
        Self::Shrink,
    ];

    /// How long the effect lasts once collected, in play time.
    #[must_use]
    pub fn duration(self) -> Duration {
        match self {
            Self::SpeedBoost | Self::SlowMotion | Self::GhostMode => Duration::from_secs(5),
            Self::DoublePoints => Duration::from_secs(10),
            Self::Shrink => Duration::ZERO,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SpeedBoost => "Speed Boost!",
            Self::SlowMotion => "Slow Motion!",
            Self::GhostMode => "Ghost Mode!",
            Self::DoublePoints => "Double Points!",
            Self::Shrink => "Shrink!",
        }
    }

    #[must_use]
    pub fn color(self) -> Rgb {
        let (r, g, b) = match self {
            Self::SpeedBoost => (0xff, 0x57, 0x33),
            Self::SlowMotion => (0x33, 0xa1, 0xff),
            Self::GhostMode => (0xa6, 0x4d, 0xff),
            Self::DoublePoints => (0xff, 0xdd, 0x33),
            Self::Shrink => (0x33, 0xff, 0x57),
        };
        Rgb { r, g, b }
    }

    /// Returns `modifiers` with this effect switched on.
    ///
    /// Shrink has no lasting modifier; its one-off length cut is applied by
    /// the simulation on activation.
    #[must_use]
    pub fn apply(self, modifiers: Modifiers) -> Modifiers {
        match self {
            Self::SpeedBoost => Modifiers {
                speed_multiplier: 1.5,
                ..modifiers
            },
            Self::SlowMotion => Modifiers {
                speed_multiplier: 0.5,
                ..modifiers
            },
            Self::GhostMode => Modifiers {
                ghost: true,
                ..modifiers
            },
            Self::DoublePoints => Modifiers {
                point_multiplier: 2,
                ..modifiers
            },
            Self::Shrink => modifiers,
        }
    }

    /// Returns `modifiers` with this effect reset to baseline.
    #[must_use]
    pub fn revert(self, modifiers: Modifiers) -> Modifiers {
        let baseline = Modifiers::default();
        match self {
            Self::SpeedBoost | Self::SlowMotion => Modifiers {
                speed_multiplier: baseline.speed_multiplier,
                ..modifiers
            },
            Self::GhostMode => Modifiers {
                ghost: baseline.ghost,
                ..modifiers
            },
            Self::DoublePoints => Modifiers {
                point_multiplier: baseline.point_multiplier,
                ..modifiers
            },
            Self::Shrink => modifiers,
        }
    }
}

/// Effect state layered over the base rules by active power-ups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Modifiers {
    pub speed_multiplier: f32,
    pub ghost: bool,
    pub point_multiplier: u32,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            ghost: false,
            point_multiplier: 1,
        }
    }
}

/// A power-up on the board or in effect.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub position: Position,
    pub duration: Duration,
    /// Play time at which the snake collected it.
    pub activated_at: Option<Duration>,
}

impl PowerUp {
    #[must_use]
    pub fn new(kind: PowerUpKind, position: Position) -> Self {
        Self {
            kind,
            position,
            duration: kind.duration(),
            activated_at: None,
        }
    }

    pub fn activate(&mut self, now: Duration) {
        self.activated_at = Some(now);
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.activated_at.is_some()
    }

    /// True once an active power-up has run for its full duration.
    #[must_use]
    pub fn is_expired(&self, now: Duration) -> bool {
        self.activated_at
            .is_some_and(|started| now.saturating_sub(started) >= self.duration)
    }

    /// Time left on an active power-up.
    #[must_use]
    pub fn remaining(&self, now: Duration) -> Duration {
        match self.activated_at {
            Some(started) => self.duration.saturating_sub(now.saturating_sub(started)),
            None => self.duration,
        }
    }
}

/// Rolls the level's spawn chance and, on success, places a uniformly chosen
/// power-up on a cell for which `is_occupied` is false.
pub fn spawn_power_up<R, F>(
    level: &LevelConfig,
    rng: &mut R,
    bounds: GridSize,
    is_occupied: F,
) -> Option<PowerUp>
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    if !rng.gen_bool(level.power_up_chance.clamp(0.0, 1.0)) {
        return None;
    }

    let kind = PowerUpKind::ALL[rng.gen_range(0..PowerUpKind::ALL.len())];
    match free_position(rng, bounds, is_occupied) {
        Ok(position) => Some(PowerUp::new(kind, position)),
        Err(error) => {
            log::debug!("skipping {kind:?} spawn: {error}");
            None
        }
    }
}
