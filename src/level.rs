use crate::obstacle::ObstacleSeed;

/// Static configuration of one level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelConfig {
    pub name: &'static str,
    /// Base speed in ticks per second.
    pub speed: u32,
    pub obstacles: &'static [ObstacleSeed],
    /// Chance in `[0, 1]` that eating food spawns a power-up.
    pub power_up_chance: f64,
    pub description: &'static str,
}

const fn wall(x: i32, y: i32) -> ObstacleSeed {
    ObstacleSeed::Wall { x, y }
}

const fn moving(x: i32, y: i32) -> ObstacleSeed {
    ObstacleSeed::Moving { x, y }
}

const NOVICE_OBSTACLES: [ObstacleSeed; 6] = [
    wall(5, 5),
    wall(6, 5),
    wall(7, 5),
    wall(15, 15),
    wall(15, 16),
    wall(15, 17),
];

const INTERMEDIATE_OBSTACLES: [ObstacleSeed; 9] = [
    wall(3, 3),
    wall(3, 4),
    wall(3, 5),
    wall(3, 6),
    wall(16, 13),
    wall(16, 14),
    wall(16, 15),
    wall(16, 16),
    moving(10, 10),
];

const ADVANCED_OBSTACLES: [ObstacleSeed; 47] = [
    // top
    wall(5, 5),
    wall(6, 5),
    wall(7, 5),
    wall(8, 5),
    wall(9, 5),
    wall(10, 5),
    wall(11, 5),
    wall(12, 5),
    wall(13, 5),
    wall(14, 5),
    wall(15, 5),
    // right
    wall(15, 6),
    wall(15, 7),
    wall(15, 8),
    wall(15, 9),
    wall(15, 10),
    wall(15, 11),
    wall(15, 12),
    wall(15, 13),
    wall(15, 14),
    wall(15, 15),
    // bottom
    wall(5, 15),
    wall(6, 15),
    wall(7, 15),
    wall(8, 15),
    wall(9, 15),
    wall(10, 15),
    wall(11, 15),
    wall(12, 15),
    wall(13, 15),
    wall(14, 15),
    // left
    wall(5, 6),
    wall(5, 7),
    wall(5, 8),
    wall(5, 9),
    wall(5, 10),
    wall(5, 11),
    wall(5, 12),
    wall(5, 13),
    wall(5, 14),
    // inner
    wall(10, 8),
    wall(10, 9),
    wall(10, 10),
    wall(10, 11),
    wall(10, 12),
    moving(7, 7),
    moving(13, 13),
];

const EXPERT_OBSTACLES: [ObstacleSeed; 26] = [
    wall(3, 3),
    wall(4, 3),
    wall(5, 3),
    wall(6, 3),
    wall(7, 3),
    wall(7, 4),
    wall(7, 5),
    wall(7, 6),
    wall(7, 7),
    wall(8, 7),
    wall(9, 7),
    wall(10, 7),
    wall(11, 7),
    wall(12, 7),
    wall(12, 8),
    wall(12, 9),
    wall(12, 10),
    wall(12, 11),
    wall(13, 11),
    wall(14, 11),
    wall(15, 11),
    wall(16, 11),
    wall(17, 11),
    moving(5, 10),
    moving(10, 15),
    moving(15, 5),
];

/// Number of levels in the catalog.
pub const LEVEL_COUNT: usize = 5;

/// Ordered level catalog, indexed from 1.
pub static LEVELS: [LevelConfig; LEVEL_COUNT] = [
    LevelConfig {
        name: "Beginner",
        speed: 7,
        obstacles: &[],
        power_up_chance: 0.1,
        description: "Get started with the basics!",
    },
    LevelConfig {
        name: "Novice",
        speed: 8,
        obstacles: &NOVICE_OBSTACLES,
        power_up_chance: 0.15,
        description: "Watch out for walls!",
    },
    LevelConfig {
        name: "Intermediate",
        speed: 9,
        obstacles: &INTERMEDIATE_OBSTACLES,
        power_up_chance: 0.2,
        description: "Things are getting tricky!",
    },
    LevelConfig {
        name: "Advanced",
        speed: 10,
        obstacles: &ADVANCED_OBSTACLES,
        power_up_chance: 0.25,
        description: "Navigate the maze!",
    },
    LevelConfig {
        name: "Expert",
        speed: 11,
        obstacles: &EXPERT_OBSTACLES,
        power_up_chance: 0.3,
        description: "For snake masters only!",
    },
];

/// Clamps a 1-based level number into the catalog range.
#[must_use]
pub fn clamp_level(number: usize) -> usize {
    number.clamp(1, LEVEL_COUNT)
}

/// Returns the configuration for a 1-based level number, clamped to range.
#[must_use]
pub fn level(number: usize) -> &'static LevelConfig {
    &LEVELS[clamp_level(number) - 1]
}
