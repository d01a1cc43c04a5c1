use ratatui::style::Color;
use ratatui::symbols::border;

use crate::grid::GridSize;

/// Default grid dimension (cells per side).
pub const DEFAULT_GRID_DIMENSION: u16 = 20;

/// Smallest grid dimension accepted from the command line.
pub const MIN_GRID_DIMENSION: u16 = 8;

/// Score needed per speed step.
pub const POINTS_PER_SPEED_STEP: u32 = 5;

/// Moving obstacles take one step every this many ticks.
pub const OBSTACLE_MOVE_INTERVAL_TICKS: u32 = 10;

/// Segments removed by a shrink power-up.
pub const SHRINK_AMOUNT: usize = 3;

/// Shrinking never takes the snake below this length.
pub const MIN_LENGTH_AFTER_SHRINK: usize = 3;

/// Random samples tried before falling back to a full free-cell scan.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 256;

/// Uncollected power-ups allowed on the board at once.
pub const DEFAULT_MAX_LIVE_POWER_UPS: usize = 1;

/// Session-wide settings chosen at startup.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub grid: GridSize,
    pub start_level: usize,
    pub max_live_power_ups: usize,
    /// Fixed RNG seed for reproducible sessions.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::square(DEFAULT_GRID_DIMENSION),
            start_level: 1,
            max_live_power_ups: DEFAULT_MAX_LIVE_POWER_UPS,
            seed: None,
        }
    }
}

/// Colors applied to every visual element of the terminal front-end.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_ghost: Color,
    pub wall: Color,
    pub moving_obstacle: Color,
    pub grid_line: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    pub hud_accent: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

pub const THEME: Theme = Theme {
    snake_head: Color::White,
    snake_body: Color::Green,
    snake_ghost: Color::Rgb(166, 77, 255),
    wall: Color::Rgb(139, 69, 19),
    moving_obstacle: Color::Rgb(255, 69, 0),
    grid_line: Color::Rgb(48, 48, 48),
    play_bg: Color::Rgb(34, 34, 34),
    border_fg: Color::White,
    hud_label: Color::DarkGray,
    hud_value: Color::White,
    hud_accent: Color::Yellow,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Terminal columns used per grid cell, keeping cells roughly square.
pub const CELL_WIDTH: u16 = 2;

pub const GLYPH_SNAKE_HEAD: &str = "██";
pub const GLYPH_SNAKE_BODY: &str = "▓▓";
pub const GLYPH_FOOD: &str = "●";
pub const GLYPH_WALL: &str = "▒▒";
pub const GLYPH_MOVING_OBSTACLE: &str = "◆";
pub const GLYPH_POWER_UP: &str = "★";
pub const GLYPH_GRID_DOT: &str = "·";
