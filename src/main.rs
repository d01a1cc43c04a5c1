use std::fs::File;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use simplelog::{Config, LevelFilter, WriteLogger};
use snake_levels::config::{
    DEFAULT_GRID_DIMENSION, DEFAULT_MAX_LIVE_POWER_UPS, GameConfig, MIN_GRID_DIMENSION,
};
use snake_levels::controller::GameController;
use snake_levels::grid::GridSize;
use snake_levels::input::{GameInput, InputHandler};
use snake_levels::score::JsonFileStore;
use snake_levels::terminal_runtime::{TerminalSession, restore_terminal};

/// Longest wait for input before redrawing.
const IDLE_POLL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Level to start on (clamped to the available levels).
    #[arg(long, default_value_t = 1)]
    level: usize,

    /// Cells per side of the square board.
    #[arg(
        long = "grid-size",
        default_value_t = DEFAULT_GRID_DIMENSION,
        value_parser = clap::value_parser!(u16).range(i64::from(MIN_GRID_DIMENSION)..=64)
    )]
    grid_size: u16,

    /// Fixed RNG seed for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,

    /// Uncollected power-ups allowed on the board at once.
    #[arg(long = "max-power-ups", default_value_t = DEFAULT_MAX_LIVE_POWER_UPS)]
    max_power_ups: usize,

    /// Start with grid dots hidden.
    #[arg(long = "no-grid")]
    no_grid: bool,

    /// Where log output is written.
    #[arg(long = "log-file", default_value = "snake-levels.log")]
    log_file: PathBuf,

    #[arg(long = "log-level", value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Err(error) = init_logging(&cli) {
        eprintln!("Logging disabled: {error}");
    }
    install_panic_hook();

    let config = GameConfig {
        grid: GridSize::square(cli.grid_size),
        start_level: cli.level,
        max_live_power_ups: cli.max_power_ups,
        seed: cli.seed,
    };
    log::info!("starting with {config:?}");

    run(config, !cli.no_grid)
}

fn run(config: GameConfig, show_grid: bool) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;
    let mut controller = GameController::new(config, JsonFileStore::at_default_path());
    controller.set_show_grid(show_grid);
    let mut input = InputHandler::new();

    loop {
        session.draw(controller.snapshot())?;

        let timeout = controller
            .time_until_tick(Instant::now())
            .map_or(IDLE_POLL, |due| due.min(IDLE_POLL));

        if let Some(game_input) = input.poll_input(timeout)? {
            if game_input == GameInput::Quit {
                break;
            }
            controller.handle_input(game_input, Instant::now());
        }

        for event in controller.update(Instant::now()) {
            log::debug!("tick event: {event:?}");
        }
    }

    log::info!("quitting with high score {}", controller.high_score());
    Ok(())
}

fn init_logging(cli: &Cli) -> io::Result<()> {
    let file = File::create(&cli.log_file)?;
    WriteLogger::init(cli.log_level.into(), Config::default(), file)
        .map_err(|error| io::Error::new(io::ErrorKind::AlreadyExists, error))
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        log::error!("panic: {panic_info}");
        default_hook(panic_info);
    }));
}
