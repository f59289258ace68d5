use std::path::PathBuf;

use bomb_snake::app::App;
use bomb_snake::config::{DEFAULT_GRID, GEOMETRY, WINDOW_TITLE};
use bomb_snake::error::Result;
use bomb_snake::game::GameState;
use bomb_snake::input::InputHandler;
use bomb_snake::logging::init_file_logger;
use bomb_snake::terminal_runtime::TerminalSession;
use bomb_snake::theme::{Theme, load_theme};
use clap::{Parser, ValueEnum};
use simplelog::LevelFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Snake on a wraparound grid. Every fifth apple drops a bomb.")]
struct Cli {
    /// Seed the session RNG for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON palette file overriding the classic colors.
    #[arg(long, value_name = "PATH")]
    theme: Option<PathBuf>,

    /// Write logs to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log verbosity when --log-file is given.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

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

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_file_logger(path, cli.log_level.into())?;
    }

    let theme = match &cli.theme {
        Some(path) => load_theme(path)?,
        None => Theme::default(),
    };
    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(DEFAULT_GRID, seed),
        None => GameState::new(DEFAULT_GRID),
    };

    let mut session = TerminalSession::enter(WINDOW_TITLE, GEOMETRY)?;
    let mut input = InputHandler::new();
    App::new(state, theme).run(&mut session, &mut input)?;

    Ok(())
}
