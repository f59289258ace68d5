use std::io;
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::GridGeometry;
use crate::error::{Result, SnakeError};
use crate::game::GameState;
use crate::renderer::{self, Screen};
use crate::theme::Theme;

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Owns terminal lifecycle (raw mode + alternate screen) for one game session.
///
/// On drop, this type restores terminal state best-effort.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    /// Checks the terminal can hold the board, then enters raw mode and the
    /// alternate screen with the window title set.
    pub fn enter(title: &str, geometry: GridGeometry) -> Result<Self> {
        ensure_fits(geometry)?;
        install_panic_hook();
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide, SetTitle(title)) {
            let _ = disable_raw_mode();
            return Err(error.into());
        }

        let backend = CrosstermBackend::new(stdout);
        match Terminal::new(backend) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(error) => {
                let _ = cleanup_terminal_best_effort();
                Err(error.into())
            }
        }
    }
}

impl Screen for TerminalSession {
    fn present(
        &mut self,
        state: &GameState,
        theme: &Theme,
        geometry: GridGeometry,
    ) -> io::Result<()> {
        self.terminal
            .draw(|frame| renderer::render(frame, state, theme, geometry))?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = cleanup_terminal_best_effort();
    }
}

fn ensure_fits(geometry: GridGeometry) -> Result<()> {
    let required = renderer::required_terminal_size(geometry);
    let actual = terminal::size()?;

    if actual.0 < required.0 || actual.1 < required.1 {
        return Err(SnakeError::TerminalTooSmall { required, actual });
    }

    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal_best_effort();
        default_hook(panic_info);
    }));
}

fn cleanup_terminal_best_effort() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}
