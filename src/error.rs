use std::io;

use thiserror::Error;

use crate::theme::ThemeError;

/// Setup and I/O failures. Losing a round is not an error.
#[derive(Debug, Error)]
pub enum SnakeError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Theme(#[from] ThemeError),
    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("terminal is {actual:?} but the board needs at least {required:?} (columns, rows)")]
    TerminalTooSmall {
        required: (u16, u16),
        actual: (u16, u16),
    },
}

pub type Result<T, E = SnakeError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::SnakeError;

    #[test]
    fn terminal_too_small_names_both_sizes() {
        let error = SnakeError::TerminalTooSmall {
            required: (64, 25),
            actual: (40, 20),
        };

        let message = error.to_string();
        assert!(message.contains("(40, 20)"));
        assert!(message.contains("(64, 25)"));
    }
}
