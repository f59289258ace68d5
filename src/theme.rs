use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::Deserialize;
use thiserror::Error;

/// Colors applied to every drawable element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub background: Color,
    pub snake: Color,
    pub apple: Color,
    pub bomb: Color,
    /// Game-over message.
    pub text: Color,
    pub hud: Color,
}

impl Default for Theme {
    fn default() -> Self {
        classic_theme()
    }
}

/// Black board, light green snake, red apple, blue bombs.
#[must_use]
pub fn classic_theme() -> Theme {
    Theme {
        name: "Classic".to_owned(),
        background: Color::Rgb(0, 0, 0),
        snake: Color::Rgb(155, 188, 15),
        apple: Color::Rgb(255, 0, 0),
        bomb: Color::Rgb(0, 0, 255),
        text: Color::Rgb(255, 0, 0),
        hud: Color::Gray,
    }
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("failed to read theme file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid theme file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown color {value:?} for '{token}'")]
    InvalidColor { token: String, value: String },
}

#[derive(Debug, Deserialize)]
struct ThemeFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    colors: HashMap<String, ColorValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ColorValue {
    String(String),
    Ansi(u8),
}

/// Loads a palette from a JSON file; missing tokens keep the classic colors.
pub fn load_theme(path: &Path) -> Result<Theme, ThemeError> {
    let raw = fs::read_to_string(path).map_err(|source| ThemeError::Read {
        path: path.to_owned(),
        source,
    })?;

    parse_theme(&raw).map_err(|error| match error {
        ParseFailure::Json(source) => ThemeError::Parse {
            path: path.to_owned(),
            source,
        },
        ParseFailure::Color(error) => error,
    })
}

enum ParseFailure {
    Json(serde_json::Error),
    Color(ThemeError),
}

fn parse_theme(raw: &str) -> Result<Theme, ParseFailure> {
    let file = serde_json::from_str::<ThemeFile>(raw).map_err(ParseFailure::Json)?;
    let mut theme = classic_theme();

    if let Some(name) = file.name {
        theme.name = name;
    }

    for (token, value) in &file.colors {
        let color = resolve_value(value).ok_or_else(|| {
            ParseFailure::Color(ThemeError::InvalidColor {
                token: token.clone(),
                value: describe(value),
            })
        })?;

        let slot = match token.as_str() {
            "background" => &mut theme.background,
            "snake" => &mut theme.snake,
            "apple" => &mut theme.apple,
            "bomb" => &mut theme.bomb,
            "text" => &mut theme.text,
            "hud" => &mut theme.hud,
            // Unknown tokens are tolerated so palettes can carry extras.
            _ => continue,
        };
        *slot = color;
    }

    Ok(theme)
}

fn describe(value: &ColorValue) -> String {
    match value {
        ColorValue::String(s) => s.clone(),
        ColorValue::Ansi(code) => code.to_string(),
    }
}

fn resolve_value(value: &ColorValue) -> Option<Color> {
    match value {
        ColorValue::String(s) => parse_hex_color(s).or_else(|| parse_named_color(s)),
        ColorValue::Ansi(code) => Some(Color::Indexed(*code)),
    }
}

fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn parse_named_color(value: &str) -> Option<Color> {
    let normalized: String = value
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect();

    let color = match normalized.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        _ => return None,
    };
    Some(color)
}
