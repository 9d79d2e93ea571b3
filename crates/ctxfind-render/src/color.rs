//! ANSI terminal colors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// ANSI color codes for terminal styling
pub mod codes {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";

    pub const BRIGHT_RED: &str = "\x1b[91m";
    pub const BRIGHT_GREEN: &str = "\x1b[92m";
    pub const BRIGHT_YELLOW: &str = "\x1b[93m";
    pub const BRIGHT_BLUE: &str = "\x1b[94m";
    pub const BRIGHT_MAGENTA: &str = "\x1b[95m";
    pub const BRIGHT_CYAN: &str = "\x1b[96m";
}

/// Marker that ends any color started by [`Color::start`].
pub const END_COLOR: &str = codes::RESET;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
}

impl Color {
    /// Escape sequence that starts this color.
    pub fn start(&self) -> &'static str {
        match self {
            Color::Red => codes::RED,
            Color::Green => codes::GREEN,
            Color::Yellow => codes::YELLOW,
            Color::Blue => codes::BLUE,
            Color::Magenta => codes::MAGENTA,
            Color::Cyan => codes::CYAN,
            Color::BrightRed => codes::BRIGHT_RED,
            Color::BrightGreen => codes::BRIGHT_GREEN,
            Color::BrightYellow => codes::BRIGHT_YELLOW,
            Color::BrightBlue => codes::BRIGHT_BLUE,
            Color::BrightMagenta => codes::BRIGHT_MAGENTA,
            Color::BrightCyan => codes::BRIGHT_CYAN,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::BrightRed => "bright-red",
            Color::BrightGreen => "bright-green",
            Color::BrightYellow => "bright-yellow",
            Color::BrightBlue => "bright-blue",
            Color::BrightMagenta => "bright-magenta",
            Color::BrightCyan => "bright-cyan",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        let color = match normalized.as_str() {
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "bright-red" | "light-red" => Color::BrightRed,
            "bright-green" | "light-green" => Color::BrightGreen,
            "bright-yellow" | "light-yellow" => Color::BrightYellow,
            "bright-blue" | "light-blue" => Color::BrightBlue,
            "bright-magenta" | "light-magenta" => Color::BrightMagenta,
            "bright-cyan" | "light-cyan" => Color::BrightCyan,
            _ => return Err(format!("Unknown color: '{s}'")),
        };
        Ok(color)
    }
}

/// Wrap the whole of `text` in `color`.
pub fn paint(text: &str, color: Color) -> String {
    format!("{}{}{}", color.start(), text, END_COLOR)
}

/// Wrap the half-open character range `[start, end)` of `text` in `color`.
///
/// Offsets count characters, not bytes. All text outside the range is left untouched;
/// `start == end` inserts an empty color pair.
pub fn insert_color(text: &str, start: usize, end: usize, color: Color) -> Result<String, RenderError> {
    let len = text.chars().count();
    if start > end || end > len {
        return Err(RenderError::InvalidRange { start, end, len });
    }

    let byte_at = |char_index: usize| {
        text.char_indices()
            .nth(char_index)
            .map_or(text.len(), |(byte, _)| byte)
    };
    let (start_byte, end_byte) = (byte_at(start), byte_at(end));

    let mut colored = String::with_capacity(text.len() + color.start().len() + END_COLOR.len());
    colored.push_str(&text[..start_byte]);
    colored.push_str(color.start());
    colored.push_str(&text[start_byte..end_byte]);
    colored.push_str(END_COLOR);
    colored.push_str(&text[end_byte..]);
    Ok(colored)
}
