//! Terminal helpers for the CLI: color detection and the stderr status lines.

use ctxfind_render::color::codes;
use ctxfind_utils::SkippedPath;

use crate::config::ColorChoice;

/// Check if colors should be enabled for stdout
pub fn colors_enabled(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            // Respect NO_COLOR and TERM conventions
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            atty::is(atty::Stream::Stdout)
        }
    }
}

fn stderr_colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
        && std::env::var("TERM").map(|t| t != "dumb").unwrap_or(true)
        && atty::is(atty::Stream::Stderr)
}

/// Status line printer with consistent formatting
pub struct StatusPrinter {
    use_colors: bool,
}

impl StatusPrinter {
    pub fn new() -> Self {
        Self {
            use_colors: stderr_colors_enabled(),
        }
    }

    fn styled(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{}{}{}{}", codes::BOLD, color, text, codes::RESET)
        } else {
            text.to_string()
        }
    }

    /// Print a warning line
    pub fn warning(&self, keyword: &str, message: &str) {
        let keyword_styled = self.styled(codes::BRIGHT_YELLOW, &format!("{:>8}", keyword));
        eprintln!("{} {}", keyword_styled, message);
    }

    /// Report every input that was not searched.
    pub fn skipped(&self, skipped: &[SkippedPath]) {
        if skipped.is_empty() {
            return;
        }
        eprintln!("Skipped {} file(s) due to errors:", skipped.len());
        for entry in skipped {
            self.warning("Skipped", &format!("{}: {}", entry.path.display(), entry.reason));
        }
    }
}

impl Default for StatusPrinter {
    fn default() -> Self {
        Self::new()
    }
}
