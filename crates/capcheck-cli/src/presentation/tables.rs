//! Table formatting utilities for CLI output.

use std::io::IsTerminal;

/// ANSI styling, disabled when stdout is not a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    const GREEN: &'static str = "\x1b[32m";
    const RED: &'static str = "\x1b[31m";
    const YELLOW: &'static str = "\x1b[33m";
    const BOLD: &'static str = "\x1b[1m";
    const RESET: &'static str = "\x1b[0m";

    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Colors when stdout is an interactive terminal and `NO_COLOR` is unset.
    pub fn for_stdout() -> Self {
        Self::new(std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none())
    }

    pub const fn plain() -> Self {
        Self::new(false)
    }

    fn paint(self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("{code}{text}{}", Self::RESET)
        } else {
            text.to_string()
        }
    }

    pub fn green(self, text: &str) -> String {
        self.paint(Self::GREEN, text)
    }

    pub fn red(self, text: &str) -> String {
        self.paint(Self::RED, text)
    }

    pub fn yellow(self, text: &str) -> String {
        self.paint(Self::YELLOW, text)
    }

    pub fn bold(self, text: &str) -> String {
        self.paint(Self::BOLD, text)
    }
}

/// Truncates a string to a maximum length in characters, adding "..." if needed.
///
/// # Examples
///
/// ```rust
/// use capcheck_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// A horizontal separator line.
pub fn separator(width: usize) -> String {
    "-".repeat(width)
}

/// Format an optional value for table display, returning a default if None.
pub fn format_optional<T: std::fmt::Display>(value: Option<&T>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), ToString::to_string)
}

pub const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Pad `text` with spaces to `width` characters.
pub(crate) fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}
