//! Terminal styling for console output.
//!
//! The engine itself emits plain text; hosts that print to a terminal use
//! these helpers to tell echoed input, completions and errors apart.

use super::parser::ECHO_PREFIX;

/// ANSI escape codes used by the console host.
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Dim text
    pub const DIM: &'static str = "\x1b[2m";
    /// Red color
    pub const RED: &'static str = "\x1b[31m";
    /// Green color
    pub const GREEN: &'static str = "\x1b[32m";
    /// Cyan color
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Formats section headers with styling
pub fn format_header(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::CYAN, text, Colors::RESET)
}

/// Formats command paths with styling
pub fn format_command(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::GREEN, text, Colors::RESET)
}

/// Formats echoed input with muted styling
pub fn format_echo(text: &str) -> String {
    format!("{}{}{}", Colors::DIM, text, Colors::RESET)
}

/// Formats error messages with red styling
pub fn format_error(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::RED, text, Colors::RESET)
}

/// Styles one line coming out of the console's output sink.
///
/// Echoed input is dimmed; everything else is passed through untouched.
pub fn style_output_line(line: &str) -> String {
    if line.starts_with(ECHO_PREFIX) {
        format_echo(line)
    } else {
        line.to_string()
    }
}

/// Renders completions one per line, each path styled as a command.
pub fn format_completions(paths: &[String], color: bool) -> String {
    paths
        .iter()
        .map(|path| {
            if color {
                format_command(path)
            } else {
                path.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
