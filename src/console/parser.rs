//! Splitting of raw input lines into a command path and a parameter string.

/// Separator between the segments of a dotted command path.
pub const NODE_SEPARATOR: char = '.';

/// Parameter string that asks for a command's help instead of running it.
pub const HELP_TOKEN: &str = "?";

/// Prefix written before echoed user input.
pub const ECHO_PREFIX: &str = "> ";

/// A raw input line split into its command path and parameter string.
///
/// `Time.scale 1.5` becomes segments `["Time", "scale"]` with params `"1.5"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// Path segments in input order, casing preserved.
    pub segments: Vec<String>,

    /// Everything after the first whitespace, trimmed. Empty when absent.
    pub params: String,
}

impl ParsedLine {
    /// Joins the segments back into the dotted path the user typed.
    pub fn path(&self) -> String {
        self.segments.join(&NODE_SEPARATOR.to_string())
    }
}

/// Splits `line` into its dotted command path and trailing parameter string.
///
/// The line is trimmed and cut at its first whitespace character. Empty path
/// segments are kept, so `"a..b"` yields `["a", "", "b"]` and `"time."`
/// yields `["time", ""]`.
pub fn parse_line(line: &str) -> ParsedLine {
    let line = line.trim();

    let (command, params) = match line.find(char::is_whitespace) {
        Some(end) => (&line[..end], line[end..].trim()),
        None => (line, ""),
    };

    ParsedLine {
        segments: command.split(NODE_SEPARATOR).map(str::to_string).collect(),
        params: params.to_string(),
    }
}
