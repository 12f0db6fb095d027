//! Split migration file content into its UP and DOWN scripts.
//!
//! The content is scanned line by line. A line starting with `--` (after
//! trimming) is a directive: `-- UP` and `-- DOWN` switch the active section,
//! any other `--` line is dropped. Content lines are trimmed and appended to
//! the active section. Lines before the first directive are discarded.

use crate::error::{CoreError, CoreResult};
use std::io::BufRead;

/// Prefix that marks a directive line.
const DIRECTIVE_MARKER: &str = "--";

/// Section of a migration file that content lines are routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    /// Before any section marker; lines are discarded.
    #[default]
    Skip,
    /// Forward script.
    Up,
    /// Backward script.
    Down,
}

/// Classification of a single trimmed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    /// `-- UP` or `-- DOWN`
    Directive(Section),
    /// Any other `--` line
    Comment,
    /// Everything else
    Content(&'a str),
}

impl<'a> Line<'a> {
    fn classify(raw: &'a str) -> Self {
        let line = raw.trim();
        match line.strip_prefix(DIRECTIVE_MARKER) {
            Some(rest) => match rest.trim() {
                "UP" => Line::Directive(Section::Up),
                "DOWN" => Line::Directive(Section::Down),
                _ => Line::Comment,
            },
            None => Line::Content(line),
        }
    }
}

impl Section {
    /// Section in effect after seeing `line`.
    fn next(self, line: Line<'_>) -> Self {
        match line {
            Line::Directive(section) => section,
            Line::Comment | Line::Content(_) => self,
        }
    }
}

/// Direction of a migration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Apply the next migration
    Up,
    /// Revert the latest applied migration
    Down,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// The two scripts held by one migration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMigration {
    /// Statements run when applying the migration
    pub up: String,

    /// Statements run when reverting the migration
    pub down: String,
}

impl ParsedMigration {
    /// Script for the given direction.
    pub fn script(&self, direction: Direction) -> &str {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
        }
    }
}

/// Parse raw migration file bytes.
///
/// Never fails on content shape: missing markers give empty scripts and bytes
/// that are not valid UTF-8 are replaced.
pub fn parse_migration(raw: &[u8]) -> CoreResult<ParsedMigration> {
    parse_migration_reader(raw)
}

/// Parse migration content from any buffered reader.
///
/// Lines are split on `\n` as raw bytes, so only an I/O error from `reader`
/// fails the parse.
pub fn parse_migration_reader<R: BufRead>(reader: R) -> CoreResult<ParsedMigration> {
    let mut up: Vec<String> = Vec::new();
    let mut down: Vec<String> = Vec::new();
    let mut section = Section::Skip;

    for raw in reader.split(b'\n') {
        let bytes = raw.map_err(CoreError::ReadError)?;
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(&bytes[..]);
        let text = String::from_utf8_lossy(bytes);
        let line = Line::classify(&text);
        section = section.next(line);

        if let Line::Content(content) = line {
            match section {
                Section::Up => up.push(content.to_string()),
                Section::Down => down.push(content.to_string()),
                Section::Skip => {}
            }
        }
    }

    Ok(ParsedMigration {
        up: up.join("\n"),
        down: down.join("\n"),
    })
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
