//! Diagnostic types produced by lint engines.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A position in source text.
///
/// Lines are 1-indexed, columns are 0-indexed character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (0-indexed).
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Computes the position of a byte offset within `content`.
    ///
    /// Offsets past the end clamp to the end of the text.
    pub fn from_offset(content: &str, offset: usize) -> Self {
        let offset = offset.min(content.len());
        let before = content.get(..offset).unwrap_or(content);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count();
        Self { line, column }
    }
}

/// A start/end pair of positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub start: Position,
    pub end: Position,
}

impl Location {
    /// Creates a new location.
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Computes the location of `span` within `content`.
    pub fn from_span(content: &str, span: Span) -> Self {
        Self {
            start: Position::from_offset(content, span.start),
            end: Position::from_offset(content, span.end),
        }
    }
}

/// A byte range in source text (start inclusive, end exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns true if the span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if the two spans share at least one byte, or are the
    /// same insertion point.
    #[inline]
    pub const fn overlaps(&self, other: &Span) -> bool {
        if self.is_empty() && other.is_empty() {
            return self.start == other.start;
        }
        self.start < other.end && other.start < self.end
    }
}

/// Severity level for diagnostics.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Counts toward the task's error threshold.
    #[default]
    Error,
    /// Reported but never fails the task.
    Warning,
}

impl Severity {
    /// Parses a severity name as written in configuration files.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "error" => Some(Self::Error),
            "warning" | "warn" => Some(Self::Warning),
            _ => None,
        }
    }

    /// Upper-case label used by text formatters.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
        }
    }
}

/// A replacement of a byte span.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Fix {
    /// The byte span to replace.
    pub span: Span,
    /// The replacement text.
    pub text: String,
}

impl Fix {
    /// Creates a new fix.
    pub fn new(span: Span, text: impl Into<String>) -> Self {
        Self {
            span,
            text: text.into(),
        }
    }
}

/// A single finding reported for a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The file the finding belongs to.
    pub path: PathBuf,

    /// The rule that generated this diagnostic.
    pub rule_id: String,

    /// The diagnostic message.
    pub message: String,

    /// Byte span in the source.
    pub span: Span,

    /// Line/column location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc: Option<Location>,

    /// Severity level.
    #[serde(default)]
    pub severity: Severity,

    /// Optional fix for this diagnostic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
}

impl Diagnostic {
    /// Creates a new error diagnostic.
    pub fn new(
        path: impl AsRef<Path>,
        rule_id: impl Into<String>,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            rule_id: rule_id.into(),
            message: message.into(),
            span,
            loc: None,
            severity: Severity::Error,
            fix: None,
        }
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, loc: Location) -> Self {
        self.loc = Some(loc);
        self
    }

    /// Sets an auto-fix.
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    /// 1-indexed line and column of the start, for display.
    pub fn display_position(&self) -> (usize, usize) {
        self.loc
            .map(|loc| (loc.start.line, loc.start.column + 1))
            .unwrap_or((1, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::start(0, Position::new(1, 0))]
    #[case::same_line(3, Position::new(1, 3))]
    #[case::after_newline(6, Position::new(2, 0))]
    #[case::second_line(8, Position::new(2, 2))]
    #[case::past_end(100, Position::new(3, 1))]
    fn position_from_offset(#[case] offset: usize, #[case] expected: Position) {
        let content = "const\nlet x\ny";
        assert_eq!(Position::from_offset(content, offset), expected);
    }

    #[test]
    fn position_counts_characters_not_bytes() {
        let content = "éé x";
        assert_eq!(Position::from_offset(content, 5), Position::new(1, 3));
    }

    #[test]
    fn span_overlap() {
        assert!(Span::new(0, 5).overlaps(&Span::new(4, 6)));
        assert!(!Span::new(0, 5).overlaps(&Span::new(5, 6)));
        assert!(Span::new(3, 3).overlaps(&Span::new(3, 3)));
        assert!(!Span::new(3, 3).overlaps(&Span::new(4, 4)));
    }

    #[test]
    fn severity_parse() {
        assert_eq!(Severity::parse("error"), Some(Severity::Error));
        assert_eq!(Severity::parse("warning"), Some(Severity::Warning));
        assert_eq!(Severity::parse("warn"), Some(Severity::Warning));
        assert_eq!(Severity::parse("off"), None);
    }

    #[test]
    fn diagnostic_builders() {
        let fix = Fix::new(Span::new(0, 4), "DONE");
        let diag = Diagnostic::new("a.txt", "no-todo", "Found TODO", Span::new(0, 4))
            .with_severity(Severity::Warning)
            .with_fix(fix);

        assert_eq!(diag.rule_id, "no-todo");
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.fix.as_ref().unwrap().text, "DONE");
        assert_eq!(diag.display_position(), (1, 1));
    }
}
