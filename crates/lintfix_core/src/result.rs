//! Accumulated lint result.

use serde::Serialize;

use crate::diagnostic::{Diagnostic, Severity};

/// Everything an engine accumulated over one task run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintResult {
    /// Findings that remain after fixes were applied.
    pub failures: Vec<Diagnostic>,
    /// Findings whose fix was applied.
    pub fixes: Vec<Diagnostic>,
    /// Number of remaining failures with error severity.
    pub error_count: usize,
    /// Number of remaining failures with warning severity.
    pub warning_count: usize,
}

impl LintResult {
    /// Builds a result from remaining failures and applied fixes.
    pub fn new(failures: Vec<Diagnostic>, fixes: Vec<Diagnostic>) -> Self {
        let error_count = failures
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();
        let warning_count = failures.len() - error_count;
        Self {
            failures,
            fixes,
            error_count,
            warning_count,
        }
    }

    /// Returns true if any remaining failure is an error.
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Span;

    #[test]
    fn counts_by_severity() {
        let failures = vec![
            Diagnostic::new("a", "r", "m", Span::new(0, 1)),
            Diagnostic::new("a", "r", "m", Span::new(1, 2)).with_severity(Severity::Warning),
            Diagnostic::new("b", "r", "m", Span::new(0, 1)),
        ];

        let result = LintResult::new(failures, Vec::new());

        assert_eq!(result.error_count, 2);
        assert_eq!(result.warning_count, 1);
        assert!(result.has_errors());
    }

    #[test]
    fn empty_result_has_no_errors() {
        assert!(!LintResult::default().has_errors());
    }
}
