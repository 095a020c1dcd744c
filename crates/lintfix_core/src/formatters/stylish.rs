use std::fmt::Write;

use super::{Formatter, group_by_path};
use crate::diagnostic::Diagnostic;

/// Failures grouped under their file name.
#[derive(Debug, Default, Clone, Copy)]
pub struct StylishFormatter;

impl Formatter for StylishFormatter {
    fn format(&self, failures: &[Diagnostic], _fixes: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (path, group) in group_by_path(failures) {
            let _ = writeln!(out, "{}", path.display());
            for failure in group {
                let (line, column) = failure.display_position();
                let _ = writeln!(
                    out,
                    "{:>5}:{:<4} {:<7}  {}  {}",
                    line,
                    column,
                    failure.severity.label().to_lowercase(),
                    failure.message,
                    failure.rule_id
                );
            }
            out.push('\n');
        }
        out
    }
}
