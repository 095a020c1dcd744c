use super::{Formatter, fix_lines};
use crate::diagnostic::Diagnostic;

/// Like prose, with the rule name: `ERROR: (rule) path[line, col]: message`.
#[derive(Debug, Default, Clone, Copy)]
pub struct VerboseFormatter;

impl Formatter for VerboseFormatter {
    fn format(&self, failures: &[Diagnostic], fixes: &[Diagnostic]) -> String {
        if failures.is_empty() && fixes.is_empty() {
            return String::new();
        }

        let mut lines = fix_lines(fixes);
        for failure in failures {
            let (line, column) = failure.display_position();
            lines.push(format!(
                "{}: ({}) {}[{}, {}]: {}",
                failure.severity.label(),
                failure.rule_id,
                failure.path.display(),
                line,
                column,
                failure.message
            ));
        }

        lines.join("\n") + "\n"
    }
}
