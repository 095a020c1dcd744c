use super::{Formatter, fix_lines};
use crate::diagnostic::Diagnostic;

/// One line per failure: `ERROR: path[line, col]: message`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProseFormatter;

impl Formatter for ProseFormatter {
    fn format(&self, failures: &[Diagnostic], fixes: &[Diagnostic]) -> String {
        if failures.is_empty() && fixes.is_empty() {
            return String::new();
        }

        let mut lines = fix_lines(fixes);
        for failure in failures {
            let (line, column) = failure.display_position();
            lines.push(format!(
                "{}: {}[{}, {}]: {}",
                failure.severity.label(),
                failure.path.display(),
                line,
                column,
                failure.message
            ));
        }

        lines.join("\n") + "\n"
    }
}
