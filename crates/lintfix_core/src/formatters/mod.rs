//! Report formatters.

mod json;
mod prose;
mod stylish;
mod verbose;

use std::path::Path;

use crate::diagnostic::Diagnostic;

pub use json::JsonFormatter;
pub use prose::ProseFormatter;
pub use stylish::StylishFormatter;
pub use verbose::VerboseFormatter;

/// Names of the built-in formatters.
pub const FORMATTER_NAMES: &[&str] = &["prose", "verbose", "json", "stylish"];

/// Renders remaining failures and applied fixes.
pub trait Formatter {
    /// Returns the rendered report; an empty string means nothing to report.
    fn format(&self, failures: &[Diagnostic], fixes: &[Diagnostic]) -> String;
}

/// Looks up a built-in formatter by name.
pub fn find_formatter(name: &str) -> Option<Box<dyn Formatter>> {
    match name {
        "prose" => Some(Box::new(ProseFormatter)),
        "verbose" => Some(Box::new(VerboseFormatter)),
        "json" => Some(Box::new(JsonFormatter)),
        "stylish" => Some(Box::new(StylishFormatter)),
        _ => None,
    }
}

/// Groups diagnostics by file, keeping the order files first appear in.
pub(crate) fn group_by_path(diagnostics: &[Diagnostic]) -> Vec<(&Path, Vec<&Diagnostic>)> {
    let mut groups: Vec<(&Path, Vec<&Diagnostic>)> = Vec::new();
    for diagnostic in diagnostics {
        match groups
            .iter_mut()
            .find(|(path, _)| *path == diagnostic.path.as_path())
        {
            Some((_, group)) => group.push(diagnostic),
            None => groups.push((diagnostic.path.as_path(), vec![diagnostic])),
        }
    }
    groups
}

/// `Fixed N error(s) in P` blocks, one per file, each followed by a blank line.
pub(crate) fn fix_lines(fixes: &[Diagnostic]) -> Vec<String> {
    let mut lines = Vec::new();
    for (path, group) in group_by_path(fixes) {
        lines.push(format!("Fixed {} error(s) in {}", group.len(), path.display()));
        for fix in group {
            lines.push(format!("\t{}: {}", fix.rule_id, fix.message));
        }
        lines.push(String::new());
    }
    lines
}
