//! Applies diagnostic fixes to file content.

use tracing::{debug, warn};

use crate::diagnostic::{Diagnostic, Fix, Span};

/// Result of applying fixes to a piece of content.
#[derive(Debug)]
pub struct FixerResult {
    /// The fixed content.
    pub fixed_content: String,
    /// Diagnostics whose fix was applied, in source order.
    pub applied: Vec<Diagnostic>,
}

impl FixerResult {
    /// Whether the content was modified.
    pub fn modified(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// Applies the fixes carried by `diagnostics` to `content`.
///
/// Fixes are applied from the end of the text to the beginning so earlier
/// offsets stay valid. A fix overlapping one that was already accepted is
/// skipped; the next lint pass will report it again.
pub fn apply_fixes_to_content(content: &str, diagnostics: &[Diagnostic]) -> FixerResult {
    let mut fixable: Vec<&Diagnostic> = diagnostics
        .iter()
        .filter(|d| d.fix.as_ref().is_some_and(|fix| is_valid_span(content, fix)))
        .collect();

    if fixable.is_empty() {
        return FixerResult {
            fixed_content: content.to_string(),
            applied: Vec::new(),
        };
    }

    fixable.sort_by(|a, b| fix_of(b).span.start.cmp(&fix_of(a).span.start));
    let accepted = filter_overlapping_fixes(fixable);

    let mut result = content.to_string();
    let mut applied = Vec::with_capacity(accepted.len());

    for diag in accepted {
        let fix = fix_of(diag);
        debug!(
            "Applying fix: replace [{}..{}] with '{}'",
            fix.span.start, fix.span.end, fix.text
        );
        result.replace_range(fix.span.start..fix.span.end, &fix.text);
        applied.push(diag.clone());
    }

    applied.reverse();
    FixerResult {
        fixed_content: result,
        applied,
    }
}

/// Spans must lie within `content` and on char boundaries.
///
/// Later fixes never touch text before an earlier one's start, so checking
/// against the original content holds for every step.
fn is_valid_span(content: &str, fix: &Fix) -> bool {
    let Span { start, end } = fix.span;
    let valid = start <= end
        && end <= content.len()
        && content.is_char_boundary(start)
        && content.is_char_boundary(end);
    if !valid {
        warn!(
            "Invalid fix span: start={}, end={}, content_len={}",
            start,
            end,
            content.len()
        );
    }
    valid
}

fn fix_of(diag: &Diagnostic) -> &Fix {
    diag.fix
        .as_ref()
        .unwrap_or_else(|| unreachable!("only diagnostics carrying a fix are sorted"))
}

/// Drops fixes that overlap an already accepted one.
///
/// `fixes` must be sorted by start position in descending order; the last
/// accepted fix is then the only one a candidate can overlap.
fn filter_overlapping_fixes(fixes: Vec<&Diagnostic>) -> Vec<&Diagnostic> {
    let mut result: Vec<&Diagnostic> = Vec::with_capacity(fixes.len());

    for diag in fixes {
        let span = fix_of(diag).span;
        let overlaps = result
            .last()
            .is_some_and(|last| fix_of(last).span.overlaps(&span));

        if overlaps {
            warn!("Skipping overlapping fix at [{}, {}]", span.start, span.end);
        } else {
            result.push(diag);
        }
    }

    result
}
