//! Include-pattern matching for root-relative paths.
//!
//! Patterns are split on `/` or `\` into segments:
//! - a segment starting with `**` matches any run of whole segments,
//!   including none;
//! - `*` inside a segment matches any characters except separators;
//! - everything else is literal.
//!
//! All patterns compile into one case-sensitive regex anchored at the
//! start of the candidate and closed by a separator or end of string, so
//! a pattern naming a directory also selects everything below it.

use regex::Regex;

use crate::LintFixError;

const SEPARATOR: &str = r"[/\\]";
const SEGMENT_CHAR: &str = r"[^/\\]";

/// Compiled set of include patterns.
#[derive(Debug, Clone)]
pub struct IncludeMatcher {
    regex: Regex,
}

impl IncludeMatcher {
    /// Compiles `patterns` into a single matcher.
    pub fn new(patterns: &[String]) -> Result<Self, LintFixError> {
        let source = build_regex_source(patterns);
        let regex = Regex::new(&source)
            .map_err(|e| LintFixError::pattern(format!("{:?}: {}", patterns, e)))?;
        Ok(Self { regex })
    }

    /// Checks a root-relative path.
    pub fn is_match(&self, relative: &str) -> bool {
        self.regex.is_match(relative)
    }

    /// The compiled regex source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

fn build_regex_source(patterns: &[String]) -> String {
    let alternatives: Vec<String> = patterns
        .iter()
        .map(|pattern| format!("({})", translate_pattern(pattern)))
        .collect();
    format!("^(?:{})(?:$|{})", alternatives.join("|"), SEPARATOR)
}

fn translate_pattern(pattern: &str) -> String {
    let segments: Vec<&str> = pattern.split(['/', '\\']).collect();
    let mut out = String::new();

    for (index, segment) in segments.iter().enumerate() {
        let last = index + 1 == segments.len();

        if let Some(rest) = segment.strip_prefix("**") {
            if rest.is_empty() {
                if last {
                    out.push_str("(?:.+?)?");
                } else {
                    out.push_str(&format!("(?:.+?{})?", SEPARATOR));
                }
                continue;
            }
            out.push_str("(?:.+?)?");
            out.push_str(&translate_segment(rest));
        } else {
            out.push_str(&translate_segment(segment));
        }

        if !last {
            out.push_str(SEPARATOR);
        }
    }

    out
}

fn translate_segment(segment: &str) -> String {
    let mut out = String::new();
    let mut literal = String::new();

    for ch in segment.chars() {
        if ch == '*' {
            out.push_str(&regex::escape(&literal));
            literal.clear();
            out.push_str(SEGMENT_CHAR);
            out.push('*');
        } else {
            literal.push(ch);
        }
    }
    out.push_str(&regex::escape(&literal));
    out
}
