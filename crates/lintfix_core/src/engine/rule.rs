//! Rules hosted by [`RuleEngine`](super::RuleEngine).

use std::collections::BTreeMap;
use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::diagnostic::{Fix, Span};
use crate::LintFixError;

/// A single finding reported by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFailure {
    pub span: Span,
    pub message: String,
    pub fix: Option<Fix>,
}

impl RuleFailure {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            fix: None,
        }
    }

    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }
}

/// A check run against the text of one file.
pub trait Rule: Send + Sync {
    /// Name used to enable the rule in configuration.
    fn name(&self) -> &str;

    /// Checks `content`. `options` is the rule's options object, or null.
    fn check(&self, path: &Path, content: &str, options: &serde_json::Value) -> Vec<RuleFailure>;
}

/// Rules available to an engine, by name.
#[derive(Default)]
pub struct RuleRegistry {
    rules: BTreeMap<String, Box<dyn Rule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule, replacing any rule with the same name.
    pub fn register(&mut self, rule: impl Rule + 'static) {
        self.rules.insert(rule.name().to_string(), Box::new(rule));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules.get(name).map(|rule| rule.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.rules.keys()).finish()
    }
}

#[derive(Debug, Deserialize)]
struct PatternOptions {
    pattern: String,
    #[serde(default)]
    replacement: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// A rule declared in configuration by a regular expression.
///
/// Every non-empty match is a failure. With a `replacement` (which may
/// refer to capture groups as `$1` or `$name`) the failure is fixable.
/// `^` and `$` match at line boundaries.
#[derive(Debug, Clone)]
pub struct PatternRule {
    name: String,
    regex: Regex,
    replacement: Option<String>,
    message: String,
}

impl PatternRule {
    /// Builds a pattern rule from a rule's options object.
    ///
    /// Returns `Ok(None)` if the options carry no `pattern`.
    pub fn from_options(
        name: &str,
        options: &serde_json::Value,
    ) -> Result<Option<Self>, LintFixError> {
        if options.get("pattern").is_none() {
            return Ok(None);
        }
        let parsed: PatternOptions = serde_json::from_value(options.clone())
            .map_err(|e| LintFixError::config(format!("Rule '{}': {}", name, e)))?;
        let regex = RegexBuilder::new(&parsed.pattern)
            .multi_line(true)
            .build()
            .map_err(|e| LintFixError::config(format!("Rule '{}': {}", name, e)))?;
        let message = parsed
            .message
            .unwrap_or_else(|| format!("Matches forbidden pattern /{}/", parsed.pattern));

        Ok(Some(Self {
            name: name.to_string(),
            regex,
            replacement: parsed.replacement,
            message,
        }))
    }
}

impl Rule for PatternRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, _path: &Path, content: &str, _options: &serde_json::Value) -> Vec<RuleFailure> {
        self.regex
            .captures_iter(content)
            .filter_map(|caps| {
                let matched = caps.get(0)?;
                if matched.is_empty() {
                    return None;
                }
                let span = Span::new(matched.start(), matched.end());
                let mut failure = RuleFailure::new(span, self.message.clone());
                if let Some(replacement) = &self.replacement {
                    let mut text = String::new();
                    caps.expand(replacement, &mut text);
                    if text != matched.as_str() {
                        failure = failure.with_fix(Fix::new(span, text));
                    }
                }
                Some(failure)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn pattern(options: serde_json::Value) -> PatternRule {
        PatternRule::from_options("test-rule", &options)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn reports_every_match() {
        let rule = pattern(json!({ "pattern": "var ", "message": "Use let" }));

        let failures = rule.check(Path::new("a.ts"), "var a;\nvar b;", &json!(null));

        assert_eq!(
            failures,
            vec![
                RuleFailure::new(Span::new(0, 4), "Use let"),
                RuleFailure::new(Span::new(7, 11), "Use let"),
            ]
        );
    }

    #[test]
    fn replacement_expands_captures() {
        let rule = pattern(json!({ "pattern": r"(\w+) +$", "replacement": "$1" }));

        let failures = rule.check(Path::new("a.ts"), "a  \nb", &json!(null));

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].fix, Some(Fix::new(Span::new(0, 3), "a")));
    }

    #[test]
    fn identical_replacement_is_not_a_fix() {
        let rule = pattern(json!({ "pattern": "x", "replacement": "x" }));

        let failures = rule.check(Path::new("a.ts"), "x", &json!(null));

        assert_eq!(failures.len(), 1);
        assert!(failures[0].fix.is_none());
    }

    #[test]
    fn empty_matches_are_ignored() {
        let rule = pattern(json!({ "pattern": "a*" }));

        let failures = rule.check(Path::new("a.ts"), "bab", &json!(null));

        assert_eq!(failures, vec![RuleFailure::new(Span::new(1, 2), failures[0].message.clone())]);
    }

    #[test]
    fn options_without_pattern_are_not_a_pattern_rule() {
        let rule = PatternRule::from_options("r", &json!({ "max": 3 })).unwrap();
        assert!(rule.is_none());
    }

    #[test]
    fn invalid_regex_is_a_config_error() {
        let err = PatternRule::from_options("r", &json!({ "pattern": "(" })).unwrap_err();
        assert!(matches!(err, LintFixError::Config(_)), "{:?}", err);
    }

    #[test]
    fn registry_replaces_by_name() {
        let mut registry = RuleRegistry::new();
        registry.register(pattern(json!({ "pattern": "a" })));
        registry.register(pattern(json!({ "pattern": "b" })));

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("test-rule"));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["test-rule"]);
    }
}
