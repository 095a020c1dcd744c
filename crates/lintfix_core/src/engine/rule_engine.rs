//! A lint engine that runs registered and configuration-declared rules.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::rule::{PatternRule, Rule, RuleRegistry};
use super::{ConfigSource, LintEngine, LinterOptions};
use crate::config::RuleConfig;
use crate::diagnostic::{Diagnostic, Location, Severity};
use crate::fixer::apply_fixes_to_content;
use crate::formatters::{self, Formatter};
use crate::result::LintResult;
use crate::LintFixError;

/// A loaded configuration with its rules resolved.
#[derive(Debug)]
pub struct ResolvedConfig {
    config: RuleConfig,
    active: Vec<ActiveRule>,
}

impl ResolvedConfig {
    /// Names of the rules that will run.
    pub fn rule_names(&self) -> Vec<&str> {
        self.active.iter().map(|rule| rule.name.as_str()).collect()
    }
}

#[derive(Debug)]
struct ActiveRule {
    name: String,
    severity: Severity,
    options: serde_json::Value,
    pattern: Option<PatternRule>,
}

/// Engine hosting a [`RuleRegistry`] plus pattern rules from configuration.
#[derive(Debug, Default)]
pub struct RuleEngine {
    registry: RuleRegistry,
    options: LinterOptions,
    failures: Vec<Diagnostic>,
    fixes: Vec<Diagnostic>,
}

impl RuleEngine {
    /// Creates an engine with no registered rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with the given rules.
    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self {
            registry,
            ..Self::default()
        }
    }

    fn resolve(&self, config: RuleConfig) -> Result<ResolvedConfig, LintFixError> {
        let mut active = Vec::new();
        for (name, option) in config.enabled_rules() {
            let options = option.options();
            let pattern = PatternRule::from_options(name, &options)?;
            if pattern.is_none() && !self.registry.contains(name) {
                warn!("Unknown rule '{}' ignored", name);
                continue;
            }
            active.push(ActiveRule {
                name: name.to_string(),
                severity: option.severity(),
                options,
                pattern,
            });
        }
        let resolved = ResolvedConfig { config, active };
        debug!("Active rules: {:?}", resolved.rule_names());
        Ok(resolved)
    }

    fn check(&self, path: &Path, content: &str, resolved: &ResolvedConfig) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for active in &resolved.active {
            let rule: &dyn Rule = match (&active.pattern, self.registry.get(&active.name)) {
                (Some(pattern), _) => pattern,
                (None, Some(rule)) => rule,
                (None, None) => continue,
            };
            for failure in rule.check(path, content, &active.options) {
                let mut diagnostic =
                    Diagnostic::new(path, &active.name, failure.message, failure.span)
                        .with_severity(active.severity)
                        .with_location(Location::from_span(content, failure.span));
                if let Some(fix) = failure.fix {
                    diagnostic = diagnostic.with_fix(fix);
                }
                diagnostics.push(diagnostic);
            }
        }
        diagnostics.sort_by_key(|d| d.span);
        diagnostics
    }
}

impl LintEngine for RuleEngine {
    type Config = ResolvedConfig;

    fn prepare(&mut self, options: &LinterOptions) {
        self.options = options.clone();
    }

    fn load_config(&self, source: ConfigSource<'_>) -> Result<Self::Config, LintFixError> {
        let config = match source {
            ConfigSource::File { .. } => {
                let path = source.resolved_path();
                if !path.is_file() {
                    return Err(LintFixError::config(format!(
                        "Could not find config file '{}'.",
                        path.display()
                    )));
                }
                RuleConfig::from_file(&path)?
            }
            ConfigSource::SearchPath(dir) => {
                let path = RuleConfig::locate(dir).ok_or(LintFixError::MissingConfiguration)?;
                RuleConfig::from_file(&path)?
            }
            ConfigSource::NearestTo(file) => match RuleConfig::discover(file) {
                Some(path) => RuleConfig::from_file(&path)?,
                None => {
                    debug!("No configuration found for {}, using defaults", file.display());
                    RuleConfig::default()
                }
            },
        };
        self.resolve(config)
    }

    fn lint(
        &mut self,
        path: &Path,
        content: &str,
        config: &Self::Config,
    ) -> Result<(), LintFixError> {
        if config.config.is_excluded(path) {
            debug!("Excluded by configuration: {}", path.display());
            return Ok(());
        }

        let mut failures = self.check(path, content, config);

        if self.options.fix && failures.iter().any(|d| d.fix.is_some()) {
            let fixed = apply_fixes_to_content(content, &failures);
            if fixed.modified() {
                fs::write(path, &fixed.fixed_content)?;
                debug!(
                    "Applied {} fixes to {}",
                    fixed.applied.len(),
                    path.display()
                );
                self.fixes.extend(fixed.applied);
                failures = self.check(path, &fixed.fixed_content, config);
            }
        }

        self.failures.extend(failures);
        Ok(())
    }

    fn result(&self) -> LintResult {
        LintResult::new(self.failures.clone(), self.fixes.clone())
    }

    fn find_formatter(&self, name: &str) -> Option<Box<dyn Formatter>> {
        formatters::find_formatter(name)
    }
}
