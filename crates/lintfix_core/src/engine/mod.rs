//! The lint engine capability.
//!
//! The task drives an engine through [`LintEngine`] only, so any engine
//! that can resolve a configuration, lint one file and hand back its
//! accumulated result can be plugged in.

mod rule;
mod rule_engine;

use std::path::{Path, PathBuf};

pub use rule::{PatternRule, Rule, RuleFailure, RuleRegistry};
pub use rule_engine::{ResolvedConfig, RuleEngine};

use crate::formatters::Formatter;
use crate::result::LintResult;
use crate::LintFixError;

/// Linter construction options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinterOptions {
    /// Apply fixes in place.
    pub fix: bool,
    /// Requested formatter name.
    pub format: String,
}

impl Default for LinterOptions {
    fn default() -> Self {
        Self {
            fix: true,
            format: crate::options::DEFAULT_FORMAT.to_string(),
        }
    }
}

/// Where a lint configuration comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource<'a> {
    /// An explicit configuration file, relative to `root`.
    File { path: &'a Path, root: &'a Path },
    /// A directory (or file) to search for a configuration.
    SearchPath(&'a Path),
    /// Nearest configuration above a linted file.
    NearestTo(&'a Path),
}

impl ConfigSource<'_> {
    /// The path the source points at, resolved against its root.
    pub fn resolved_path(&self) -> PathBuf {
        match self {
            ConfigSource::File { path, root } => root.join(path),
            ConfigSource::SearchPath(path) | ConfigSource::NearestTo(path) => path.to_path_buf(),
        }
    }
}

/// A lint-and-autofix engine.
pub trait LintEngine {
    /// Opaque configuration handle.
    type Config;

    /// Called once before any file is linted.
    fn prepare(&mut self, options: &LinterOptions);

    /// Resolves a configuration.
    fn load_config(&self, source: ConfigSource<'_>) -> Result<Self::Config, LintFixError>;

    /// Lints one file, applying fixes when enabled, and accumulates the result.
    fn lint(&mut self, path: &Path, content: &str, config: &Self::Config)
    -> Result<(), LintFixError>;

    /// Everything accumulated so far.
    fn result(&self) -> LintResult;

    /// Looks up a formatter by name.
    fn find_formatter(&self, name: &str) -> Option<Box<dyn Formatter>>;
}
