//! # lintfix_core
//!
//! Lint-and-autofix task execution.
//!
//! This crate provides:
//! - Task options and file set resolution (explicit files, compiler
//!   project members, include patterns)
//! - The per-directory configuration cache and execution loop
//! - The `LintEngine` capability trait and a rule-hosting engine
//! - Report formatters
//!
//! ## Example
//!
//! ```rust,ignore
//! use lintfix_core::{RuleEngine, TaskOptions, TracingLogger, run_task};
//!
//! let options = TaskOptions::from_file("lintfix-task.json")?;
//! let mut engine = RuleEngine::new();
//! run_task(&options, Path::new("."), &mut engine, &TracingLogger)?;
//! ```

mod config;
mod diagnostic;
pub mod engine;
mod error;
pub mod executor;
pub mod file_set;
mod fixer;
pub mod formatters;
mod logger;
mod options;
pub mod pattern;
mod project;
mod reporter;
mod result;
mod task;

pub use config::{RuleConfig, RuleOption};
pub use diagnostic::{Diagnostic, Fix, Location, Position, Severity, Span};
pub use engine::{
    ConfigSource, LintEngine, LinterOptions, PatternRule, Rule, RuleEngine, RuleFailure,
    RuleRegistry,
};
pub use error::LintFixError;
pub use file_set::{FileSet, resolve_file_set};
pub use fixer::{FixerResult, apply_fixes_to_content};
pub use formatters::{FORMATTER_NAMES, Formatter, find_formatter};
pub use logger::{TaskLogger, TracingLogger};
pub use options::{DEFAULT_FORMAT, OneOrMany, TaskOptions};
pub use project::Project;
pub use reporter::report;
pub use result::LintResult;
pub use task::run_task;

#[cfg(feature = "async")]
pub use task::spawn_task;
