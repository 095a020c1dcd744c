//! Task error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a lint-fix task.
///
/// Every variant is fatal: the task stops at the first one and reports it
/// to the caller as its failure signal.
#[derive(Debug, Error)]
pub enum LintFixError {
    /// The compiler project file does not exist.
    #[error("Could not find project file '{}'.", .0.display())]
    MissingProjectFile(PathBuf),

    /// No lint configuration could be determined.
    #[error("Task must specify a lint configuration.")]
    MissingConfiguration,

    /// A project is active but has no record of the file.
    #[error("File '{}' is not part of the project '{}'.", .file.display(), .project.display())]
    FileNotInProject { file: PathBuf, project: PathBuf },

    /// The file could not be read from disk.
    #[error("Could not read file '{}'.", .0.display())]
    UnreadableFile(PathBuf),

    /// No formatter is registered under the requested name.
    #[error("Invalid lint format \"{0}\".")]
    InvalidFormat(String),

    /// The accumulated result contains errors and they are not ignored.
    #[error("Lint errors were found.")]
    LintErrorsFound,

    /// Malformed options, configuration or project file.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An include pattern could not be compiled.
    #[error("Invalid include pattern: {0}")]
    Pattern(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LintFixError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a pattern error.
    pub fn pattern(message: impl Into<String>) -> Self {
        Self::Pattern(message.into())
    }

    /// Returns true when the failure only reflects lint findings.
    pub fn is_lint_failure(&self) -> bool {
        matches!(self, Self::LintErrorsFound)
    }
}
