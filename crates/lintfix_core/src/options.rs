//! Task options.

use std::fs;
use std::path::{Path, PathBuf};

use jsonc_parser::ParseOptions;
use serde::{Deserialize, Serialize};

use crate::LintFixError;

/// Formatter used when none is requested.
pub const DEFAULT_FORMAT: &str = "prose";

/// A value written either as a single string or as a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// Normalizes to a list; a single value becomes a one-element list.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            OneOrMany::One(value) => vec![value.clone()],
            OneOrMany::Many(values) => values.clone(),
        }
    }
}

impl From<Vec<String>> for OneOrMany {
    fn from(values: Vec<String>) -> Self {
        OneOrMany::Many(values)
    }
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        OneOrMany::One(value.to_string())
    }
}

/// Options for one lint-fix task run.
///
/// Created once per invocation and never mutated by the task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TaskOptions {
    /// Explicit lint configuration file, relative to the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lint_config_path: Option<PathBuf>,

    /// Directory (or file) searched for a lint configuration, relative to the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lint_rules_path: Option<PathBuf>,

    /// Compiler project file whose members are linted when no files are given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiler_config_path: Option<PathBuf>,

    /// Files to lint, in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit_files: Option<OneOrMany>,

    /// Glob-like patterns selecting files under the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_patterns: Option<OneOrMany>,

    /// Formatter name for the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,

    /// Suppress the report.
    #[serde(default)]
    pub silent: bool,

    /// Never fail because of lint errors.
    #[serde(default)]
    pub ignore_errors: bool,
}

impl TaskOptions {
    /// Loads options from a JSON or JSONC file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LintFixError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LintFixError::config(format!(
                "Failed to read options {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// Parses options from a JSON or JSONC string.
    pub fn from_json(json: &str) -> Result<Self, LintFixError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| LintFixError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or(serde_json::Value::Object(serde_json::Map::new()));

        serde_json::from_value(value)
            .map_err(|e| LintFixError::config(format!("Invalid options: {}", e)))
    }

    /// Explicit files as a list (absent means empty).
    pub fn files(&self) -> Vec<String> {
        self.explicit_files
            .as_ref()
            .map(OneOrMany::to_vec)
            .unwrap_or_default()
    }

    /// Include patterns as a list (absent means empty).
    pub fn includes(&self) -> Vec<String> {
        self.include_patterns
            .as_ref()
            .map(OneOrMany::to_vec)
            .unwrap_or_default()
    }

    /// Requested formatter name, defaulting to `prose`.
    pub fn format(&self) -> &str {
        self.output_format
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FORMAT)
    }
}
