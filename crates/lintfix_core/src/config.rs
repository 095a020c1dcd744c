//! Lint configuration.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use globset::{Glob, GlobSet, GlobSetBuilder};
use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::diagnostic::Severity;
use crate::options::OneOrMany;
use crate::LintFixError;

const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Result<Validator, String>> = OnceLock::new();

/// Lint configuration loaded from `lintfix.json` / `lintfix.jsonc`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Schema reference, ignored.
    #[serde(rename = "$schema", default, skip_serializing)]
    pub schema: Option<String>,

    /// Configuration files this one inherits from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<OneOrMany>,

    /// Rule settings by name.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleOption>,

    /// Globs of files to skip.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Directory containing the configuration file.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,

    #[serde(skip)]
    exclude_set: Option<GlobSet>,
}

/// Setting for a single rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RuleOption {
    /// Rule is enabled/disabled (boolean).
    Enabled(bool),
    /// Rule is enabled with severity string ("error", "warning", "off").
    Severity(String),
    /// Rule is enabled with an options object.
    Options(serde_json::Value),
}

impl RuleOption {
    /// Returns whether the rule is enabled.
    pub fn is_enabled(&self) -> bool {
        match self {
            RuleOption::Enabled(enabled) => *enabled,
            RuleOption::Severity(s) => s != "off",
            RuleOption::Options(v) => v.get("severity").and_then(|s| s.as_str()) != Some("off"),
        }
    }

    /// The configured severity; rules default to error.
    pub fn severity(&self) -> Severity {
        let name = match self {
            RuleOption::Enabled(_) => None,
            RuleOption::Severity(s) => Some(s.as_str()),
            RuleOption::Options(v) => v.get("severity").and_then(|s| s.as_str()),
        };
        name.and_then(Severity::parse).unwrap_or_default()
    }

    /// Gets the rule options as JSON value.
    pub fn options(&self) -> serde_json::Value {
        match self {
            RuleOption::Enabled(_) | RuleOption::Severity(_) => serde_json::Value::Null,
            RuleOption::Options(v) => v.clone(),
        }
    }
}

impl RuleConfig {
    /// Configuration file names, in lookup order.
    pub const CONFIG_FILES: &'static [&'static str] = &["lintfix.json", "lintfix.jsonc"];

    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration file, following `extends`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LintFixError> {
        let mut visiting = HashSet::new();
        Self::load_chain(path.as_ref(), &mut visiting)
    }

    fn load_chain(path: &Path, visiting: &mut HashSet<PathBuf>) -> Result<Self, LintFixError> {
        let key = crate::project::normalize_path(path);
        if !visiting.insert(key.clone()) {
            return Err(LintFixError::config(format!(
                "Circular extends through {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            LintFixError::config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        let mut config = Self::from_json(&content).map_err(|e| match e {
            LintFixError::Config(message) => {
                LintFixError::config(format!("{}: {}", path.display(), message))
            }
            other => other,
        })?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        if let Some(extends) = config.extends.take() {
            let mut merged = RuleConfig::new();
            for parent in extends.to_vec() {
                let parent_config = Self::load_chain(&base_dir.join(parent), visiting)?;
                merged.merge(parent_config);
            }
            let own_rules = std::mem::take(&mut config.rules);
            let own_exclude = std::mem::take(&mut config.exclude);
            merged.rules.extend(own_rules);
            merged.exclude.extend(own_exclude);
            config.rules = merged.rules;
            config.exclude = merged.exclude;
        }

        visiting.remove(&key);
        config.base_dir = Some(base_dir);
        config.exclude_set = Some(build_exclude_set(&config.exclude)?);
        debug!("Loaded lint configuration {}", path.display());
        Ok(config)
    }

    /// Parses configuration from a JSON or JSONC string with schema validation.
    pub fn from_json(json: &str) -> Result<Self, LintFixError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| LintFixError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or(serde_json::Value::Object(serde_json::Map::new()));

        let schema = CONFIG_SCHEMA
            .get_or_init(|| {
                let schema_json: serde_json::Value = serde_json::from_str(SCHEMA_JSON)
                    .map_err(|e| format!("Invalid embedded config schema: {}", e))?;
                Validator::new(&schema_json).map_err(|e| format!("Invalid config schema: {}", e))
            })
            .as_ref()
            .map_err(|e| LintFixError::Internal(e.clone()))?;

        if let Err(e) = schema.validate(&value) {
            return Err(LintFixError::config(format!(
                "Config validation failed: {} at {}",
                e,
                e.instance_path()
            )));
        }

        let mut config: Self = serde_json::from_value(value)
            .map_err(|e| LintFixError::config(format!("Invalid config: {}", e)))?;
        config.exclude_set = Some(build_exclude_set(&config.exclude)?);
        Ok(config)
    }

    fn merge(&mut self, other: RuleConfig) {
        self.rules.extend(other.rules);
        self.exclude.extend(other.exclude);
    }

    /// Returns enabled rules in name order.
    pub fn enabled_rules(&self) -> Vec<(&str, &RuleOption)> {
        self.rules
            .iter()
            .filter(|(_, option)| option.is_enabled())
            .map(|(name, option)| (name.as_str(), option))
            .collect()
    }

    /// Returns true if `path` matches an `exclude` glob.
    ///
    /// Paths below the configuration's directory are matched relative to it.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let Some(set) = &self.exclude_set else {
            return false;
        };
        if set.is_empty() {
            return false;
        }
        let relative = self
            .base_dir
            .as_deref()
            .and_then(|base| path.strip_prefix(base).ok())
            .unwrap_or(path);
        set.is_match(relative)
    }

    /// Finds a configuration file in `dir`, or accepts `dir` itself if it is a file.
    pub fn locate(dir: &Path) -> Option<PathBuf> {
        if dir.is_file() {
            return Some(dir.to_path_buf());
        }
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Searches from `start` upwards, then the home directory.
    pub fn discover(start: &Path) -> Option<PathBuf> {
        let first = if start.is_file() {
            start.parent()
        } else {
            Some(start)
        };

        if let Some(found) = first
            .into_iter()
            .flat_map(Path::ancestors)
            .find_map(|dir| {
                Self::CONFIG_FILES
                    .iter()
                    .map(|name| dir.join(name))
                    .find(|candidate| candidate.is_file())
            })
        {
            return Some(found);
        }

        let home = dirs::home_dir()?;
        Self::CONFIG_FILES
            .iter()
            .map(|name| home.join(name))
            .find(|candidate| candidate.is_file())
    }
}

fn build_exclude_set(patterns: &[String]) -> Result<GlobSet, LintFixError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|e| LintFixError::config(format!("Invalid exclude pattern: {}", e)))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| LintFixError::config(format!("Failed to build globset: {}", e)))
}
