//! Compiler project loading.
//!
//! A project file lists the member sources of a compilation unit:
//!
//! ```jsonc
//! {
//!   "files": ["src/main.ts"],
//!   "include": ["src/**/*.ts"],
//!   "exclude": ["**/*.test.ts"]
//! }
//! ```
//!
//! Paths and globs are relative to the project file's directory. When
//! neither `files` nor `include` is given, `include` defaults to `**/*`.
//!
//! Glob matches are limited to source files: their extension must be in
//! `extensions` (defaults to the JavaScript/TypeScript family; an empty
//! list accepts any extension). Hidden entries, `node_modules` and lint
//! configuration files are never matched, and a matched file that is not
//! UTF-8 text is skipped. Files listed in `files` are always members.
//!
//! The text of each member is read once at load time and retained, so
//! linting sees exactly the sources the project was built from.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use jsonc_parser::ParseOptions;
use serde::Deserialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::LintFixError;
use crate::config::RuleConfig;

/// Keys other than these (compiler options and the like) are ignored.
#[derive(Debug, Default, Deserialize)]
struct ProjectFile {
    #[serde(default)]
    files: Option<Vec<String>>,
    #[serde(default)]
    include: Option<Vec<String>>,
    #[serde(default)]
    exclude: Option<Vec<String>>,
    #[serde(default)]
    extensions: Option<Vec<String>>,
}

/// Extensions of files picked up by include globs unless overridden.
const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

fn default_exclude() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

/// Member files split by how they were selected.
#[derive(Debug, Default)]
struct Members {
    listed: Vec<PathBuf>,
    matched: Vec<PathBuf>,
}

/// A loaded project: ordered member files and their retained text.
#[derive(Debug, Clone)]
pub struct Project {
    path: PathBuf,
    file_names: Vec<PathBuf>,
    sources: HashMap<PathBuf, String>,
}

impl Project {
    /// Loads the project described by the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LintFixError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|_| LintFixError::UnreadableFile(path.to_path_buf()))?;

        let value = jsonc_parser::parse_to_serde_value(&content, &ParseOptions::default())
            .map_err(|e| {
                LintFixError::config(format!("Invalid project {}: {}", path.display(), e))
            })?
            .unwrap_or(serde_json::Value::Object(serde_json::Map::new()));
        let project_file: ProjectFile = serde_json::from_value(value).map_err(|e| {
            LintFixError::config(format!("Invalid project {}: {}", path.display(), e))
        })?;

        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let members = collect_members(&project_file, &base_dir, path)?;

        let mut file_names = Vec::with_capacity(members.listed.len() + members.matched.len());
        let mut sources = HashMap::with_capacity(file_names.capacity());
        for file in members.listed {
            let text = read_source(&file)?;
            sources.insert(normalize_path(&file), text);
            file_names.push(file);
        }
        for file in members.matched {
            match read_text(&file) {
                Ok(text) => {
                    sources.insert(normalize_path(&file), text);
                    file_names.push(file);
                }
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    warn!("Skipping non-UTF-8 file {}", file.display());
                }
                Err(_) => return Err(LintFixError::UnreadableFile(file)),
            }
        }

        info!(
            "Loaded project {} with {} files",
            path.display(),
            file_names.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            file_names,
            sources,
        })
    }

    /// The project file this project was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Member files, explicit `files` first, then include matches sorted by path.
    pub fn file_names(&self) -> &[PathBuf] {
        &self.file_names
    }

    /// The retained text of a member file.
    pub fn source_text(&self, file: &Path) -> Option<&str> {
        self.sources.get(&normalize_path(file)).map(String::as_str)
    }
}

fn collect_members(
    project_file: &ProjectFile,
    base_dir: &Path,
    project_path: &Path,
) -> Result<Members, LintFixError> {
    let mut members = Members::default();

    for file in project_file.files.iter().flatten() {
        let member = normalize_path(&base_dir.join(file));
        if !members.listed.contains(&member) {
            members.listed.push(member);
        }
    }

    let include = match (&project_file.files, &project_file.include) {
        (_, Some(include)) => include.clone(),
        (Some(_), None) => Vec::new(),
        (None, None) => vec!["**/*".to_string()],
    };
    if include.is_empty() {
        return Ok(members);
    }

    let include = build_globset(&include)?;
    let exclude = build_globset(
        &project_file
            .exclude
            .clone()
            .unwrap_or_else(default_exclude),
    )?;
    let extensions: Vec<String> = match &project_file.extensions {
        Some(extensions) => extensions.clone(),
        None => DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
    };
    let project_path = normalize_path(project_path);

    let walker = WalkDir::new(base_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()));

    for entry in walker {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_dir() || !has_extension(entry.path(), &extensions) {
            continue;
        }
        if RuleConfig::CONFIG_FILES
            .iter()
            .any(|name| entry.file_name() == OsStr::new(name))
        {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(base_dir) else {
            continue;
        };
        if include.is_match(relative) && !exclude.is_match(relative) {
            let member = normalize_path(entry.path());
            if member != project_path && !members.listed.contains(&member) {
                members.matched.push(member);
            }
        }
    }
    members.matched.sort();
    debug!(
        "Project include patterns matched {} files",
        members.matched.len()
    );

    Ok(members)
}

fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|name| name.starts_with('.'))
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, LintFixError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| LintFixError::config(format!("Invalid project glob: {}", e)))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| LintFixError::config(format!("Failed to build globset: {}", e)))
}

/// Reads a file as UTF-8 text, dropping a leading byte-order mark.
pub(crate) fn read_source(path: &Path) -> Result<String, LintFixError> {
    read_text(path).map_err(|_| LintFixError::UnreadableFile(path.to_path_buf()))
}

fn read_text(path: &Path) -> io::Result<String> {
    let text = fs::read_to_string(path)?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

/// Lexically normalizes a path: drops `.` and folds `..` into its parent.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component.as_os_str());
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
