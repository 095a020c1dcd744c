//! Per-file execution loop.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::engine::{ConfigSource, LintEngine};
use crate::options::TaskOptions;
use crate::project::{Project, read_source};
use crate::LintFixError;

/// Resolves a configuration for `file` from the task options.
///
/// Precedence: explicit configuration file, then the rules path (relative
/// to `root`), then the configuration nearest to the file.
pub fn load_configuration<E: LintEngine>(
    engine: &E,
    options: &TaskOptions,
    root: &Path,
    file: Option<&Path>,
) -> Result<E::Config, LintFixError> {
    if let Some(path) = &options.lint_config_path {
        return engine.load_config(ConfigSource::File { path, root });
    }
    if let Some(rules_path) = &options.lint_rules_path {
        return engine.load_config(ConfigSource::SearchPath(&root.join(rules_path)));
    }
    match file {
        Some(file) => engine.load_config(ConfigSource::NearestTo(file)),
        None => Err(LintFixError::MissingConfiguration),
    }
}

/// Configuration reused while consecutive files share a directory.
///
/// Reloads whenever the directory differs from the previous file's, so an
/// unsorted file list can load the same directory's configuration more
/// than once.
pub struct ConfigCache<C> {
    directory: Option<PathBuf>,
    config: Option<C>,
    loads: usize,
}

impl<C> Default for ConfigCache<C> {
    fn default() -> Self {
        Self {
            directory: None,
            config: None,
            loads: 0,
        }
    }
}

impl<C> ConfigCache<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the configuration for `file`, calling `load` if its directory changed.
    pub fn get_or_load<F>(&mut self, file: &Path, load: F) -> Result<&C, LintFixError>
    where
        F: FnOnce() -> Result<C, LintFixError>,
    {
        let directory = file.parent().map(Path::to_path_buf).unwrap_or_default();
        let config = match self.config.take() {
            Some(config) if self.directory.as_ref() == Some(&directory) => config,
            _ => {
                debug!("Loading configuration for {}", directory.display());
                self.loads += 1;
                load()?
            }
        };
        self.directory = Some(directory);
        Ok(self.config.insert(config))
    }

    /// Number of times a configuration was loaded.
    pub fn loads(&self) -> usize {
        self.loads
    }
}

/// Returns the text to lint for `file`.
///
/// With a project the retained source is used; otherwise the file is read
/// from disk without its byte-order mark. `None` means there is nothing
/// to lint.
pub fn file_content(
    file: &Path,
    project: Option<&Project>,
) -> Result<Option<String>, LintFixError> {
    let content = match project {
        Some(project) => project
            .source_text(file)
            .map(str::to_string)
            .ok_or_else(|| LintFixError::FileNotInProject {
                file: file.to_path_buf(),
                project: project.path().to_path_buf(),
            })?,
        None => read_source(file)?,
    };
    Ok(if content.is_empty() { None } else { Some(content) })
}

/// Lints every file in order, returning the number of configuration loads.
pub fn execute<E: LintEngine>(
    engine: &mut E,
    options: &TaskOptions,
    root: &Path,
    files: &[PathBuf],
    project: Option<&Project>,
) -> Result<usize, LintFixError> {
    let mut cache = ConfigCache::new();

    for file in files {
        let config = cache.get_or_load(file, || {
            load_configuration(&*engine, options, root, Some(file))
        })?;

        let Some(content) = file_content(file, project)? else {
            debug!("Skipping empty file {}", file.display());
            continue;
        };

        debug!("Linting {}", file.display());
        engine.lint(file, &content, config)?;
    }

    Ok(cache.loads())
}
