//! File set resolution.
//!
//! The working set is built from two parts, in order:
//! 1. the explicit files, or the members of the compiler project when one
//!    is configured and no explicit files were given;
//! 2. every file under the root whose relative path matches an include
//!    pattern.
//!
//! Duplicates are kept.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::options::TaskOptions;
use crate::pattern::IncludeMatcher;
use crate::project::Project;
use crate::LintFixError;

/// The ordered files to lint, plus the project they came from, if any.
#[derive(Debug, Default)]
pub struct FileSet {
    pub files: Vec<PathBuf>,
    pub project: Option<Project>,
}

/// Resolves the files selected by `options` under `root`.
///
/// Relative paths are joined onto `root`; absolute paths are kept as given.
pub fn resolve_file_set(options: &TaskOptions, root: &Path) -> Result<FileSet, LintFixError> {
    let explicit = options.files();
    let includes = options.includes();

    let mut file_set = FileSet::default();

    match &options.compiler_config_path {
        Some(project_path) if explicit.is_empty() => {
            let project_path = root.join(project_path);
            if !project_path.exists() {
                return Err(LintFixError::MissingProjectFile(project_path));
            }
            let project = Project::load(&project_path)?;
            file_set.files = project.file_names().to_vec();
            file_set.project = Some(project);
        }
        _ => {
            file_set.files = explicit.iter().map(|file| root.join(file)).collect();
        }
    }

    if !includes.is_empty() {
        let matcher = IncludeMatcher::new(&includes)?;
        debug!("Include regex: {}", matcher.as_str());

        let mut matched = 0usize;
        for file in list_all_files(root)? {
            let Ok(relative) = file.strip_prefix(root) else {
                continue;
            };
            if matcher.is_match(&relative.to_string_lossy()) {
                file_set.files.push(file);
                matched += 1;
            }
        }
        debug!("{} files matched include patterns", matched);
    }

    info!("Resolved {} files to lint", file_set.files.len());
    Ok(file_set)
}

/// Lists every file below `dir`, depth first, entries sorted by name.
///
/// Symlinks are followed, so a linked directory is walked like a real one.
/// A link that loops back to an ancestor is skipped. Directories themselves
/// are never listed.
pub fn list_all_files(dir: &Path) -> Result<Vec<PathBuf>, LintFixError> {
    let mut files = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.loop_ancestor().is_some() => {
                warn!("Skipping symlink loop: {}", e);
                continue;
            }
            Err(e) => return Err(std::io::Error::from(e).into()),
        };
        if entry.file_type().is_dir() {
            continue;
        }
        files.push(entry.into_path());
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn explicit_files_keep_their_order() {
        let dir = tempdir().unwrap();
        let options = TaskOptions {
            explicit_files: Some(vec!["b.ts".to_string(), "a.ts".to_string()].into()),
            ..Default::default()
        };

        let set = resolve_file_set(&options, dir.path()).unwrap();

        assert_eq!(relative(dir.path(), &set.files), vec!["b.ts", "a.ts"]);
        assert!(set.project.is_none());
    }

    #[test]
    fn explicit_files_win_over_project() {
        let dir = tempdir().unwrap();
        let options = TaskOptions {
            compiler_config_path: Some(PathBuf::from("missing.json")),
            explicit_files: Some("a.ts".into()),
            ..Default::default()
        };

        let set = resolve_file_set(&options, dir.path()).unwrap();

        assert_eq!(relative(dir.path(), &set.files), vec!["a.ts"]);
    }

    #[test]
    fn missing_project_file_fails() {
        let dir = tempdir().unwrap();
        let options = TaskOptions {
            compiler_config_path: Some(PathBuf::from("missing.json")),
            ..Default::default()
        };

        let err = resolve_file_set(&options, dir.path()).unwrap_err();

        assert!(matches!(err, LintFixError::MissingProjectFile(_)), "{:?}", err);
    }

    #[test]
    fn include_patterns_respect_directory_and_extension() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "src/a.ts");
        touch(dir.path(), "src/b.js");
        touch(dir.path(), "other/c.ts");
        let options = TaskOptions {
            include_patterns: Some("src/**/*.ts".into()),
            ..Default::default()
        };

        let set = resolve_file_set(&options, dir.path()).unwrap();

        assert_eq!(relative(dir.path(), &set.files), vec!["src/a.ts"]);
    }

    #[test]
    fn include_matches_follow_explicit_files_without_dedup() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "src/a.ts");
        let options = TaskOptions {
            explicit_files: Some("src/a.ts".into()),
            include_patterns: Some("src".into()),
            ..Default::default()
        };

        let set = resolve_file_set(&options, dir.path()).unwrap();

        assert_eq!(
            relative(dir.path(), &set.files),
            vec!["src/a.ts", "src/a.ts"]
        );
    }

    #[test]
    fn project_members_then_include_matches() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "lib/a.ts");
        touch(dir.path(), "extra/b.ts");
        fs::write(
            dir.path().join("project.json"),
            r#"{ "include": ["lib/**/*.ts"] }"#,
        )
        .unwrap();
        let options = TaskOptions {
            compiler_config_path: Some(PathBuf::from("project.json")),
            include_patterns: Some("extra/*.ts".into()),
            ..Default::default()
        };

        let set = resolve_file_set(&options, dir.path()).unwrap();

        assert_eq!(
            relative(dir.path(), &set.files),
            vec!["lib/a.ts", "extra/b.ts"]
        );
        assert!(set.project.is_some());
    }

    #[cfg(unix)]
    #[test]
    fn list_all_files_walks_symlinked_directories() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "real/a.ts");
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("linked")).unwrap();

        let files = list_all_files(dir.path()).unwrap();

        assert_eq!(relative(dir.path(), &files), vec!["linked/a.ts", "real/a.ts"]);
    }

    #[cfg(unix)]
    #[test]
    fn list_all_files_skips_symlink_loops() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "sub/a.ts");
        std::os::unix::fs::symlink(dir.path(), dir.path().join("sub/back")).unwrap();

        let files = list_all_files(dir.path()).unwrap();

        assert_eq!(relative(dir.path(), &files), vec!["sub/a.ts"]);
    }

    #[test]
    fn list_all_files_is_depth_first_and_sorted() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "b.ts");
        touch(dir.path(), "a/z.ts");
        touch(dir.path(), "a/y/x.ts");
        touch(dir.path(), "c.ts");

        let files = list_all_files(dir.path()).unwrap();

        assert_eq!(
            relative(dir.path(), &files),
            vec!["a/y/x.ts", "a/z.ts", "b.ts", "c.ts"]
        );
    }
}
