//! Run command implementation

use lintfix_core::{OneOrMany, RuleEngine, TaskOptions, spawn_task};
use miette::{IntoDiagnostic, Result};
use tracing::debug;

use crate::cli::RunArgs;
use crate::logger::StdoutLogger;

/// Runs the lint task. Returns `Ok(true)` when lint errors were found.
pub fn run_lint_task(args: RunArgs) -> Result<bool> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().into_diagnostic()?,
    };
    let options = build_options(args)?;
    debug!("Task options: {:?}", options);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .into_diagnostic()?;
    let outcome = rt.block_on(spawn_task(options, root, RuleEngine::new(), StdoutLogger));

    match outcome {
        Ok(()) => Ok(false),
        Err(e) if e.is_lint_failure() => {
            debug!("{}", e);
            Ok(true)
        }
        Err(e) => Err(e).into_diagnostic(),
    }
}

fn build_options(args: RunArgs) -> Result<TaskOptions> {
    let mut options = match &args.options {
        Some(path) => TaskOptions::from_file(path).into_diagnostic()?,
        None => TaskOptions::default(),
    };

    if !args.files.is_empty() {
        options.explicit_files = Some(OneOrMany::Many(args.files));
    }
    if !args.include.is_empty() {
        options.include_patterns = Some(OneOrMany::Many(args.include));
    }
    if args.config.is_some() {
        options.lint_config_path = args.config;
    }
    if args.rules_dir.is_some() {
        options.lint_rules_path = args.rules_dir;
    }
    if args.project.is_some() {
        options.compiler_config_path = args.project;
    }
    if args.format.is_some() {
        options.output_format = args.format;
    }
    options.silent |= args.silent;
    options.ignore_errors |= args.ignore_errors;

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn flags_override_options_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("task.json");
        std::fs::write(
            &path,
            r#"{ "explicitFiles": "a.ts", "outputFormat": "json", "silent": true }"#,
        )
        .unwrap();

        let options = build_options(RunArgs {
            files: vec!["b.ts".to_string()],
            format: Some("stylish".to_string()),
            options: Some(path),
            project: Some(PathBuf::from("project.json")),
            ..RunArgs::default()
        })
        .unwrap();

        assert_eq!(options.files(), vec!["b.ts".to_string()]);
        assert_eq!(options.format(), "stylish");
        assert_eq!(options.compiler_config_path, Some(PathBuf::from("project.json")));
        assert!(options.silent);
    }

    #[test]
    fn empty_args_leave_defaults() {
        let options = build_options(RunArgs::default()).unwrap();
        assert_eq!(options, TaskOptions::default());
    }
}
