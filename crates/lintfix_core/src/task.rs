//! Task entry points.

use std::path::Path;

use tracing::info;

use crate::LintFixError;
use crate::engine::{LintEngine, LinterOptions};
use crate::executor::execute;
use crate::file_set::resolve_file_set;
use crate::logger::TaskLogger;
use crate::options::TaskOptions;
use crate::reporter::report;

/// Runs one lint-fix task to completion.
///
/// `Ok(())` is the success signal. Any error is fatal and stops the run
/// where it occurred.
pub fn run_task<E, L>(
    options: &TaskOptions,
    root: &Path,
    engine: &mut E,
    logger: &L,
) -> Result<(), LintFixError>
where
    E: LintEngine,
    L: TaskLogger,
{
    let file_set = resolve_file_set(options, root)?;

    engine.prepare(&LinterOptions {
        fix: true,
        format: options.format().to_string(),
    });

    let loads = execute(
        engine,
        options,
        root,
        &file_set.files,
        file_set.project.as_ref(),
    )?;
    info!(
        "Linted {} files with {} configuration loads",
        file_set.files.len(),
        loads
    );

    report(&*engine, options, logger)
}

/// Runs [`run_task`] as a single blocking unit of work on the tokio runtime.
#[cfg(feature = "async")]
pub async fn spawn_task<E, L>(
    options: TaskOptions,
    root: std::path::PathBuf,
    mut engine: E,
    logger: L,
) -> Result<(), LintFixError>
where
    E: LintEngine + Send + 'static,
    L: TaskLogger + Send + 'static,
{
    tokio::task::spawn_blocking(move || run_task(&options, &root, &mut engine, &logger))
        .await
        .map_err(|e| LintFixError::Internal(format!("Lint task failed: {}", e)))?
}
