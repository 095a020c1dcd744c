//! Report rendering and the final outcome.

use crate::LintFixError;
use crate::engine::LintEngine;
use crate::logger::TaskLogger;
use crate::options::TaskOptions;

/// Renders the engine's result and decides the outcome.
///
/// The report is emitted before the outcome is decided, so it is visible
/// even when the task fails on lint errors.
pub fn report<E: LintEngine, L: TaskLogger>(
    engine: &E,
    options: &TaskOptions,
    logger: &L,
) -> Result<(), LintFixError> {
    let result = engine.result();

    if !options.silent {
        let format = options.format();
        let formatter = engine
            .find_formatter(format)
            .ok_or_else(|| LintFixError::InvalidFormat(format.to_string()))?;
        let output = formatter.format(&result.failures, &result.fixes);
        if !output.is_empty() {
            logger.info(&output);
        }
    }

    if !options.ignore_errors && result.has_errors() {
        return Err(LintFixError::LintErrorsFound);
    }
    Ok(())
}
