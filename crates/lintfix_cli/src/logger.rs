use lintfix_core::TaskLogger;

/// Prints reports to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutLogger;

impl TaskLogger for StdoutLogger {
    fn info(&self, message: &str) {
        if message.ends_with('\n') {
            print!("{}", message);
        } else {
            println!("{}", message);
        }
    }
}
