mod formats;
mod init;
mod run;

pub use formats::run_formats;
pub use init::run_init;
pub use run::run_lint_task;
