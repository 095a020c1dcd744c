//! Formats command implementation

use lintfix_core::{DEFAULT_FORMAT, FORMATTER_NAMES};
use miette::Result;

pub fn run_formats() -> Result<()> {
    for name in FORMATTER_NAMES {
        if *name == DEFAULT_FORMAT {
            println!("{} (default)", name);
        } else {
            println!("{}", name);
        }
    }
    Ok(())
}
