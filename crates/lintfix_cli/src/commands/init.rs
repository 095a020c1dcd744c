//! Init command implementation

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use lintfix_core::RuleConfig;
use miette::{IntoDiagnostic, Result};
use tracing::info;

const STARTER_CONFIG: &str = r#"{
  "rules": {
    "no-trailing-whitespace": {
      "pattern": "[ \\t]+$",
      "replacement": "",
      "message": "Trailing whitespace"
    }
  },
  "exclude": ["node_modules/**"]
}
"#;

pub fn run_init(force: bool) -> Result<()> {
    let config_path = Path::new(RuleConfig::CONFIG_FILES[0]);

    let mut file = match create_exclusive(config_path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists && force => {
            // An existing symlink is removed, never written through.
            match std::fs::remove_file(config_path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e).into_diagnostic(),
            }
            create_exclusive(config_path).into_diagnostic()?
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(miette::miette!(
                "{} already exists. Use --force to overwrite.",
                config_path.display()
            ));
        }
        Err(e) => return Err(e).into_diagnostic(),
    };

    file.write_all(STARTER_CONFIG.as_bytes()).into_diagnostic()?;
    info!("Created {}", config_path.display());
    Ok(())
}

fn create_exclusive(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.custom_flags(libc::O_NOFOLLOW);
    }

    options.open(path)
}
