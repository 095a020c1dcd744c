//! Integration tests for CLI behavior

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn lintfix_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_lintfix"))
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

const NO_VAR_CONFIG: &str = r#"{
    "rules": {
        "no-var": { "pattern": "\\bvar\\b", "replacement": "let", "message": "Use let" },
        "no-debugger": { "pattern": "debugger;", "message": "Remove debugger" }
    }
}"#;

mod help_command {
    use super::*;

    #[test]
    fn shows_help_with_flag() {
        lintfix_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"));
    }

    #[test]
    fn shows_version_with_flag() {
        lintfix_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

mod run_command {
    use super::*;

    #[test]
    fn fixes_files_and_reports_fixes() {
        let dir = tempdir().unwrap();
        write(dir.path(), "lintfix.json", NO_VAR_CONFIG);
        write(dir.path(), "src/a.ts", "var a = 1;\n");

        lintfix_cmd()
            .arg("run")
            .arg("src/a.ts")
            .arg("--root")
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Fixed 1 error(s) in"));

        assert_eq!(
            fs::read_to_string(dir.path().join("src/a.ts")).unwrap(),
            "let a = 1;\n"
        );
    }

    #[test]
    fn remaining_errors_exit_with_one() {
        let dir = tempdir().unwrap();
        write(dir.path(), "lintfix.json", NO_VAR_CONFIG);
        write(dir.path(), "a.ts", "debugger;\n");

        lintfix_cmd()
            .args(["run", "a.ts", "--root"])
            .arg(dir.path())
            .assert()
            .code(1)
            .stdout(predicate::str::contains("ERROR: "))
            .stdout(predicate::str::contains("[1, 1]: Remove debugger"));
    }

    #[test]
    fn ignore_errors_exits_with_zero() {
        let dir = tempdir().unwrap();
        write(dir.path(), "lintfix.json", NO_VAR_CONFIG);
        write(dir.path(), "a.ts", "debugger;\n");

        lintfix_cmd()
            .args(["run", "a.ts", "--ignore-errors", "--root"])
            .arg(dir.path())
            .assert()
            .success();
    }

    #[test]
    fn silent_prints_no_report() {
        let dir = tempdir().unwrap();
        write(dir.path(), "lintfix.json", NO_VAR_CONFIG);
        write(dir.path(), "a.ts", "debugger;\n");

        lintfix_cmd()
            .args(["run", "a.ts", "--silent", "--root"])
            .arg(dir.path())
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn include_patterns_select_files() {
        let dir = tempdir().unwrap();
        write(dir.path(), "lintfix.json", NO_VAR_CONFIG);
        write(dir.path(), "src/a.ts", "var a;\n");
        write(dir.path(), "other/b.ts", "var b;\n");

        lintfix_cmd()
            .args(["run", "--include", "src/**/*.ts", "--root"])
            .arg(dir.path())
            .assert()
            .success();

        assert_eq!(fs::read_to_string(dir.path().join("src/a.ts")).unwrap(), "let a;\n");
        assert_eq!(fs::read_to_string(dir.path().join("other/b.ts")).unwrap(), "var b;\n");
    }

    #[test]
    fn json_format_prints_failures() {
        let dir = tempdir().unwrap();
        write(dir.path(), "lintfix.json", NO_VAR_CONFIG);
        write(dir.path(), "a.ts", "debugger;\n");

        let output = lintfix_cmd()
            .args(["run", "a.ts", "-f", "json", "--root"])
            .arg(dir.path())
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(1));
        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report[0]["rule_id"], "no-debugger");
    }

    #[test]
    fn invalid_format_exits_with_two() {
        let dir = tempdir().unwrap();
        write(dir.path(), "lintfix.json", NO_VAR_CONFIG);
        write(dir.path(), "a.ts", "let a;\n");

        lintfix_cmd()
            .args(["run", "a.ts", "-f", "checkstyle", "--root"])
            .arg(dir.path())
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Invalid lint format"));
    }

    #[test]
    fn missing_project_exits_with_two() {
        let dir = tempdir().unwrap();

        lintfix_cmd()
            .args(["run", "--project", "project.json", "--root"])
            .arg(dir.path())
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Could not find project file"));
    }

    #[test]
    fn options_file_is_applied() {
        let dir = tempdir().unwrap();
        write(dir.path(), "cfg/strict.json", NO_VAR_CONFIG);
        write(dir.path(), "a.ts", "var a;\n");
        write(
            dir.path(),
            "task.json",
            r#"{ "lintConfigPath": "cfg/strict.json", "explicitFiles": "a.ts" }"#,
        );

        lintfix_cmd()
            .arg("run")
            .arg("--options")
            .arg(dir.path().join("task.json"))
            .arg("--root")
            .arg(dir.path())
            .assert()
            .success();

        assert_eq!(fs::read_to_string(dir.path().join("a.ts")).unwrap(), "let a;\n");
    }
}

mod init_command {
    use super::*;

    #[test]
    fn creates_config() {
        let dir = tempdir().unwrap();

        lintfix_cmd()
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .success();

        let content = fs::read_to_string(dir.path().join("lintfix.json")).unwrap();
        assert!(content.contains("no-trailing-whitespace"));
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("lintfix.json"), "{}").unwrap();

        lintfix_cmd()
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("already exists"));

        assert_eq!(fs::read_to_string(dir.path().join("lintfix.json")).unwrap(), "{}");
    }

    #[cfg(unix)]
    #[test]
    fn force_replaces_symlink_instead_of_target() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("target_file");
        fs::write(&target, "Important Data").unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("lintfix.json")).unwrap();

        lintfix_cmd()
            .current_dir(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();

        assert_eq!(fs::read_to_string(&target).unwrap(), "Important Data");
        let meta = fs::symlink_metadata(dir.path().join("lintfix.json")).unwrap();
        assert!(meta.is_file());
    }
}

mod formats_command {
    use super::*;

    #[test]
    fn lists_formatters() {
        lintfix_cmd()
            .arg("formats")
            .assert()
            .success()
            .stdout(predicate::str::contains("prose (default)"))
            .stdout(predicate::str::contains("stylish"));
    }
}
