//! Test environment builder for isolated stackfleet runs.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Variables the binary reads that must not leak in from the developer's shell
const SCRUBBED_VARS: &[&str] = &[
    "ENV",
    "TARGET_ACCOUNTS",
    "TARGET_REGIONS",
    "STACK_SET_NAME",
    "AWS_STACK_ADMIN_ARN",
    "STACKFLEET_POLL_INTERVAL_SECS",
    "STACKFLEET_MAX_POLLS",
    "STACKFLEET_CONFLICT_MAX_ATTEMPTS",
    "STACKFLEET_CONFLICT_BACKOFF_SECS",
    "STACKFLEET_REGION_CONCURRENCY",
    "STACKFLEET_REAPPLY_PARAMETERS",
    "STACKFLEET_AWS_CLI",
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "AWS_SESSION_TOKEN",
];

/// Result of running the stackfleet binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated project and home directories
pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: tempfile::tempdir().expect("create project dir"),
            home_dir: tempfile::tempdir().expect("create home dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_stackfleet")),
        }
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn write_project_file(&self, relative: &str, content: &str) {
        let path = self.project_path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create directories");
        }
        std::fs::write(&path, content).expect("write project file");
    }

    /// Run from the project root with only `vars` set on top of a scrubbed environment
    pub fn run(&self, args: &[&str], vars: &[(&str, &str)]) -> TestResult {
        self.run_from(self.project_root.path(), args, vars)
    }

    pub fn run_from(&self, cwd: &Path, args: &[&str], vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(cwd)
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env("NO_COLOR", "1");
        for key in SCRUBBED_VARS {
            cmd.env_remove(key);
        }
        for (key, value) in vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("failed to execute stackfleet");
        Self::output_to_result(output)
    }

    fn output_to_result(output: Output) -> TestResult {
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// The five required settings for a two-account, one-region fleet
pub fn fleet_vars() -> Vec<(&'static str, &'static str)> {
    vec![
        ("ENV", "dev"),
        ("TARGET_ACCOUNTS", "111122223333,444455556666"),
        ("TARGET_REGIONS", "us-east-1"),
        ("STACK_SET_NAME", "image-resizer"),
        ("AWS_STACK_ADMIN_ARN", "arn:aws:iam::999988887777:role/StackSetAdmin"),
    ]
}
