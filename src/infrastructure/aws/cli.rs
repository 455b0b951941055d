//! `aws` CLI runner
//!
//! Every remote call is one child process. Credentials, when bound, are
//! handed to that child through its environment and nowhere else.

use std::ffi::OsStr;
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::domain::entities::CredentialSet;

#[derive(Debug, Error)]
pub enum AwsCliError {
    #[error("could not run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{}", describe_failure(.code.as_deref(), .message))]
    Failed {
        /// Provider error code, when the CLI reported one
        code: Option<String>,
        message: String,
    },

    #[error("unexpected output: {0}")]
    InvalidOutput(#[from] serde_json::Error),
}

impl AwsCliError {
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Failed { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Failed { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

fn describe_failure(code: Option<&str>, message: &str) -> String {
    match code {
        Some(code) => format!("{code}: {message}"),
        None => message.to_string(),
    }
}

/// `An error occurred (<Code>) when calling the <Op> operation: <msg>`
///
/// `None` only if the pattern fails to compile, which the tests rule out.
static AWS_ERROR: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?s)An error occurred \(([^)]*)\)(?:.*?operation:(.*))?").ok()
});

/// Split aws CLI error output into the provider error code and its message
pub fn parse_error_output(stderr: &str) -> (Option<String>, String) {
    let trimmed = stderr.trim();
    let Some(caps) = AWS_ERROR.as_ref().and_then(|re| re.captures(trimmed)) else {
        return (None, trimmed.to_string());
    };
    let code = caps
        .get(1)
        .map(|m| m.as_str().trim().to_string())
        .filter(|c| !c.is_empty());
    let message = caps
        .get(2)
        .map(|m| m.as_str().trim().to_string())
        .filter(|msg| !msg.is_empty())
        .unwrap_or_else(|| trimmed.to_string());
    (code, message)
}

#[derive(Clone)]
pub struct AwsCli {
    program: PathBuf,
    region: Option<String>,
    env: Vec<(&'static str, String)>,
}

impl AwsCli {
    pub const DEFAULT_PROGRAM: &'static str = "aws";

    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            region: None,
            env: Vec::new(),
        }
    }

    /// Region every call is sent to (`--region`)
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Copy of this runner whose children authenticate with `credentials`
    pub fn with_credentials(&self, credentials: &CredentialSet) -> Self {
        let mut cli = self.clone();
        cli.env = credentials
            .env_vars()
            .iter()
            .map(|(key, value)| (*key, value.to_string()))
            .collect();
        cli
    }

    pub fn has_credentials(&self) -> bool {
        !self.env.is_empty()
    }

    /// Run with `--output json` and return stdout
    pub fn run<I, S>(&self, args: I) -> Result<String, AwsCliError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(&self.program);
        command.args(args).args(["--output", "json"]);
        if let Some(region) = &self.region {
            command.arg("--region").arg(region);
        }
        command
            .envs(self.env.iter().map(|(k, v)| (*k, v.as_str())))
            .stdin(Stdio::null());

        let output = command.output().map_err(|source| AwsCliError::Spawn {
            program: self.program.display().to_string(),
            source,
        })?;

        if !output.status.success() {
            let (code, message) = parse_error_output(&String::from_utf8_lossy(&output.stderr));
            return Err(AwsCliError::Failed { code, message });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run and deserialize stdout
    pub fn run_json<T, I, S>(&self, args: I) -> Result<T, AwsCliError>
    where
        T: DeserializeOwned,
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let stdout = self.run(args)?;
        Ok(serde_json::from_str(&stdout)?)
    }
}

impl Default for AwsCli {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM)
    }
}

impl fmt::Debug for AwsCli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCli")
            .field("program", &self.program)
            .field("region", &self.region)
            .field("credentials", &self.has_credentials())
            .finish()
    }
}
