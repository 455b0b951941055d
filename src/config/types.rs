//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Capability, RegionConcurrency};
use crate::error::StackfleetResult;

use super::loader::{self, ConfigWarning};

/// Account or region list
///
/// Supports both array form:
///   accounts = ["111122223333", "444455556666"]
///
/// And the comma-separated form used by the environment:
///   accounts = "111122223333,444455556666"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(transparent)]
pub struct ListValue(pub Vec<String>);

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ListValueDe {
    List(Vec<String>),
    Csv(String),
}

impl<'de> Deserialize<'de> for ListValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match ListValueDe::deserialize(deserializer)? {
            ListValueDe::List(items) => Ok(Self(items)),
            ListValueDe::Csv(raw) => Ok(Self::from_csv(&raw)),
        }
    }
}

impl ListValue {
    pub fn from_csv(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|item| item.trim().is_empty())
    }
}

/// `[target]`: what to deploy and where
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetConfig {
    /// Environment name, passed to the template as a parameter
    #[serde(default)]
    pub environment: Option<String>,

    #[serde(default)]
    pub accounts: ListValue,

    #[serde(default)]
    pub regions: ListValue,

    #[serde(default)]
    pub stack_set_name: Option<String>,

    #[serde(default)]
    pub admin_role_arn: Option<String>,

    #[serde(default = "default_execution_role_name")]
    pub execution_role_name: String,

    #[serde(default = "default_session_name")]
    pub session_name: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            environment: None,
            accounts: ListValue::default(),
            regions: ListValue::default(),
            stack_set_name: None,
            admin_role_arn: None,
            execution_role_name: default_execution_role_name(),
            session_name: default_session_name(),
        }
    }
}

fn default_execution_role_name() -> String {
    crate::domain::entities::DeploymentUnitSpec::DEFAULT_EXECUTION_ROLE.to_string()
}

fn default_session_name() -> String {
    crate::application::deploy::DEFAULT_SESSION_NAME.to_string()
}

/// `[template]`: packaging and upload locations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateConfig {
    #[serde(default = "default_template_file")]
    pub template_file: PathBuf,

    #[serde(default = "default_packaged_file")]
    pub packaged_file: String,

    #[serde(default = "default_template_bucket")]
    pub template_bucket: String,

    #[serde(default = "default_artifact_bucket_prefix")]
    pub artifact_bucket_prefix: String,

    #[serde(default = "default_artifact_prefix")]
    pub artifact_prefix: String,

    #[serde(default = "Capability::defaults")]
    pub capabilities: Vec<Capability>,

    /// Template parameter that receives the environment name
    #[serde(default = "default_parameter_key")]
    pub parameter_key: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            template_file: default_template_file(),
            packaged_file: default_packaged_file(),
            template_bucket: default_template_bucket(),
            artifact_bucket_prefix: default_artifact_bucket_prefix(),
            artifact_prefix: default_artifact_prefix(),
            capabilities: Capability::defaults(),
            parameter_key: default_parameter_key(),
        }
    }
}

fn default_template_file() -> PathBuf {
    PathBuf::from("cloudformation-stack-set.yml")
}

fn default_packaged_file() -> String {
    "cloudformation-stack-set-output.yml".to_string()
}

fn default_template_bucket() -> String {
    "stackfleet-stack-sets".to_string()
}

fn default_artifact_bucket_prefix() -> String {
    "stackfleet-deploy".to_string()
}

fn default_artifact_prefix() -> String {
    "cloudformation".to_string()
}

fn default_parameter_key() -> String {
    "stage".to_string()
}

/// `[deploy]`: orchestrator tunables
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeploySection {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Unset polls until the operation finishes
    #[serde(default)]
    pub max_polls: Option<u32>,

    #[serde(default = "default_conflict_max_attempts")]
    pub conflict_max_attempts: u32,

    #[serde(default = "default_conflict_backoff_secs")]
    pub conflict_backoff_secs: u64,

    #[serde(default)]
    pub failure_tolerance_percentage: u8,

    #[serde(default = "default_max_concurrent_percentage")]
    pub max_concurrent_percentage: u8,

    #[serde(default)]
    pub region_concurrency: RegionConcurrency,

    #[serde(default = "default_true")]
    pub reapply_parameters_on_update: bool,
}

impl Default for DeploySection {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            max_polls: None,
            conflict_max_attempts: default_conflict_max_attempts(),
            conflict_backoff_secs: default_conflict_backoff_secs(),
            failure_tolerance_percentage: 0,
            max_concurrent_percentage: default_max_concurrent_percentage(),
            region_concurrency: RegionConcurrency::default(),
            reapply_parameters_on_update: true,
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    10
}

fn default_conflict_max_attempts() -> u32 {
    3
}

fn default_conflict_backoff_secs() -> u64 {
    30
}

fn default_max_concurrent_percentage() -> u8 {
    100
}

fn default_true() -> bool {
    true
}

/// `[aws]`: how the provider is reached
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AwsConfig {
    /// `aws` executable, looked up on PATH when relative
    #[serde(default = "default_cli_path")]
    pub cli_path: PathBuf,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            cli_path: default_cli_path(),
        }
    }
}

fn default_cli_path() -> PathBuf {
    PathBuf::from(crate::infrastructure::AwsCli::DEFAULT_PROGRAM)
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub template: TemplateConfig,

    #[serde(default)]
    pub deploy: DeploySection,

    #[serde(default)]
    pub aws: AwsConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> StackfleetResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> StackfleetResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self, |key| std::env::var(key).ok(), &mut std::io::stderr())
    }
}
