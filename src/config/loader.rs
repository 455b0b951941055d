//! Configuration loading and layering

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::value_objects::RegionConcurrency;
use crate::error::{StackfleetError, StackfleetResult};

use super::env_validator::{levenshtein, EnvVarValidator};
use super::types::{Config, ListValue};

/// Project config file looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "stackfleet.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Config files taking part in one run, lowest priority first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSources {
    pub user_file: Option<PathBuf>,
    pub project_file: Option<PathBuf>,
    /// The project file was named on the command line and must exist
    pub explicit: bool,
}

impl ConfigSources {
    /// `--config PATH`, else `./stackfleet.toml`, on top of the user file
    pub fn discover(project_root: &Path, explicit: Option<&Path>) -> Self {
        Self {
            user_file: dirs::config_dir().map(|dir| dir.join("stackfleet/config.toml")),
            project_file: Some(
                explicit
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| project_root.join(PROJECT_CONFIG_FILE)),
            ),
            explicit: explicit.is_some(),
        }
    }
}

/// Values given as command line flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub environment: Option<String>,
    pub accounts: Option<String>,
    pub regions: Option<String>,
    pub stack_set_name: Option<String>,
    pub admin_role_arn: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> StackfleetResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

fn parse_with_warnings(content: &str, path: &Path) -> StackfleetResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| StackfleetError::InvalidConfig {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Full hierarchy: CLI flags > environment > project file > user file > defaults
pub fn load<F, W>(
    sources: &ConfigSources,
    overrides: &ConfigOverrides,
    env: F,
    warn: &mut W,
) -> StackfleetResult<(Config, Vec<ConfigWarning>)>
where
    F: Fn(&str) -> Option<String>,
    W: Write,
{
    let (config, warnings) = load_files(sources)?;
    let config = with_env_overrides(config, env, warn);
    Ok((apply_overrides(config, overrides), warnings))
}

/// Merge the config files of `sources`; later files win key by key
pub fn load_files(sources: &ConfigSources) -> StackfleetResult<(Config, Vec<ConfigWarning>)> {
    let mut merged = toml::Table::new();
    let mut warnings = Vec::new();

    let files = [
        (sources.user_file.as_deref(), false),
        (sources.project_file.as_deref(), sources.explicit),
    ];
    for (path, required) in files {
        let Some(path) = path else { continue };
        if !path.is_file() {
            if required {
                return Err(StackfleetError::InvalidConfig {
                    path: path.to_path_buf(),
                    message: "file not found".to_string(),
                });
            }
            continue;
        }

        let content = fs::read_to_string(path)?;
        // Validate and collect warnings per file so they point at the right place
        let (_, file_warnings) = parse_with_warnings(&content, path)?;
        warnings.extend(file_warnings);

        let table: toml::Table =
            content
                .parse()
                .map_err(|e: toml::de::Error| StackfleetError::InvalidConfig {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
        merge_tables(&mut merged, table);
    }

    let config = Config::deserialize(toml::Value::Table(merged)).map_err(|e| {
        StackfleetError::InvalidConfig {
            path: sources.project_file.clone().unwrap_or_default(),
            message: e.to_string(),
        }
    })?;
    Ok((config, warnings))
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Apply environment overrides
///
/// Blank values count as unset. Malformed tunables keep their current
/// value and print a warning to `warn`.
pub fn with_env_overrides<F, W>(mut config: Config, env: F, warn: &mut W) -> Config
where
    F: Fn(&str) -> Option<String>,
    W: Write,
{
    let var = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    if let Some(value) = var("ENV") {
        config.target.environment = Some(value.trim().to_string());
    }
    if let Some(value) = var("TARGET_ACCOUNTS") {
        config.target.accounts = ListValue::from_csv(&value);
    }
    if let Some(value) = var("TARGET_REGIONS") {
        config.target.regions = ListValue::from_csv(&value);
    }
    if let Some(value) = var("STACK_SET_NAME") {
        config.target.stack_set_name = Some(value.trim().to_string());
    }
    if let Some(value) = var("AWS_STACK_ADMIN_ARN") {
        config.target.admin_role_arn = Some(value.trim().to_string());
    }
    if let Some(value) = var("STACKFLEET_AWS_CLI") {
        config.aws.cli_path = PathBuf::from(value.trim());
    }

    const NUMBER: &[&str] = &["a positive integer"];
    let deploy = &mut config.deploy;

    if let Some(value) = var("STACKFLEET_POLL_INTERVAL_SECS") {
        deploy.poll_interval_secs = EnvVarValidator::new("STACKFLEET_POLL_INTERVAL_SECS", NUMBER)
            .parse_with_writer(&value, parse_positive, deploy.poll_interval_secs, warn);
    }
    if let Some(value) = var("STACKFLEET_MAX_POLLS") {
        deploy.max_polls = EnvVarValidator::new("STACKFLEET_MAX_POLLS", NUMBER)
            .parse_with_writer(&value, |s| parse_positive(s).map(Some), deploy.max_polls, warn);
    }
    if let Some(value) = var("STACKFLEET_CONFLICT_MAX_ATTEMPTS") {
        deploy.conflict_max_attempts =
            EnvVarValidator::new("STACKFLEET_CONFLICT_MAX_ATTEMPTS", NUMBER).parse_with_writer(
                &value,
                parse_positive,
                deploy.conflict_max_attempts,
                warn,
            );
    }
    if let Some(value) = var("STACKFLEET_CONFLICT_BACKOFF_SECS") {
        deploy.conflict_backoff_secs =
            EnvVarValidator::new("STACKFLEET_CONFLICT_BACKOFF_SECS", &["a number of seconds"])
                .parse_with_writer(
                    &value,
                    |s| s.trim().parse().ok(),
                    deploy.conflict_backoff_secs,
                    warn,
                );
    }
    if let Some(value) = var("STACKFLEET_REGION_CONCURRENCY") {
        deploy.region_concurrency =
            EnvVarValidator::new("STACKFLEET_REGION_CONCURRENCY", &["sequential", "parallel"])
                .parse_with_writer(
                    &value,
                    |s| s.parse::<RegionConcurrency>().ok(),
                    deploy.region_concurrency,
                    warn,
                );
    }
    if let Some(value) = var("STACKFLEET_REAPPLY_PARAMETERS") {
        deploy.reapply_parameters_on_update =
            EnvVarValidator::new("STACKFLEET_REAPPLY_PARAMETERS", &["true", "false"])
                .parse_with_writer(
                    &value,
                    parse_bool,
                    deploy.reapply_parameters_on_update,
                    warn,
                );
    }

    config
}

/// Apply command line flags on top of everything else
pub fn apply_overrides(mut config: Config, overrides: &ConfigOverrides) -> Config {
    if let Some(environment) = &overrides.environment {
        config.target.environment = Some(environment.clone());
    }
    if let Some(accounts) = &overrides.accounts {
        config.target.accounts = ListValue::from_csv(accounts);
    }
    if let Some(regions) = &overrides.regions {
        config.target.regions = ListValue::from_csv(regions);
    }
    if let Some(name) = &overrides.stack_set_name {
        config.target.stack_set_name = Some(name.clone());
    }
    if let Some(arn) = &overrides.admin_role_arn {
        config.target.admin_role_arn = Some(arn.clone());
    }
    config
}

fn parse_positive<T>(raw: &str) -> Option<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    raw.trim()
        .parse::<T>()
        .ok()
        .filter(|value| *value > T::default())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "target",
        "environment",
        "accounts",
        "regions",
        "stack_set_name",
        "admin_role_arn",
        "execution_role_name",
        "session_name",
        "template",
        "template_file",
        "packaged_file",
        "template_bucket",
        "artifact_bucket_prefix",
        "artifact_prefix",
        "capabilities",
        "parameter_key",
        "deploy",
        "poll_interval_secs",
        "max_polls",
        "conflict_max_attempts",
        "conflict_backoff_secs",
        "failure_tolerance_percentage",
        "max_concurrent_percentage",
        "region_concurrency",
        "reapply_parameters_on_update",
        "aws",
        "cli_path",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}
