//! Configuration module for stackfleet
//!
//! Implements the configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (ENV, TARGET_*, STACK_SET_NAME, AWS_STACK_ADMIN_ARN, STACKFLEET_*)
//! 3. Project config (./stackfleet.toml or --config)
//! 4. User config (~/.config/stackfleet/config.toml)
//! 5. Built-in defaults (lowest priority)

mod env_validator;
mod loader;
mod resolved;
#[cfg(test)]
mod tests;
mod types;

pub use env_validator::{levenshtein, EnvVarValidator};
pub use loader::{
    apply_overrides, load, load_files, load_with_warnings, with_env_overrides, ConfigOverrides,
    ConfigSources, ConfigWarning, PROJECT_CONFIG_FILE,
};
pub use resolved::DeployConfig;
pub use types::{AwsConfig, Config, DeploySection, ListValue, TargetConfig, TemplateConfig};
