//! Resolved run configuration
//!
//! The layered `Config` has optional holes; a `DeployConfig` does not.
//! Everything below the command layer receives one of these and never
//! looks at files or the environment again.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::deploy::{DeployOptions, OrchestratorSettings};
use crate::application::package::PackageOptions;
use crate::domain::entities::OperationPreferences;
use crate::domain::value_objects::{Capability, TargetFleet};
use crate::error::{StackfleetError, StackfleetResult};
use crate::infrastructure::PublisherSettings;

use super::types::Config;

/// Immutable configuration of one package or deploy run
#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub environment: String,
    pub fleet: TargetFleet,
    pub stack_set_name: String,
    pub admin_role_arn: String,
    pub execution_role_name: String,
    pub session_name: String,
    pub capabilities: Vec<Capability>,
    pub parameters: BTreeMap<String, String>,
    pub settings: OrchestratorSettings,
    pub publisher: PublisherSettings,
    pub aws_cli: PathBuf,
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl Config {
    /// Check every required value and build the run configuration
    ///
    /// All missing values are reported together, named by the environment
    /// variable that supplies them.
    pub fn resolve(&self) -> StackfleetResult<DeployConfig> {
        let target = &self.target;
        let environment = present(&target.environment);
        let stack_set_name = present(&target.stack_set_name);
        let admin_role_arn = present(&target.admin_role_arn);

        let mut missing = Vec::new();
        if environment.is_none() {
            missing.push("ENV".to_string());
        }
        if target.accounts.is_blank() {
            missing.push("TARGET_ACCOUNTS".to_string());
        }
        if target.regions.is_blank() {
            missing.push("TARGET_REGIONS".to_string());
        }
        if stack_set_name.is_none() {
            missing.push("STACK_SET_NAME".to_string());
        }
        if admin_role_arn.is_none() {
            missing.push("AWS_STACK_ADMIN_ARN".to_string());
        }

        let (Some(environment), Some(stack_set_name), Some(admin_role_arn)) =
            (environment, stack_set_name, admin_role_arn)
        else {
            return Err(StackfleetError::Precondition { missing });
        };
        if !missing.is_empty() {
            return Err(StackfleetError::Precondition { missing });
        }

        let fleet = TargetFleet::new(&target.accounts.0, &target.regions.0)?;
        let deploy = &self.deploy;

        for (key, value) in [
            ("deploy.failure_tolerance_percentage", deploy.failure_tolerance_percentage),
            ("deploy.max_concurrent_percentage", deploy.max_concurrent_percentage),
        ] {
            if value > 100 {
                return Err(StackfleetError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                    message: "must be a percentage between 0 and 100".to_string(),
                });
            }
        }
        if deploy.max_concurrent_percentage == 0 {
            return Err(StackfleetError::InvalidValue {
                key: "deploy.max_concurrent_percentage".to_string(),
                value: "0".to_string(),
                message: "at least one target must run at a time".to_string(),
            });
        }

        let template = &self.template;
        let mut parameters = BTreeMap::new();
        parameters.insert(template.parameter_key.clone(), environment.clone());

        Ok(DeployConfig {
            environment,
            fleet,
            stack_set_name,
            admin_role_arn,
            execution_role_name: target.execution_role_name.clone(),
            session_name: target.session_name.clone(),
            capabilities: template.capabilities.clone(),
            parameters,
            settings: OrchestratorSettings {
                poll_interval: Duration::from_secs(deploy.poll_interval_secs),
                max_polls: deploy.max_polls,
                conflict_max_attempts: deploy.conflict_max_attempts.max(1),
                conflict_backoff: Duration::from_secs(deploy.conflict_backoff_secs),
                preferences: OperationPreferences {
                    failure_tolerance_percentage: deploy.failure_tolerance_percentage,
                    max_concurrent_percentage: deploy.max_concurrent_percentage,
                    region_concurrency: deploy.region_concurrency,
                },
                reapply_parameters_on_update: deploy.reapply_parameters_on_update,
            },
            publisher: PublisherSettings {
                template_file: template.template_file.clone(),
                packaged_file: template.packaged_file.clone(),
                template_bucket: template.template_bucket.clone(),
                artifact_bucket_prefix: template.artifact_bucket_prefix.clone(),
                artifact_prefix: template.artifact_prefix.clone(),
            },
            aws_cli: self.aws.cli_path.clone(),
        })
    }
}

impl DeployConfig {
    pub fn deploy_options(&self) -> DeployOptions {
        DeployOptions {
            unit_name: self.stack_set_name.clone(),
            fleet: self.fleet.clone(),
            administration_role_arn: self.admin_role_arn.clone(),
            execution_role_name: self.execution_role_name.clone(),
            session_name: self.session_name.clone(),
            capabilities: self.capabilities.clone(),
            parameters: self.parameters.clone(),
            settings: self.settings.clone(),
        }
    }

    pub fn package_options(&self) -> PackageOptions {
        self.deploy_options().package_options()
    }
}
