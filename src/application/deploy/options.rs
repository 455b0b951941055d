//! Deploy Options
//!
//! Configuration types for deploy operations. Built once from the resolved
//! configuration and passed in; nothing below reads the environment.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::application::package::PackageOptions;
use crate::domain::entities::{DeploymentUnitSpec, OperationPreferences};
use crate::domain::value_objects::{Capability, TargetFleet};

/// Session name used for every role assumption
pub const DEFAULT_SESSION_NAME: &str = "StackSetDeploymentSession";

/// Tunables of the orchestrator state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorSettings {
    /// Wait between two polls of a running operation
    pub poll_interval: Duration,
    /// Give up polling after this many describes (`None` polls forever)
    pub max_polls: Option<u32>,
    /// Total attempts of a call rejected with "operation in progress"
    pub conflict_max_attempts: u32,
    /// Wait between two such attempts
    pub conflict_backoff: Duration,
    pub preferences: OperationPreferences,
    /// Pass unit parameters as overrides on update-instances too
    pub reapply_parameters_on_update: bool,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            max_polls: None,
            conflict_max_attempts: 3,
            conflict_backoff: Duration::from_secs(30),
            preferences: OperationPreferences::default(),
            reapply_parameters_on_update: true,
        }
    }
}

/// Options for the deploy use case
#[derive(Debug, Clone)]
pub struct DeployOptions {
    pub unit_name: String,
    pub fleet: TargetFleet,
    pub administration_role_arn: String,
    pub execution_role_name: String,
    pub session_name: String,
    pub capabilities: Vec<Capability>,
    pub parameters: BTreeMap<String, String>,
    pub settings: OrchestratorSettings,
}

impl DeployOptions {
    pub fn new(
        unit_name: impl Into<String>,
        fleet: TargetFleet,
        administration_role_arn: impl Into<String>,
    ) -> Self {
        Self {
            unit_name: unit_name.into(),
            fleet,
            administration_role_arn: administration_role_arn.into(),
            execution_role_name: DeploymentUnitSpec::DEFAULT_EXECUTION_ROLE.to_string(),
            session_name: DEFAULT_SESSION_NAME.to_string(),
            capabilities: Capability::defaults(),
            parameters: BTreeMap::new(),
            settings: OrchestratorSettings::default(),
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn with_settings(mut self, settings: OrchestratorSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Options for the packaging step that precedes orchestration
    pub fn package_options(&self) -> PackageOptions {
        PackageOptions {
            unit_name: self.unit_name.clone(),
            fleet: self.fleet.clone(),
            administration_role_arn: self.administration_role_arn.clone(),
            session_name: self.session_name.clone(),
        }
    }

    /// Desired unit state once the template lives at `template_url`
    pub fn unit_spec(&self, template_url: &str) -> DeploymentUnitSpec {
        let mut spec = DeploymentUnitSpec::new(
            &self.unit_name,
            template_url,
            &self.administration_role_arn,
        )
        .with_capabilities(self.capabilities.clone())
        .with_execution_role(&self.execution_role_name);
        spec.parameters = self.parameters.clone();
        spec
    }
}
