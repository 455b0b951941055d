//! Deployment Unit Entity
//!
//! The named stack set definition: template location, capabilities,
//! parameters and the roles the control plane uses to reach target
//! accounts. Created once per environment and updated in place afterwards.

use std::collections::BTreeMap;

use crate::domain::value_objects::{Capability, RegionConcurrency};

/// Who provisions the execution roles in target accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionModel {
    /// Roles are created by the fleet owner (`SELF_MANAGED`)
    #[default]
    SelfManaged,
    /// Roles are managed through the organization service (`SERVICE_MANAGED`)
    ServiceManaged,
}

impl PermissionModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelfManaged => "SELF_MANAGED",
            Self::ServiceManaged => "SERVICE_MANAGED",
        }
    }
}

/// Desired state of the deployment unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentUnitSpec {
    pub name: String,
    pub template_url: String,
    pub capabilities: Vec<Capability>,
    pub parameters: BTreeMap<String, String>,
    pub administration_role_arn: String,
    pub execution_role_name: String,
    pub permission_model: PermissionModel,
}

impl DeploymentUnitSpec {
    pub fn new(
        name: impl Into<String>,
        template_url: impl Into<String>,
        administration_role_arn: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            template_url: template_url.into(),
            capabilities: Capability::defaults(),
            parameters: BTreeMap::new(),
            administration_role_arn: administration_role_arn.into(),
            execution_role_name: Self::DEFAULT_EXECUTION_ROLE.to_string(),
            permission_model: PermissionModel::default(),
        }
    }

    pub const DEFAULT_EXECUTION_ROLE: &'static str = "AWSCloudFormationStackSetExecutionRole";

    pub fn with_capabilities(mut self, capabilities: Vec<Capability>) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn with_execution_role(mut self, role_name: impl Into<String>) -> Self {
        self.execution_role_name = role_name.into();
        self
    }
}

/// Blast-radius controls for instance operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationPreferences {
    /// Percentage of targets allowed to fail before the operation stops
    pub failure_tolerance_percentage: u8,
    /// Percentage of targets worked on at the same time
    pub max_concurrent_percentage: u8,
    pub region_concurrency: RegionConcurrency,
}

impl Default for OperationPreferences {
    fn default() -> Self {
        Self {
            failure_tolerance_percentage: 0,
            max_concurrent_percentage: 100,
            region_concurrency: RegionConcurrency::Sequential,
        }
    }
}
