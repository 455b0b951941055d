//! Control Plane Port
//!
//! Typed boundary to the stack-set orchestration service. The orchestrator
//! only ever talks to this trait; infrastructure decides how calls reach
//! the provider.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::domain::entities::{
    CredentialSet, DeploymentUnitSpec, InstanceBatch, OperationDescription,
    OperationPreferences, OperationResultSummary,
};
use crate::domain::value_objects::{AccountId, OperationId, Region};

/// Resource a "not found" response refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Unit,
    Instance,
    Operation,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unit => "deployment unit",
            Self::Instance => "deployment instance",
            Self::Operation => "operation",
        })
    }
}

/// Provider error, already sorted into the classes the orchestrator reacts to
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlPlaneError {
    #[error("{resource} not found: {message}")]
    NotFound {
        resource: ResourceKind,
        message: String,
    },

    #[error("already exists: {message}")]
    AlreadyExists { message: String },

    #[error("another operation is in progress: {message}")]
    OperationInProgress { message: String },

    #[error("not authorized: {message}")]
    Unauthorized { message: String },

    #[error("transient remote error ({code}): {message}")]
    Transient { code: String, message: String },

    #[error("remote error ({code}): {message}")]
    Fatal { code: String, message: String },
}

impl ControlPlaneError {
    pub fn is_not_found(&self, kind: ResourceKind) -> bool {
        matches!(self, Self::NotFound { resource, .. } if *resource == kind)
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::OperationInProgress { .. })
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}

pub type ControlPlaneResult<T> = Result<T, ControlPlaneError>;

/// What `describe_unit` reports about an existing unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDescription {
    pub name: String,
    pub status: Option<String>,
}

/// What `describe_instance` reports about an existing instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceDescription {
    pub account: AccountId,
    pub region: Region,
    pub status: Option<String>,
}

/// Arguments of a batched create/update instances call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstancesRequest {
    pub unit_name: String,
    pub accounts: Vec<AccountId>,
    pub regions: Vec<Region>,
    /// Empty means "no overrides"
    pub parameter_overrides: BTreeMap<String, String>,
    pub preferences: OperationPreferences,
    /// Client-chosen operation id, if any
    pub operation_id: Option<OperationId>,
}

impl InstancesRequest {
    pub fn for_batch(
        unit_name: impl Into<String>,
        batch: &InstanceBatch,
        preferences: OperationPreferences,
    ) -> Self {
        Self {
            unit_name: unit_name.into(),
            accounts: batch.accounts().to_vec(),
            regions: batch.regions().to_vec(),
            parameter_overrides: BTreeMap::new(),
            preferences,
            operation_id: None,
        }
    }

    pub fn with_parameter_overrides(mut self, overrides: BTreeMap<String, String>) -> Self {
        self.parameter_overrides = overrides;
        self
    }

    pub fn with_operation_id(mut self, id: OperationId) -> Self {
        self.operation_id = Some(id);
        self
    }
}

/// Stack-set style orchestration service
pub trait ControlPlane {
    fn describe_unit(&self, name: &str) -> ControlPlaneResult<UnitDescription>;

    /// Create the unit. Returns an operation handle when creation is
    /// asynchronous, `None` when the unit is usable on return.
    fn create_unit(&self, spec: &DeploymentUnitSpec) -> ControlPlaneResult<Option<OperationId>>;

    fn update_unit(
        &self,
        spec: &DeploymentUnitSpec,
        preferences: &OperationPreferences,
        operation_id: &OperationId,
    ) -> ControlPlaneResult<OperationId>;

    fn describe_instance(
        &self,
        unit_name: &str,
        account: &AccountId,
        region: &Region,
    ) -> ControlPlaneResult<InstanceDescription>;

    fn create_instances(&self, request: &InstancesRequest) -> ControlPlaneResult<OperationId>;

    fn update_instances(&self, request: &InstancesRequest) -> ControlPlaneResult<OperationId>;

    fn describe_operation(
        &self,
        unit_name: &str,
        operation_id: &OperationId,
    ) -> ControlPlaneResult<OperationDescription>;

    fn list_operation_results(
        &self,
        unit_name: &str,
        operation_id: &OperationId,
    ) -> ControlPlaneResult<Vec<OperationResultSummary>>;
}

impl<C: ControlPlane + ?Sized> ControlPlane for &C {
    fn describe_unit(&self, name: &str) -> ControlPlaneResult<UnitDescription> {
        (**self).describe_unit(name)
    }

    fn create_unit(&self, spec: &DeploymentUnitSpec) -> ControlPlaneResult<Option<OperationId>> {
        (**self).create_unit(spec)
    }

    fn update_unit(
        &self,
        spec: &DeploymentUnitSpec,
        preferences: &OperationPreferences,
        operation_id: &OperationId,
    ) -> ControlPlaneResult<OperationId> {
        (**self).update_unit(spec, preferences, operation_id)
    }

    fn describe_instance(
        &self,
        unit_name: &str,
        account: &AccountId,
        region: &Region,
    ) -> ControlPlaneResult<InstanceDescription> {
        (**self).describe_instance(unit_name, account, region)
    }

    fn create_instances(&self, request: &InstancesRequest) -> ControlPlaneResult<OperationId> {
        (**self).create_instances(request)
    }

    fn update_instances(&self, request: &InstancesRequest) -> ControlPlaneResult<OperationId> {
        (**self).update_instances(request)
    }

    fn describe_operation(
        &self,
        unit_name: &str,
        operation_id: &OperationId,
    ) -> ControlPlaneResult<OperationDescription> {
        (**self).describe_operation(unit_name, operation_id)
    }

    fn list_operation_results(
        &self,
        unit_name: &str,
        operation_id: &OperationId,
    ) -> ControlPlaneResult<Vec<OperationResultSummary>> {
        (**self).list_operation_results(unit_name, operation_id)
    }
}

/// Builds a control-plane client bound to one credential set
///
/// Credentials are passed in explicitly; clients never pick them up from
/// ambient process state.
pub trait ControlPlaneConnector {
    type Client: ControlPlane;

    fn connect(&self, credentials: &CredentialSet) -> Self::Client;
}
