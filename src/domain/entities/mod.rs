//! Domain Entities
//!
//! Core domain entities:
//! - `DeploymentUnitSpec` - The fleet-wide stack set definition
//! - `InstanceBatch` - A set of targets addressed by one instance call
//! - `OperationResultSummary` - Per-target outcome of an operation
//! - `CredentialSet` - Short-lived credentials for one session

mod credentials;
mod deployment_unit;
mod instance_batch;
mod operation_result;

pub use credentials::CredentialSet;
pub use deployment_unit::{DeploymentUnitSpec, OperationPreferences, PermissionModel};
pub use instance_batch::InstanceBatch;
pub use operation_result::{OperationDescription, OperationResultSummary};
