//! Orchestrator phases and mutating actions

use std::fmt;

/// Phase of one deploy run
///
/// Phases only move forward; `Failed` is absorbing and can be entered
/// from any other phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeployPhase {
    Init,
    UnitResolved,
    InstancesPartitioned,
    InstancesConverged,
    Done,
    Failed,
}

impl DeployPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::UnitResolved => "unit_resolved",
            Self::InstancesPartitioned => "instances_partitioned",
            Self::InstancesConverged => "instances_converged",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for DeployPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutating control-plane call issued by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeployAction {
    CreateUnit,
    UpdateUnit,
    CreateInstances,
    UpdateInstances,
}

impl DeployAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateUnit => "create-unit",
            Self::UpdateUnit => "update-unit",
            Self::CreateInstances => "create-instances",
            Self::UpdateInstances => "update-instances",
        }
    }
}

impl fmt::Display for DeployAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
