//! Deploy Result
//!
//! Result types for deploy operations.

use crate::domain::entities::OperationResultSummary;
use crate::domain::ports::PublishedTemplate;
use crate::domain::value_objects::{DeployPhase, OperationId, Target};

/// What happened to the deployment unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitAction {
    Created,
    Updated,
    /// Create lost a race with a concurrent run; the unit was updated instead
    AdoptedAfterRace,
}

impl UnitAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::AdoptedAfterRace => "adopted",
        }
    }
}

/// Result of a successful deploy run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
    pub unit_name: String,
    pub unit_action: Option<UnitAction>,
    /// Targets covered by a create-instances batch
    pub created_targets: Vec<Target>,
    /// Targets covered by an update-instances batch
    pub updated_targets: Vec<Target>,
    /// Per-target "already exists" failures accepted as benign
    pub conflicts: Vec<OperationResultSummary>,
    /// Every operation id this run waited on, in order
    pub operations: Vec<OperationId>,
    pub phase: DeployPhase,
    /// Template the unit now points at
    pub template: Option<PublishedTemplate>,
}

impl DeployReport {
    pub fn new(unit_name: impl Into<String>) -> Self {
        Self {
            unit_name: unit_name.into(),
            unit_action: None,
            created_targets: Vec::new(),
            updated_targets: Vec::new(),
            conflicts: Vec::new(),
            operations: Vec::new(),
            phase: DeployPhase::Init,
            template: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase == DeployPhase::Done
    }

    pub fn target_count(&self) -> usize {
        self.created_targets.len() + self.updated_targets.len()
    }
}
