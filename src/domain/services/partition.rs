//! Fleet partitioning
//!
//! Splits the probed fleet into targets that still need an instance and
//! targets that already have one. No I/O: the caller supplies the probe
//! results.

use crate::domain::entities::InstanceBatch;
use crate::domain::value_objects::Target;

/// Fleet split by instance existence, both halves in fleet order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub new_targets: Vec<Target>,
    pub existing_targets: Vec<Target>,
}

impl Partition {
    /// Build from `(target, exists)` pairs
    pub fn from_probes(probes: impl IntoIterator<Item = (Target, bool)>) -> Self {
        let mut partition = Self::default();
        for (target, exists) in probes {
            if exists {
                partition.existing_targets.push(target);
            } else {
                partition.new_targets.push(target);
            }
        }
        partition
    }

    pub fn create_batch(&self) -> InstanceBatch {
        InstanceBatch::from_targets(&self.new_targets)
    }

    pub fn update_batch(&self) -> InstanceBatch {
        InstanceBatch::from_targets(&self.existing_targets)
    }

    /// Create calls to issue, none of which reaches an existing target
    pub fn create_batches(&self) -> Vec<InstanceBatch> {
        self.create_batch().into_grids()
    }

    /// Update calls to issue, none of which reaches a new target
    pub fn update_batches(&self) -> Vec<InstanceBatch> {
        self.update_batch().into_grids()
    }

    pub fn len(&self) -> usize {
        self.new_targets.len() + self.existing_targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
