//! Instance Batch Entity
//!
//! Instance calls address accounts × regions rather than individual pairs,
//! so a batch keeps both the targets that put it together and the distinct
//! account and region lists sent to the control plane. A batch whose targets
//! do not fill that grid is split per region before it is sent.

use crate::domain::value_objects::{dedup_ordered, AccountId, Region, Target};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceBatch {
    targets: Vec<Target>,
    accounts: Vec<AccountId>,
    regions: Vec<Region>,
}

impl InstanceBatch {
    /// Build a batch from targets, keeping first-seen order of accounts and regions
    pub fn from_targets(targets: &[Target]) -> Self {
        let accounts = dedup_ordered(targets.iter().map(|t| t.account.clone()));
        let regions = dedup_ordered(targets.iter().map(|t| t.region.clone()));
        Self {
            targets: targets.to_vec(),
            accounts,
            regions,
        }
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn accounts(&self) -> &[AccountId] {
        &self.accounts
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// True when accounts × regions addresses exactly the batch's targets
    pub fn is_full_grid(&self) -> bool {
        self.accounts.len() * self.regions.len() == self.len()
    }

    /// Batches whose grids cover only this batch's targets
    ///
    /// A full grid is returned as is; otherwise one batch per region, in
    /// first-seen region order.
    pub fn into_grids(self) -> Vec<InstanceBatch> {
        if self.is_full_grid() {
            return vec![self];
        }
        self.regions
            .iter()
            .map(|region| {
                let targets: Vec<Target> = self
                    .targets
                    .iter()
                    .filter(|t| &t.region == region)
                    .cloned()
                    .collect();
                InstanceBatch::from_targets(&targets)
            })
            .collect()
    }
}
