//! Existence Prober
//!
//! Read-only existence facts. A "not found" answer is a negative fact, not
//! an error. The result may be stale by the time the caller acts on it.

use crate::domain::ports::{ControlPlane, ResourceKind};
use crate::domain::value_objects::{AccountId, Region};
use crate::error::{StackfleetError, StackfleetResult};

pub struct ExistenceProber<'a, C: ControlPlane> {
    client: &'a C,
}

impl<'a, C: ControlPlane> ExistenceProber<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub fn unit_exists(&self, name: &str) -> StackfleetResult<bool> {
        match self.client.describe_unit(name) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found(ResourceKind::Unit) => Ok(false),
            Err(e) => Err(StackfleetError::remote("describe-unit", e)),
        }
    }

    pub fn instance_exists(
        &self,
        unit_name: &str,
        account: &AccountId,
        region: &Region,
    ) -> StackfleetResult<bool> {
        match self.client.describe_instance(unit_name, account, region) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found(ResourceKind::Instance) => Ok(false),
            Err(e) => Err(StackfleetError::remote("describe-instance", e)),
        }
    }
}
