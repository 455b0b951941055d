//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod capability;
mod fleet;
mod hash;
mod operation;
mod phase;

pub use capability::{Capability, RegionConcurrency};
pub(crate) use fleet::dedup_ordered;
pub use fleet::{AccountId, FleetError, Region, Target, TargetFleet};
pub use hash::ContentHash;
pub use operation::{OperationId, OperationStatus};
pub use phase::{DeployAction, DeployPhase};
