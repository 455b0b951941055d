//! stackfleet - package and deploy stack sets across an account x region fleet
//!
//! A deploy publishes one template, then converges a fleet-wide deployment
//! unit and its per-target instances on a stack-set control plane. Probing,
//! create-vs-update decisions, operation polling and conflict recovery live
//! in the application layer; everything remote sits behind domain ports.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    DeployOptions, DeployReport, DeployUseCase, OrchestratorSettings, PackageOptions,
    PackageUseCase, UnitAction,
};
pub use config::{Config, DeployConfig};
pub use domain::value_objects::{AccountId, Region, Target, TargetFleet};
pub use error::{ErrorKind, StackfleetError, StackfleetResult};
