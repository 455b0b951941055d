//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `PackageUseCase` - Publishes the template for the whole fleet
//! - `DeployUseCase` - Publishes, then converges unit and instances

pub mod deploy;
pub mod package;

pub use deploy::{
    DeployOptions, DeployReport, DeployUseCase, Orchestrator, OrchestratorSettings, UnitAction,
};
pub use package::{PackageOptions, PackageUseCase};
