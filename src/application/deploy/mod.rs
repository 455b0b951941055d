//! Deploy Module
//!
//! Converges a deployment unit and its instances across a target fleet.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`DeployOptions`, `OrchestratorSettings`)
//! - `prober` - Existence facts (`ExistenceProber`)
//! - `poller` - Waiting for operations (`OperationPoller`)
//! - `retry` - Bounded retry on in-progress rejections (`ConflictRetry`)
//! - `orchestrator` - The state machine (`Orchestrator`)
//! - `result` - Result types (`DeployReport`)
//! - `use_case` - Publish, authenticate, converge (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use stackfleet::application::deploy::{DeployOptions, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(package, connector, ThreadSleeper);
//! let report = use_case.execute(&DeployOptions::new(name, fleet, admin_role_arn))?;
//! ```

mod options;
mod orchestrator;
mod poller;
mod prober;
mod result;
mod retry;
mod use_case;

pub use options::{DeployOptions, OrchestratorSettings, DEFAULT_SESSION_NAME};
pub use orchestrator::Orchestrator;
pub use poller::{OperationPoller, PollOutcome};
pub use prober::ExistenceProber;
pub use result::{DeployReport, UnitAction};
pub use retry::ConflictRetry;
pub use use_case::DeployUseCase;
