//! Presentation Layer
//!
//! Creates use cases with infrastructure dependencies.
//!
//! ## Usage
//!
//! ```ignore
//! use stackfleet::presentation::factory;
//!
//! let use_case = factory::create_deploy_use_case(&config);
//! let report = use_case.execute(&config.deploy_options());
//! ```

pub mod factory;

pub use factory::{create_deploy_use_case, create_package_use_case};
