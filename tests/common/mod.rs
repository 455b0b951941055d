//! Common test utilities for stackfleet CLI and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project and home directories plus a CLI runner
//! - `FakeAws`: A scripted stand-in for the `aws` CLI (unix only)

pub mod env;
#[cfg(unix)]
pub mod fake_aws;

pub use env::*;
#[cfg(unix)]
pub use fake_aws::*;
