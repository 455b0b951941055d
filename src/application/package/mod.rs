//! Package Module
//!
//! Publishes the deployable template for a fleet. Used on its own by the
//! `package` command and as the first step of every deploy.

mod use_case;

pub use use_case::{PackageOptions, PackageUseCase};
