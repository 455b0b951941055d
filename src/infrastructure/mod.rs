//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `aws/` - `aws` CLI backed credential provider, control plane and publisher
//! - `events/` - Event sinks (NDJSON)
//! - `sleep` - Wall-clock sleeper

pub mod aws;
pub mod events;
mod sleep;

// Re-export for convenience
pub use aws::{
    AwsCli, CloudFormationClient, CloudFormationConnector, CloudFormationPublisher,
    PublisherSettings, StsCredentialProvider,
};
pub use events::JsonEventSink;
pub use sleep::ThreadSleeper;
