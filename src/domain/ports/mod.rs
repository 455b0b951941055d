//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod artifact_publisher;
pub mod control_plane;
pub mod credential_provider;
pub mod deploy_events;
pub mod sleeper;

pub use artifact_publisher::{ArtifactPublisher, PublishError, PublishRequest, PublishedTemplate};
pub use control_plane::{
    ControlPlane, ControlPlaneConnector, ControlPlaneError, ControlPlaneResult,
    InstanceDescription, InstancesRequest, ResourceKind, UnitDescription,
};
pub use credential_provider::{CredentialError, CredentialProvider};
pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink};
pub use sleeper::Sleeper;
