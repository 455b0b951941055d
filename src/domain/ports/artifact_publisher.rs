//! Artifact Publisher Port
//!
//! Packages the deployable template for every target and uploads it to a
//! well-known location. The orchestrator only relies on the returned URL
//! resolving to the template that was just published.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::entities::CredentialSet;
use crate::domain::ports::DeployEventSink;
use crate::domain::value_objects::{ContentHash, Target, TargetFleet};

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("template not found: {0}")]
    MissingTemplate(PathBuf),

    #[error("`{command}` failed for {target}: {message}")]
    PackageFailed {
        command: String,
        target: Target,
        message: String,
    },

    #[error("upload to {destination} failed: {message}")]
    UploadFailed {
        destination: String,
        message: String,
    },

    #[error("artifact bucket prefix '{prefix}' is unusable: {message}")]
    InvalidBucketPrefix { prefix: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What to publish
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub unit_name: String,
    pub fleet: TargetFleet,
}

/// Where the published template lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedTemplate {
    pub url: String,
    pub digest: ContentHash,
    pub packaged_targets: Vec<Target>,
    pub uploads: usize,
}

pub trait ArtifactPublisher {
    fn publish(
        &self,
        request: &PublishRequest,
        credentials: &CredentialSet,
        events: &dyn DeployEventSink,
    ) -> Result<PublishedTemplate, PublishError>;
}
