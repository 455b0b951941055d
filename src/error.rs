//! Error types for stackfleet
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::entities::OperationResultSummary;
use crate::domain::ports::{ControlPlaneError, CredentialError, PublishError};
use crate::domain::value_objects::{DeployAction, FleetError, OperationId, OperationStatus};

/// Result type alias for stackfleet operations
pub type StackfleetResult<T> = Result<T, StackfleetError>;

/// Coarse error classes, stable for callers and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Precondition,
    Configuration,
    Authorization,
    Transient,
    Remote,
    OperationFailed,
    ConflictRetriesExhausted,
    PollTimeout,
    Publish,
    Io,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Precondition => "precondition",
            Self::Configuration => "configuration",
            Self::Authorization => "authorization",
            Self::Transient => "transient",
            Self::Remote => "remote",
            Self::OperationFailed => "operation_failed",
            Self::ConflictRetriesExhausted => "conflict_retries_exhausted",
            Self::PollTimeout => "poll_timeout",
            Self::Publish => "publish",
            Self::Io => "io",
        }
    }
}

/// Main error type for stackfleet operations
#[derive(Error, Debug)]
pub enum StackfleetError {
    /// Required configuration missing; raised before any remote call
    #[error("missing required configuration: {}", .missing.join(", "))]
    Precondition { missing: Vec<String> },

    /// Config file could not be parsed
    #[error("invalid config {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    /// A single configuration value is malformed
    #[error("invalid value '{value}' for {key}: {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },

    #[error("invalid target fleet: {0}")]
    Fleet(#[from] FleetError),

    #[error("role assumption failed: {0}")]
    Credentials(#[from] CredentialError),

    /// A control-plane call was rejected outside the tolerated races
    #[error("{call} failed: {source}")]
    RemoteCall {
        call: &'static str,
        #[source]
        source: ControlPlaneError,
    },

    /// An accepted operation terminated unsuccessfully
    #[error("operation {operation_id} on {unit} finished {status}: {}", .reason.as_deref().unwrap_or("no reason reported"))]
    OperationFailed {
        unit: String,
        operation_id: OperationId,
        status: OperationStatus,
        reason: Option<String>,
        failures: Vec<OperationResultSummary>,
    },

    /// Every attempt was rejected because another operation held the unit
    #[error("{action} still blocked by another operation after {attempts} attempts")]
    ConflictRetriesExhausted { action: DeployAction, attempts: u32 },

    /// Operation still running after the configured number of polls
    #[error("operation {operation_id} not finished after {polls} polls")]
    PollTimeout { operation_id: OperationId, polls: u32 },

    #[error("publishing template failed: {0}")]
    Publish(#[from] PublishError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StackfleetError {
    pub fn remote(call: &'static str, source: ControlPlaneError) -> Self {
        Self::RemoteCall { call, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Precondition { .. } => ErrorKind::Precondition,
            Self::InvalidConfig { .. } | Self::InvalidValue { .. } | Self::Fleet(_) => {
                ErrorKind::Configuration
            }
            Self::Credentials(CredentialError::Denied { .. }) => ErrorKind::Authorization,
            Self::Credentials(CredentialError::Unavailable(_)) => ErrorKind::Remote,
            Self::RemoteCall { source, .. } => match source {
                ControlPlaneError::Unauthorized { .. } => ErrorKind::Authorization,
                ControlPlaneError::Transient { .. } => ErrorKind::Transient,
                _ => ErrorKind::Remote,
            },
            Self::OperationFailed { .. } => ErrorKind::OperationFailed,
            Self::ConflictRetriesExhausted { .. } => ErrorKind::ConflictRetriesExhausted,
            Self::PollTimeout { .. } => ErrorKind::PollTimeout,
            Self::Publish(_) => ErrorKind::Publish,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Per-target failures attached to a failed operation, if any
    pub fn failures(&self) -> &[OperationResultSummary] {
        match self {
            Self::OperationFailed { failures, .. } => failures,
            _ => &[],
        }
    }
}
