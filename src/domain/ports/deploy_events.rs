//! Deploy Event Port
//!
//! Provides an observable interface for package and deploy runs.
//! Enables progress reporting, JSON event streams, and debugging.
//! Events never carry credentials.

use std::time::Duration;

use crate::domain::entities::OperationResultSummary;
use crate::domain::value_objects::{
    DeployAction, DeployPhase, OperationId, OperationStatus, Target,
};

/// Event emitted during package and deploy runs
#[derive(Debug, Clone, PartialEq)]
pub enum DeployEvent {
    /// Role assumption requested
    Authenticating { role_arn: String, session_name: String },

    /// Packaging started for the whole fleet
    PackageStarted { unit_name: String, target_count: usize },

    /// Template packaged for one target
    TargetPackaged { target: Target },

    /// Final template uploaded
    TemplateUploaded { url: String, digest: String },

    /// Upload skipped, identical content already uploaded in this run
    TemplateUnchanged { target: Target },

    /// Orchestrator moved to a new phase
    PhaseEntered { phase: DeployPhase },

    /// Existence probe of the deployment unit finished
    UnitProbed { name: String, exists: bool },

    /// Existence probe of one instance finished
    InstanceProbed { target: Target, exists: bool },

    /// Fleet split into new and existing targets
    Partitioned {
        new_targets: usize,
        existing_targets: usize,
    },

    /// A mutating call was accepted
    OperationStarted {
        action: DeployAction,
        operation_id: OperationId,
    },

    /// A mutating call completed synchronously
    ActionApplied { action: DeployAction },

    /// One poll of a running operation
    OperationPolled {
        operation_id: OperationId,
        status: OperationStatus,
        poll: u32,
    },

    /// Operation reached `SUCCEEDED`
    OperationSucceeded { operation_id: OperationId },

    /// Call rejected because another operation holds the unit; retrying
    ConflictRetry {
        action: DeployAction,
        attempt: u32,
        max_attempts: u32,
        wait: Duration,
    },

    /// A probe-then-act race was resolved without failing the run
    RaceTolerated { action: DeployAction, detail: String },

    /// Per-target "already exists" failure accepted as benign
    BenignConflict {
        operation_id: OperationId,
        summary: OperationResultSummary,
    },

    /// Per-target failure of a fatal operation
    TargetFailed {
        operation_id: OperationId,
        summary: OperationResultSummary,
    },

    /// Deploy run finished successfully
    Completed {
        created: usize,
        updated: usize,
        conflicts: usize,
    },
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - ConsoleEventSink: Progress display in terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);

    /// Check if this sink wants detailed events (per-target probes, polls)
    ///
    /// Some sinks (like CI) may only want summary events.
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {
        // Do nothing
    }

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
