//! JSON Event Sink
//!
//! Outputs package and deploy events as NDJSON for CI/automation consumption.

use crate::domain::entities::OperationResultSummary;
use crate::domain::ports::{DeployEvent, DeployEventSink};
use crate::domain::value_objects::Target;
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    command: &'static str,
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout(command: &'static str) -> Self {
        Self::with_writer(command, io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(command: &'static str, writer: W) -> Self {
        Self {
            command,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, mut event: serde_json::Value) {
        if let Some(object) = event.as_object_mut() {
            object.insert("command".to_string(), self.command.into());
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

fn target_json(target: &Target) -> serde_json::Value {
    serde_json::json!({
        "account": target.account.as_str(),
        "region": target.region.as_str(),
    })
}

fn summary_json(summary: &OperationResultSummary) -> serde_json::Value {
    serde_json::json!({
        "account": summary.account.as_str(),
        "region": summary.region.as_str(),
        "status": summary.status,
        "reason": summary.status_reason,
    })
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        let json = match event {
            DeployEvent::Authenticating {
                role_arn,
                session_name,
            } => serde_json::json!({
                "event": "authenticating",
                "role_arn": role_arn,
                "session_name": session_name,
            }),

            DeployEvent::PackageStarted {
                unit_name,
                target_count,
            } => serde_json::json!({
                "event": "package_start",
                "unit": unit_name,
                "target_count": target_count,
            }),

            DeployEvent::TargetPackaged { target } => serde_json::json!({
                "event": "target_packaged",
                "target": target_json(&target),
            }),

            DeployEvent::TemplateUploaded { url, digest } => serde_json::json!({
                "event": "template_uploaded",
                "url": url,
                "digest": digest,
            }),

            DeployEvent::TemplateUnchanged { target } => serde_json::json!({
                "event": "template_unchanged",
                "target": target_json(&target),
            }),

            DeployEvent::PhaseEntered { phase } => serde_json::json!({
                "event": "phase",
                "phase": phase.as_str(),
            }),

            DeployEvent::UnitProbed { name, exists } => serde_json::json!({
                "event": "unit_probed",
                "unit": name,
                "exists": exists,
            }),

            DeployEvent::InstanceProbed { target, exists } => serde_json::json!({
                "event": "instance_probed",
                "target": target_json(&target),
                "exists": exists,
            }),

            DeployEvent::Partitioned {
                new_targets,
                existing_targets,
            } => serde_json::json!({
                "event": "partitioned",
                "new": new_targets,
                "existing": existing_targets,
            }),

            DeployEvent::OperationStarted {
                action,
                operation_id,
            } => serde_json::json!({
                "event": "operation_start",
                "action": action.as_str(),
                "operation_id": operation_id.as_str(),
            }),

            DeployEvent::ActionApplied { action } => serde_json::json!({
                "event": "action_applied",
                "action": action.as_str(),
            }),

            DeployEvent::OperationPolled {
                operation_id,
                status,
                poll,
            } => serde_json::json!({
                "event": "operation_poll",
                "operation_id": operation_id.as_str(),
                "status": status.as_str(),
                "poll": poll,
            }),

            DeployEvent::OperationSucceeded { operation_id } => serde_json::json!({
                "event": "operation_succeeded",
                "operation_id": operation_id.as_str(),
            }),

            DeployEvent::ConflictRetry {
                action,
                attempt,
                max_attempts,
                wait,
            } => serde_json::json!({
                "event": "conflict_retry",
                "action": action.as_str(),
                "attempt": attempt,
                "max_attempts": max_attempts,
                "wait_secs": wait.as_secs(),
            }),

            DeployEvent::RaceTolerated { action, detail } => serde_json::json!({
                "event": "race_tolerated",
                "action": action.as_str(),
                "detail": detail,
            }),

            DeployEvent::BenignConflict {
                operation_id,
                summary,
            } => serde_json::json!({
                "event": "benign_conflict",
                "operation_id": operation_id.as_str(),
                "result": summary_json(&summary),
            }),

            DeployEvent::TargetFailed {
                operation_id,
                summary,
            } => serde_json::json!({
                "event": "target_failed",
                "operation_id": operation_id.as_str(),
                "result": summary_json(&summary),
            }),

            DeployEvent::Completed {
                created,
                updated,
                conflicts,
            } => {
                let status = if conflicts == 0 {
                    "success"
                } else {
                    "success_with_conflicts"
                };
                serde_json::json!({
                    "event": "complete",
                    "status": status,
                    "created": created,
                    "updated": updated,
                    "conflicts": conflicts,
                })
            }
        };

        self.write_event(json);
    }

    fn wants_detailed_events(&self) -> bool {
        true // JSON mode wants all events
    }
}
