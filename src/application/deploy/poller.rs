//! Operation Poller
//!
//! Waits for an accepted operation to reach a terminal status. Waiting goes
//! through the [`Sleeper`] port; the loop is bounded when `max_polls` is set.

use std::time::Duration;

use crate::domain::entities::OperationResultSummary;
use crate::domain::ports::{ControlPlane, DeployEvent, DeployEventSink, Sleeper};
use crate::domain::services::classify_failure;
use crate::domain::value_objects::{OperationId, OperationStatus};
use crate::error::{StackfleetError, StackfleetResult};

/// Terminal outcome the orchestrator can proceed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Succeeded,
    /// Failed only because targets already existed; failed summaries attached
    ContinueAfterConflict(Vec<OperationResultSummary>),
}

pub struct OperationPoller<'a, C: ControlPlane, S: Sleeper> {
    client: &'a C,
    sleeper: &'a S,
    interval: Duration,
    max_polls: Option<u32>,
}

impl<'a, C: ControlPlane, S: Sleeper> OperationPoller<'a, C, S> {
    pub fn new(client: &'a C, sleeper: &'a S, interval: Duration, max_polls: Option<u32>) -> Self {
        Self {
            client,
            sleeper,
            interval,
            max_polls,
        }
    }

    pub fn await_completion(
        &self,
        operation_id: &OperationId,
        unit_name: &str,
        events: &dyn DeployEventSink,
    ) -> StackfleetResult<PollOutcome> {
        let mut polls: u32 = 0;
        loop {
            let description = self
                .client
                .describe_operation(unit_name, operation_id)
                .map_err(|e| StackfleetError::remote("describe-operation", e))?;
            polls += 1;

            if events.wants_detailed_events() {
                events.on_event(DeployEvent::OperationPolled {
                    operation_id: operation_id.clone(),
                    status: description.status.clone(),
                    poll: polls,
                });
            }

            match description.status {
                OperationStatus::Succeeded => {
                    events.on_event(DeployEvent::OperationSucceeded {
                        operation_id: operation_id.clone(),
                    });
                    return Ok(PollOutcome::Succeeded);
                }
                status if status.is_failure() => {
                    return self.settle_failure(
                        operation_id,
                        unit_name,
                        status,
                        description.status_reason,
                        events,
                    );
                }
                _ => {}
            }

            if self.max_polls.is_some_and(|max| polls >= max.max(1)) {
                return Err(StackfleetError::PollTimeout {
                    operation_id: operation_id.clone(),
                    polls,
                });
            }
            self.sleeper.sleep(self.interval);
        }
    }

    fn settle_failure(
        &self,
        operation_id: &OperationId,
        unit_name: &str,
        status: OperationStatus,
        reason: Option<String>,
        events: &dyn DeployEventSink,
    ) -> StackfleetResult<PollOutcome> {
        let summaries = self
            .client
            .list_operation_results(unit_name, operation_id)
            .map_err(|e| StackfleetError::remote("list-operation-results", e))?;
        let failures: Vec<OperationResultSummary> =
            summaries.iter().filter(|s| s.is_failed()).cloned().collect();

        if classify_failure(reason.as_deref(), &summaries).is_benign() {
            for summary in &failures {
                events.on_event(DeployEvent::BenignConflict {
                    operation_id: operation_id.clone(),
                    summary: summary.clone(),
                });
            }
            return Ok(PollOutcome::ContinueAfterConflict(failures));
        }

        for summary in &failures {
            events.on_event(DeployEvent::TargetFailed {
                operation_id: operation_id.clone(),
                summary: summary.clone(),
            });
        }
        Err(StackfleetError::OperationFailed {
            unit: unit_name.to_string(),
            operation_id: operation_id.clone(),
            status,
            reason,
            failures,
        })
    }
}
