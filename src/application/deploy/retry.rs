//! Conflict retry
//!
//! Re-issues a mutating call that was rejected because another operation
//! holds the unit. Fixed backoff, bounded attempts. Every other rejection is
//! handed back to the caller untouched.

use std::time::Duration;

use crate::domain::ports::{ControlPlaneResult, DeployEvent, DeployEventSink, Sleeper};
use crate::domain::value_objects::DeployAction;
use crate::error::{StackfleetError, StackfleetResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictRetry {
    max_attempts: u32,
    backoff: Duration,
}

impl ConflictRetry {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run `call` until it is not rejected with "operation in progress"
    ///
    /// The outer error is retry exhaustion; the inner result is the last
    /// answer of the control plane.
    pub fn run<T, S, F>(
        &self,
        action: DeployAction,
        sleeper: &S,
        events: &dyn DeployEventSink,
        mut call: F,
    ) -> StackfleetResult<ControlPlaneResult<T>>
    where
        S: Sleeper,
        F: FnMut() -> ControlPlaneResult<T>,
    {
        let mut attempt = 1;
        loop {
            match call() {
                Err(e) if e.is_in_progress() => {
                    if attempt >= self.max_attempts {
                        return Err(StackfleetError::ConflictRetriesExhausted {
                            action,
                            attempts: attempt,
                        });
                    }
                    events.on_event(DeployEvent::ConflictRetry {
                        action,
                        attempt,
                        max_attempts: self.max_attempts,
                        wait: self.backoff,
                    });
                    sleeper.sleep(self.backoff);
                    attempt += 1;
                }
                other => return Ok(other),
            }
        }
    }
}
