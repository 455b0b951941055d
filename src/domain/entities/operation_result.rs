//! Operation outcome entities

use std::fmt;

use crate::domain::value_objects::{AccountId, OperationStatus, Region, Target};

/// Current state of an operation as reported by the control plane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescription {
    pub status: OperationStatus,
    pub status_reason: Option<String>,
}

impl OperationDescription {
    pub fn new(status: OperationStatus) -> Self {
        Self {
            status,
            status_reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.status_reason = Some(reason.into());
        self
    }
}

/// Per-target outcome of a finished operation
///
/// Only used to explain failures; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResultSummary {
    pub account: AccountId,
    pub region: Region,
    /// Raw per-target status (`SUCCEEDED`, `FAILED`, `CANCELLED`, ...)
    pub status: String,
    pub status_reason: Option<String>,
}

impl OperationResultSummary {
    pub fn new(
        account: impl Into<AccountId>,
        region: impl Into<Region>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            region: region.into(),
            status: status.into(),
            status_reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.status_reason = Some(reason.into());
        self
    }

    pub fn target(&self) -> Target {
        Target {
            account: self.account.clone(),
            region: self.region.clone(),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.status.eq_ignore_ascii_case("SUCCEEDED")
    }

    /// Anything short of `SUCCEEDED` (`FAILED`, `CANCELLED`, ...)
    pub fn is_failed(&self) -> bool {
        !self.succeeded()
    }

    pub fn reason(&self) -> &str {
        self.status_reason.as_deref().unwrap_or("no reason reported")
    }
}

impl fmt::Display for OperationResultSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "account {} region {}: {} ({})",
            self.account,
            self.region,
            self.status,
            self.reason()
        )
    }
}
