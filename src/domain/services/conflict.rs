//! Conflict classification
//!
//! Maps the free-text reason of a failed operation to a [`ConflictKind`].
//! Matching is case-insensitive against a fixed pattern table; anything the
//! table does not recognise is [`ConflictKind::Unclassified`] and therefore
//! fatal.

use crate::domain::entities::OperationResultSummary;

/// What a failure reason says about the failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// The resource was already created by someone else (benign race)
    AlreadyExists,
    /// Another operation holds the unit (retryable)
    OperationInProgress,
    /// Not a known conflict; fatal
    Unclassified,
}

impl ConflictKind {
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::AlreadyExists)
    }
}

/// Lowercased substrings and the kind they indicate, checked in order
const PATTERNS: &[(&str, ConflictKind)] = &[
    ("already exists", ConflictKind::AlreadyExists),
    ("alreadyexists", ConflictKind::AlreadyExists),
    ("operationinprogress", ConflictKind::OperationInProgress),
    ("operation in progress", ConflictKind::OperationInProgress),
    ("another operation is in progress", ConflictKind::OperationInProgress),
    ("operation is currently in progress", ConflictKind::OperationInProgress),
];

/// Classify a single failure reason
pub fn classify(reason: &str) -> ConflictKind {
    let lowered = reason.to_lowercase();
    PATTERNS
        .iter()
        .find(|(pattern, _)| lowered.contains(pattern))
        .map(|(_, kind)| *kind)
        .unwrap_or(ConflictKind::Unclassified)
}

/// Classify a terminated operation from its own reason and its per-target results
///
/// When per-target results are present they decide: the failure is benign
/// only if every target that did not succeed reports an "already exists"
/// reason. The operation reason is used alone only when no target reported
/// a failure.
pub fn classify_failure(
    operation_reason: Option<&str>,
    summaries: &[OperationResultSummary],
) -> ConflictKind {
    let mut failed = summaries.iter().filter(|s| s.is_failed()).peekable();
    if failed.peek().is_none() {
        return operation_reason
            .map(classify)
            .unwrap_or(ConflictKind::Unclassified);
    }
    if failed.all(|s| classify(s.reason()) == ConflictKind::AlreadyExists) {
        ConflictKind::AlreadyExists
    } else {
        ConflictKind::Unclassified
    }
}
