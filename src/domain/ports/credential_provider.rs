//! Credential Provider Port
//!
//! Exchanges the caller's long-lived identity for short-lived credentials
//! scoped to a role and session name.

use thiserror::Error;

use crate::domain::entities::CredentialSet;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// The identity may not assume the role
    #[error("not authorized to assume {role_arn}: {message}")]
    Denied { role_arn: String, message: String },

    /// The exchange itself failed (tooling missing, malformed response, ...)
    #[error("could not obtain credentials: {0}")]
    Unavailable(String),
}

pub trait CredentialProvider {
    /// Assume `role_arn` under `session_name`. Never retried here.
    fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
    ) -> Result<CredentialSet, CredentialError>;
}
