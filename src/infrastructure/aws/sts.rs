//! STS credential provider
//!
//! `aws sts assume-role` with the caller's ambient identity. The returned
//! credentials are never written anywhere.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::entities::CredentialSet;
use crate::domain::ports::{CredentialError, CredentialProvider};

use super::cli::AwsCli;
use super::errors::is_authorization_code;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AssumeRoleOutput {
    credentials: AssumedCredentials,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AssumedCredentials {
    access_key_id: String,
    secret_access_key: String,
    session_token: String,
    expiration: Option<String>,
}

impl std::fmt::Debug for AssumedCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssumedCredentials")
            .field("expiration", &self.expiration)
            .finish_non_exhaustive()
    }
}

pub struct StsCredentialProvider {
    cli: AwsCli,
}

impl StsCredentialProvider {
    pub fn new(cli: AwsCli) -> Self {
        Self { cli }
    }
}

impl CredentialProvider for StsCredentialProvider {
    fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
    ) -> Result<CredentialSet, CredentialError> {
        let output: AssumeRoleOutput = self
            .cli
            .run_json([
                "sts",
                "assume-role",
                "--role-arn",
                role_arn,
                "--role-session-name",
                session_name,
            ])
            .map_err(|e| match e.code() {
                Some(code) if is_authorization_code(code) => CredentialError::Denied {
                    role_arn: role_arn.to_string(),
                    message: e.message(),
                },
                _ => CredentialError::Unavailable(e.to_string()),
            })?;

        let creds = output.credentials;
        let mut set = CredentialSet::new(
            creds.access_key_id,
            creds.secret_access_key,
            creds.session_token,
        );
        if let Some(expiration) = creds
            .expiration
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        {
            set = set.with_expiration(expiration.with_timezone(&Utc));
        }
        Ok(set)
    }
}
