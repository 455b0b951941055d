//! Provider error codes
//!
//! Sorts the codes the CLI reports into the classes the orchestrator
//! reacts to. Unknown codes are fatal.

use crate::domain::ports::{ControlPlaneError, ResourceKind};

use super::cli::AwsCliError;

pub fn is_authorization_code(code: &str) -> bool {
    code.starts_with("AccessDenied")
        || code.starts_with("ExpiredToken")
        || matches!(
            code,
            "InvalidClientTokenId" | "UnrecognizedClientException" | "AuthFailure"
        )
}

pub fn is_transient_code(code: &str) -> bool {
    code.starts_with("Throttling")
        || matches!(
            code,
            "RequestLimitExceeded" | "ServiceUnavailable" | "InternalFailure" | "RequestTimeout"
        )
}

pub fn control_plane_error(err: AwsCliError) -> ControlPlaneError {
    let message = err.message();
    let Some(code) = err.code().map(str::to_string) else {
        let code = match err {
            AwsCliError::Spawn { .. } => "CliUnavailable",
            AwsCliError::InvalidOutput(_) => "InvalidResponse",
            AwsCliError::Failed { .. } => "Unknown",
        };
        return ControlPlaneError::Fatal {
            code: code.to_string(),
            message,
        };
    };

    match code.as_str() {
        "StackSetNotFoundException" => ControlPlaneError::NotFound {
            resource: ResourceKind::Unit,
            message,
        },
        "StackInstanceNotFoundException" => ControlPlaneError::NotFound {
            resource: ResourceKind::Instance,
            message,
        },
        "OperationNotFoundException" => ControlPlaneError::NotFound {
            resource: ResourceKind::Operation,
            message,
        },
        "NameAlreadyExistsException" | "AlreadyExistsException" | "CreatedButModifiedException" => {
            ControlPlaneError::AlreadyExists { message }
        }
        "OperationInProgressException" | "OperationIdAlreadyExistsException" => {
            ControlPlaneError::OperationInProgress { message }
        }
        c if is_authorization_code(c) => ControlPlaneError::Unauthorized { message },
        c if is_transient_code(c) => ControlPlaneError::Transient {
            code: code.clone(),
            message,
        },
        _ => ControlPlaneError::Fatal {
            code: code.clone(),
            message,
        },
    }
}
