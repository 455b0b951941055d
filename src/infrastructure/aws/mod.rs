//! AWS adapters
//!
//! Implementations of the credential, control-plane and publisher ports
//! on top of the `aws` command line client.

mod cli;
mod cloudformation;
mod errors;
mod publisher;
mod sts;

pub use cli::{parse_error_output, AwsCli, AwsCliError};
pub use cloudformation::{CloudFormationClient, CloudFormationConnector};
pub use errors::control_plane_error;
pub use publisher::{CloudFormationPublisher, CodeUriRewriter, PublisherSettings};
pub use sts::StsCredentialProvider;
