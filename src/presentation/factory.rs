//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use crate::application::{DeployUseCase, PackageUseCase};
use crate::config::DeployConfig;
use crate::infrastructure::{
    AwsCli, CloudFormationConnector, CloudFormationPublisher, StsCredentialProvider,
    ThreadSleeper,
};

/// Type alias for the concrete PackageUseCase with all dependencies
pub type ConcretePackageUseCase = PackageUseCase<StsCredentialProvider, CloudFormationPublisher>;

/// Type alias for the concrete DeployUseCase with all dependencies
pub type ConcreteDeployUseCase = DeployUseCase<
    StsCredentialProvider,
    CloudFormationPublisher,
    CloudFormationConnector,
    ThreadSleeper,
>;

fn aws_cli(config: &DeployConfig) -> AwsCli {
    AwsCli::new(&config.aws_cli)
}

/// Create a package use case backed by the `aws` CLI
pub fn create_package_use_case(config: &DeployConfig) -> ConcretePackageUseCase {
    let cli = aws_cli(config);
    PackageUseCase::new(
        StsCredentialProvider::new(cli.clone()),
        CloudFormationPublisher::new(cli, config.publisher.clone()),
    )
}

/// Create a deploy use case with all dependencies wired up
///
/// Every remote call goes through the `aws` CLI named in the config;
/// waits are served by the wall clock.
pub fn create_deploy_use_case(config: &DeployConfig) -> ConcreteDeployUseCase {
    DeployUseCase::new(
        create_package_use_case(config),
        CloudFormationConnector::new(aws_cli(config)),
        ThreadSleeper,
    )
}
