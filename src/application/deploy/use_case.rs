//! Deploy Use Case
//!
//! Orchestrates the deployment flow:
//! 1. Publish the template (package use case)
//! 2. Assume the administration role
//! 3. Connect a control-plane client with those credentials
//! 4. Run the orchestrator state machine
//!
//! This use case is pure wiring - the state machine lives in `Orchestrator`.

use std::sync::Arc;

use crate::application::package::PackageUseCase;
use crate::domain::ports::{
    ArtifactPublisher, ControlPlaneConnector, CredentialProvider, DeployEvent, DeployEventSink,
    NoopEventSink, Sleeper,
};
use crate::error::StackfleetResult;

use super::options::DeployOptions;
use super::orchestrator::Orchestrator;
use super::result::DeployReport;

/// Deploy use case - publish, authenticate, converge
///
/// Parameterized by its ports so tests can substitute every remote party.
pub struct DeployUseCase<P, A, F, S>
where
    P: CredentialProvider,
    A: ArtifactPublisher,
    F: ControlPlaneConnector,
    S: Sleeper,
{
    pub(super) package: PackageUseCase<P, A>,
    pub(super) connector: F,
    sleeper: S,
}

impl<P, A, F, S> DeployUseCase<P, A, F, S>
where
    P: CredentialProvider,
    A: ArtifactPublisher,
    F: ControlPlaneConnector,
    S: Sleeper,
{
    pub fn new(package: PackageUseCase<P, A>, connector: F, sleeper: S) -> Self {
        Self {
            package,
            connector,
            sleeper,
        }
    }

    /// Execute the deploy use case
    pub fn execute(&self, options: &DeployOptions) -> StackfleetResult<DeployReport> {
        self.execute_with_events(options, Arc::new(NoopEventSink))
    }

    /// Execute the deploy use case with event reporting
    pub fn execute_with_events(
        &self,
        options: &DeployOptions,
        event_sink: Arc<dyn DeployEventSink>,
    ) -> StackfleetResult<DeployReport> {
        let events = event_sink.as_ref();
        let published = self.package.publish(&options.package_options(), events)?;

        events.on_event(DeployEvent::Authenticating {
            role_arn: options.administration_role_arn.clone(),
            session_name: options.session_name.clone(),
        });
        let credentials = self
            .package
            .credential_provider()
            .assume_role(&options.administration_role_arn, &options.session_name)?;
        let client = self.connector.connect(&credentials);

        let spec = options.unit_spec(&published.url);
        let mut report = Orchestrator::new(&client, &self.sleeper, &options.settings, events)
            .run(&spec, &options.fleet)?;
        report.template = Some(published);
        Ok(report)
    }
}
