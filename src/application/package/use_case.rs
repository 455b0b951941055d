//! Package Use Case
//!
//! 1. Assume the administration role
//! 2. Hand the fleet to the artifact publisher
//! 3. Return where the template now lives

use std::sync::Arc;

use crate::domain::ports::{
    ArtifactPublisher, CredentialProvider, DeployEvent, DeployEventSink, NoopEventSink,
    PublishRequest, PublishedTemplate,
};
use crate::domain::value_objects::TargetFleet;
use crate::error::StackfleetResult;

/// Options for the package use case
#[derive(Debug, Clone)]
pub struct PackageOptions {
    pub unit_name: String,
    pub fleet: TargetFleet,
    pub administration_role_arn: String,
    pub session_name: String,
}

pub struct PackageUseCase<P, A>
where
    P: CredentialProvider,
    A: ArtifactPublisher,
{
    credentials: P,
    publisher: A,
}

impl<P, A> PackageUseCase<P, A>
where
    P: CredentialProvider,
    A: ArtifactPublisher,
{
    pub fn new(credentials: P, publisher: A) -> Self {
        Self {
            credentials,
            publisher,
        }
    }

    pub fn credential_provider(&self) -> &P {
        &self.credentials
    }

    /// Execute the package use case
    pub fn execute(&self, options: &PackageOptions) -> StackfleetResult<PublishedTemplate> {
        self.execute_with_events(options, Arc::new(NoopEventSink))
    }

    /// Execute the package use case with event reporting
    pub fn execute_with_events(
        &self,
        options: &PackageOptions,
        event_sink: Arc<dyn DeployEventSink>,
    ) -> StackfleetResult<PublishedTemplate> {
        self.publish(options, event_sink.as_ref())
    }

    pub(crate) fn publish(
        &self,
        options: &PackageOptions,
        events: &dyn DeployEventSink,
    ) -> StackfleetResult<PublishedTemplate> {
        events.on_event(DeployEvent::Authenticating {
            role_arn: options.administration_role_arn.clone(),
            session_name: options.session_name.clone(),
        });
        let credentials = self
            .credentials
            .assume_role(&options.administration_role_arn, &options.session_name)?;

        events.on_event(DeployEvent::PackageStarted {
            unit_name: options.unit_name.clone(),
            target_count: options.fleet.len(),
        });
        let request = PublishRequest {
            unit_name: options.unit_name.clone(),
            fleet: options.fleet.clone(),
        };
        Ok(self.publisher.publish(&request, &credentials, events)?)
    }
}
