//! Deployment Orchestrator
//!
//! Converges one deployment unit and its instances across a target fleet:
//!
//! 1. `Init -> UnitResolved`: create or update the unit
//! 2. `UnitResolved -> InstancesPartitioned`: probe every target
//! 3. `InstancesPartitioned -> InstancesConverged`: create-batch, then update-batch
//! 4. `InstancesConverged -> Done`
//!
//! Any error moves the run to `Failed`. Probe-then-act races are tolerated by
//! swapping to the opposite action once; nothing is rolled back.

use chrono::Utc;

use crate::domain::entities::{DeploymentUnitSpec, InstanceBatch};
use crate::domain::ports::{
    ControlPlane, ControlPlaneError, DeployEvent, DeployEventSink, InstancesRequest,
    ResourceKind, Sleeper,
};
use crate::domain::services::Partition;
use crate::domain::value_objects::{DeployAction, DeployPhase, OperationId, TargetFleet};
use crate::error::{StackfleetError, StackfleetResult};

use super::options::OrchestratorSettings;
use super::poller::{OperationPoller, PollOutcome};
use super::prober::ExistenceProber;
use super::result::{DeployReport, UnitAction};
use super::retry::ConflictRetry;

/// Outcome of a create-unit attempt
enum CreateUnitOutcome {
    Created,
    /// Rejected because the unit already exists
    LostRace(ControlPlaneError),
}

pub struct Orchestrator<'a, C: ControlPlane, S: Sleeper> {
    client: &'a C,
    sleeper: &'a S,
    settings: &'a OrchestratorSettings,
    events: &'a dyn DeployEventSink,
    retry: ConflictRetry,
}

impl<'a, C: ControlPlane, S: Sleeper> Orchestrator<'a, C, S> {
    pub fn new(
        client: &'a C,
        sleeper: &'a S,
        settings: &'a OrchestratorSettings,
        events: &'a dyn DeployEventSink,
    ) -> Self {
        Self {
            client,
            sleeper,
            settings,
            events,
            retry: ConflictRetry::new(settings.conflict_max_attempts, settings.conflict_backoff),
        }
    }

    /// Converge `fleet` to `spec`
    pub fn run(
        &self,
        spec: &DeploymentUnitSpec,
        fleet: &TargetFleet,
    ) -> StackfleetResult<DeployReport> {
        let mut report = DeployReport::new(&spec.name);
        match self.converge(spec, fleet, &mut report) {
            Ok(()) => {
                self.events.on_event(DeployEvent::Completed {
                    created: report.created_targets.len(),
                    updated: report.updated_targets.len(),
                    conflicts: report.conflicts.len(),
                });
                Ok(report)
            }
            Err(e) => {
                self.enter(DeployPhase::Failed, &mut report);
                Err(e)
            }
        }
    }

    fn converge(
        &self,
        spec: &DeploymentUnitSpec,
        fleet: &TargetFleet,
        report: &mut DeployReport,
    ) -> StackfleetResult<()> {
        self.enter(DeployPhase::Init, report);
        let unit_action = self.resolve_unit(spec, report)?;
        report.unit_action = Some(unit_action);
        self.enter(DeployPhase::UnitResolved, report);

        let partition = self.partition(&spec.name, fleet)?;
        self.enter(DeployPhase::InstancesPartitioned, report);

        if !partition.new_targets.is_empty() {
            for batch in partition.create_batches() {
                self.create_instances(spec, &batch, report, true)?;
            }
        }
        if !partition.existing_targets.is_empty() {
            for batch in partition.update_batches() {
                self.update_instances(spec, &batch, report, true)?;
            }
        }
        self.enter(DeployPhase::InstancesConverged, report);

        self.enter(DeployPhase::Done, report);
        Ok(())
    }

    fn enter(&self, phase: DeployPhase, report: &mut DeployReport) {
        report.phase = phase;
        self.events.on_event(DeployEvent::PhaseEntered { phase });
    }

    fn poller(&self) -> OperationPoller<'_, C, S> {
        OperationPoller::new(
            self.client,
            self.sleeper,
            self.settings.poll_interval,
            self.settings.max_polls,
        )
    }

    fn tolerate(&self, action: DeployAction, detail: impl Into<String>) {
        self.events.on_event(DeployEvent::RaceTolerated {
            action,
            detail: detail.into(),
        });
    }

    /// Record and wait for an accepted operation
    fn follow(
        &self,
        action: DeployAction,
        operation_id: OperationId,
        unit_name: &str,
        report: &mut DeployReport,
    ) -> StackfleetResult<()> {
        self.events.on_event(DeployEvent::OperationStarted {
            action,
            operation_id: operation_id.clone(),
        });
        report.operations.push(operation_id.clone());
        if let PollOutcome::ContinueAfterConflict(conflicts) =
            self.poller()
                .await_completion(&operation_id, unit_name, self.events)?
        {
            report.conflicts.extend(conflicts);
        }
        Ok(())
    }

    // Phase 1

    fn resolve_unit(
        &self,
        spec: &DeploymentUnitSpec,
        report: &mut DeployReport,
    ) -> StackfleetResult<UnitAction> {
        let exists = ExistenceProber::new(self.client).unit_exists(&spec.name)?;
        self.events.on_event(DeployEvent::UnitProbed {
            name: spec.name.clone(),
            exists,
        });

        if exists {
            return self.update_unit(spec, report, true);
        }

        match self.create_unit(spec, report)? {
            CreateUnitOutcome::Created => Ok(UnitAction::Created),
            CreateUnitOutcome::LostRace(e) => {
                self.tolerate(
                    DeployAction::CreateUnit,
                    format!("unit created concurrently ({e}); updating instead"),
                );
                self.update_unit(spec, report, false)?;
                Ok(UnitAction::AdoptedAfterRace)
            }
        }
    }

    fn create_unit(
        &self,
        spec: &DeploymentUnitSpec,
        report: &mut DeployReport,
    ) -> StackfleetResult<CreateUnitOutcome> {
        let action = DeployAction::CreateUnit;
        let answer = self
            .retry
            .run(action, self.sleeper, self.events, || self.client.create_unit(spec))?;

        match answer {
            Ok(Some(operation_id)) => {
                self.follow(action, operation_id, &spec.name, report)?;
                Ok(CreateUnitOutcome::Created)
            }
            Ok(None) => {
                self.events.on_event(DeployEvent::ActionApplied { action });
                Ok(CreateUnitOutcome::Created)
            }
            Err(e) if e.is_already_exists() => Ok(CreateUnitOutcome::LostRace(e)),
            Err(e) => Err(StackfleetError::remote(action.as_str(), e)),
        }
    }

    fn update_unit(
        &self,
        spec: &DeploymentUnitSpec,
        report: &mut DeployReport,
        allow_create_fallback: bool,
    ) -> StackfleetResult<UnitAction> {
        let action = DeployAction::UpdateUnit;
        let answer = self.retry.run(action, self.sleeper, self.events, || {
            let operation_id = OperationId::generate("UpdateTemplate", Utc::now());
            self.client
                .update_unit(spec, &self.settings.preferences, &operation_id)
        })?;

        match answer {
            Ok(operation_id) => {
                self.follow(action, operation_id, &spec.name, report)?;
                Ok(UnitAction::Updated)
            }
            Err(e) if e.is_not_found(ResourceKind::Instance) => {
                self.tolerate(action, "unit has no instances yet");
                Ok(UnitAction::Updated)
            }
            Err(e) if allow_create_fallback && e.is_not_found(ResourceKind::Unit) => {
                self.tolerate(action, "unit disappeared after probe; creating it");
                match self.create_unit(spec, report)? {
                    CreateUnitOutcome::Created => Ok(UnitAction::Created),
                    CreateUnitOutcome::LostRace(e) => {
                        Err(StackfleetError::remote(DeployAction::CreateUnit.as_str(), e))
                    }
                }
            }
            Err(e) => Err(StackfleetError::remote(action.as_str(), e)),
        }
    }

    // Phase 2

    fn partition(&self, unit_name: &str, fleet: &TargetFleet) -> StackfleetResult<Partition> {
        let prober = ExistenceProber::new(self.client);
        let probes = fleet
            .targets()
            .map(|target| -> StackfleetResult<_> {
                let exists = prober.instance_exists(unit_name, &target.account, &target.region)?;
                if self.events.wants_detailed_events() {
                    self.events.on_event(DeployEvent::InstanceProbed {
                        target: target.clone(),
                        exists,
                    });
                }
                Ok((target, exists))
            })
            .collect::<StackfleetResult<Vec<_>>>()?;

        let partition = Partition::from_probes(probes);
        self.events.on_event(DeployEvent::Partitioned {
            new_targets: partition.new_targets.len(),
            existing_targets: partition.existing_targets.len(),
        });
        Ok(partition)
    }

    // Phase 3

    fn create_instances(
        &self,
        spec: &DeploymentUnitSpec,
        batch: &InstanceBatch,
        report: &mut DeployReport,
        allow_swap: bool,
    ) -> StackfleetResult<()> {
        let action = DeployAction::CreateInstances;
        let request = InstancesRequest::for_batch(&spec.name, batch, self.settings.preferences)
            .with_parameter_overrides(spec.parameters.clone());
        let answer = self.retry.run(action, self.sleeper, self.events, || {
            self.client.create_instances(&request)
        })?;

        match answer {
            Ok(operation_id) => {
                self.follow(action, operation_id, &spec.name, report)?;
                report.created_targets.extend_from_slice(batch.targets());
                Ok(())
            }
            Err(e) if allow_swap && e.is_already_exists() => {
                self.tolerate(action, "instances created concurrently; updating instead");
                self.update_instances(spec, batch, report, false)
            }
            Err(e) => Err(StackfleetError::remote(action.as_str(), e)),
        }
    }

    fn update_instances(
        &self,
        spec: &DeploymentUnitSpec,
        batch: &InstanceBatch,
        report: &mut DeployReport,
        allow_swap: bool,
    ) -> StackfleetResult<()> {
        let action = DeployAction::UpdateInstances;
        let mut request = InstancesRequest::for_batch(&spec.name, batch, self.settings.preferences);
        if self.settings.reapply_parameters_on_update {
            request = request.with_parameter_overrides(spec.parameters.clone());
        }
        let answer = self.retry.run(action, self.sleeper, self.events, || {
            let request = request
                .clone()
                .with_operation_id(OperationId::generate("Update", Utc::now()));
            self.client.update_instances(&request)
        })?;

        match answer {
            Ok(operation_id) => {
                self.follow(action, operation_id, &spec.name, report)?;
                report.updated_targets.extend_from_slice(batch.targets());
                Ok(())
            }
            Err(e) if allow_swap && e.is_not_found(ResourceKind::Instance) => {
                self.tolerate(action, "instances removed concurrently; creating instead");
                self.create_instances(spec, batch, report, false)
            }
            Err(e) => Err(StackfleetError::remote(action.as_str(), e)),
        }
    }
}
