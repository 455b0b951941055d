//! CloudFormation stack-set control plane
//!
//! Implements [`ControlPlane`] on top of `aws cloudformation`. Every call is
//! made as the stack-set owner (`--call-as SELF`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    CredentialSet, DeploymentUnitSpec, OperationDescription, OperationPreferences,
    OperationResultSummary,
};
use crate::domain::ports::{
    ControlPlane, ControlPlaneConnector, ControlPlaneResult, InstanceDescription,
    InstancesRequest, UnitDescription,
};
use crate::domain::value_objects::{AccountId, OperationId, OperationStatus, Region};

use super::cli::AwsCli;
use super::errors::control_plane_error;

const CALL_AS: [&str; 2] = ["--call-as", "SELF"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Parameter<'a> {
    parameter_key: &'a str,
    parameter_value: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Preferences {
    failure_tolerance_percentage: u8,
    max_concurrent_percentage: u8,
    region_concurrency_type: &'static str,
}

impl From<&OperationPreferences> for Preferences {
    fn from(prefs: &OperationPreferences) -> Self {
        Self {
            failure_tolerance_percentage: prefs.failure_tolerance_percentage,
            max_concurrent_percentage: prefs.max_concurrent_percentage,
            region_concurrency_type: prefs.region_concurrency.as_str(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeStackSetOutput {
    stack_set: StackSet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StackSet {
    stack_set_name: String,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeStackInstanceOutput {
    stack_instance: StackInstance,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StackInstance {
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OperationIdOutput {
    operation_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeOperationOutput {
    stack_set_operation: StackSetOperation,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StackSetOperation {
    status: String,
    status_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListResultsOutput {
    #[serde(default)]
    summaries: Vec<ResultSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResultSummary {
    account: String,
    region: String,
    status: String,
    status_reason: Option<String>,
}

fn parameters_json(parameters: &BTreeMap<String, String>) -> ControlPlaneResult<String> {
    let list: Vec<Parameter<'_>> = parameters
        .iter()
        .map(|(key, value)| Parameter {
            parameter_key: key,
            parameter_value: value,
        })
        .collect();
    to_json(&list)
}

fn to_json<T: Serialize>(value: &T) -> ControlPlaneResult<String> {
    serde_json::to_string(value).map_err(|e| control_plane_error(e.into()))
}

/// Control-plane client bound to one credential set
#[derive(Debug, Clone)]
pub struct CloudFormationClient {
    cli: AwsCli,
}

impl CloudFormationClient {
    pub fn new(cli: AwsCli) -> Self {
        Self { cli }
    }

    fn unit_args(&self, verb: &str, spec: &DeploymentUnitSpec) -> ControlPlaneResult<Vec<String>> {
        let mut args = vec![
            "cloudformation".to_string(),
            verb.to_string(),
            "--stack-set-name".to_string(),
            spec.name.clone(),
            "--template-url".to_string(),
            spec.template_url.clone(),
        ];
        if !spec.capabilities.is_empty() {
            args.push("--capabilities".to_string());
            args.extend(spec.capabilities.iter().map(|c| c.as_str().to_string()));
        }
        if !spec.parameters.is_empty() {
            args.push("--parameters".to_string());
            args.push(parameters_json(&spec.parameters)?);
        }
        args.extend([
            "--administration-role-arn".to_string(),
            spec.administration_role_arn.clone(),
            "--execution-role-name".to_string(),
            spec.execution_role_name.clone(),
            "--permission-model".to_string(),
            spec.permission_model.as_str().to_string(),
        ]);
        args.extend(CALL_AS.iter().map(|s| s.to_string()));
        Ok(args)
    }

    fn instances_args(&self, verb: &str, request: &InstancesRequest) -> ControlPlaneResult<Vec<String>> {
        let mut args = vec![
            "cloudformation".to_string(),
            verb.to_string(),
            "--stack-set-name".to_string(),
            request.unit_name.clone(),
            "--accounts".to_string(),
        ];
        args.extend(request.accounts.iter().map(AccountId::to_string));
        args.push("--regions".to_string());
        args.extend(request.regions.iter().map(Region::to_string));
        if !request.parameter_overrides.is_empty() {
            args.push("--parameter-overrides".to_string());
            args.push(parameters_json(&request.parameter_overrides)?);
        }
        args.push("--operation-preferences".to_string());
        args.push(to_json(&Preferences::from(&request.preferences))?);
        if let Some(id) = &request.operation_id {
            args.push("--operation-id".to_string());
            args.push(id.to_string());
        }
        args.extend(CALL_AS.iter().map(|s| s.to_string()));
        Ok(args)
    }
}

impl ControlPlane for CloudFormationClient {
    fn describe_unit(&self, name: &str) -> ControlPlaneResult<UnitDescription> {
        let output: DescribeStackSetOutput = self
            .cli
            .run_json(
                [
                    "cloudformation",
                    "describe-stack-set",
                    "--stack-set-name",
                    name,
                    "--call-as",
                    "SELF",
                ],
            )
            .map_err(control_plane_error)?;
        Ok(UnitDescription {
            name: output.stack_set.stack_set_name,
            status: output.stack_set.status,
        })
    }

    fn create_unit(&self, spec: &DeploymentUnitSpec) -> ControlPlaneResult<Option<OperationId>> {
        // CreateStackSet is synchronous; there is no operation to wait for
        self.cli
            .run(self.unit_args("create-stack-set", spec)?)
            .map_err(control_plane_error)?;
        Ok(None)
    }

    fn update_unit(
        &self,
        spec: &DeploymentUnitSpec,
        preferences: &OperationPreferences,
        operation_id: &OperationId,
    ) -> ControlPlaneResult<OperationId> {
        let mut args = self.unit_args("update-stack-set", spec)?;
        args.push("--operation-preferences".to_string());
        args.push(to_json(&Preferences::from(preferences))?);
        args.push("--operation-id".to_string());
        args.push(operation_id.to_string());

        let output: OperationIdOutput = self.cli.run_json(args).map_err(control_plane_error)?;
        Ok(OperationId::new(output.operation_id))
    }

    fn describe_instance(
        &self,
        unit_name: &str,
        account: &AccountId,
        region: &Region,
    ) -> ControlPlaneResult<InstanceDescription> {
        let output: DescribeStackInstanceOutput = self
            .cli
            .run_json(
                [
                    "cloudformation",
                    "describe-stack-instance",
                    "--stack-set-name",
                    unit_name,
                    "--stack-instance-account",
                    account.as_str(),
                    "--stack-instance-region",
                    region.as_str(),
                    "--call-as",
                    "SELF",
                ],
            )
            .map_err(control_plane_error)?;
        Ok(InstanceDescription {
            account: account.clone(),
            region: region.clone(),
            status: output.stack_instance.status,
        })
    }

    fn create_instances(&self, request: &InstancesRequest) -> ControlPlaneResult<OperationId> {
        let output: OperationIdOutput = self
            .cli
            .run_json(self.instances_args("create-stack-instances", request)?)
            .map_err(control_plane_error)?;
        Ok(OperationId::new(output.operation_id))
    }

    fn update_instances(&self, request: &InstancesRequest) -> ControlPlaneResult<OperationId> {
        let output: OperationIdOutput = self
            .cli
            .run_json(self.instances_args("update-stack-instances", request)?)
            .map_err(control_plane_error)?;
        Ok(OperationId::new(output.operation_id))
    }

    fn describe_operation(
        &self,
        unit_name: &str,
        operation_id: &OperationId,
    ) -> ControlPlaneResult<OperationDescription> {
        let output: DescribeOperationOutput = self
            .cli
            .run_json(
                [
                    "cloudformation",
                    "describe-stack-set-operation",
                    "--stack-set-name",
                    unit_name,
                    "--operation-id",
                    operation_id.as_str(),
                    "--call-as",
                    "SELF",
                ],
            )
            .map_err(control_plane_error)?;
        let operation = output.stack_set_operation;
        let description = OperationDescription::new(OperationStatus::parse(&operation.status));
        Ok(match operation.status_reason {
            Some(reason) => description.with_reason(reason),
            None => description,
        })
    }

    fn list_operation_results(
        &self,
        unit_name: &str,
        operation_id: &OperationId,
    ) -> ControlPlaneResult<Vec<OperationResultSummary>> {
        let output: ListResultsOutput = self
            .cli
            .run_json(
                [
                    "cloudformation",
                    "list-stack-set-operation-results",
                    "--stack-set-name",
                    unit_name,
                    "--operation-id",
                    operation_id.as_str(),
                    "--call-as",
                    "SELF",
                ],
            )
            .map_err(control_plane_error)?;
        Ok(output
            .summaries
            .into_iter()
            .map(|s| {
                let summary = OperationResultSummary::new(s.account, s.region, s.status);
                match s.status_reason {
                    Some(reason) => summary.with_reason(reason),
                    None => summary,
                }
            })
            .collect())
    }
}

/// Builds [`CloudFormationClient`]s from assumed credentials
#[derive(Debug, Clone, Default)]
pub struct CloudFormationConnector {
    cli: AwsCli,
}

impl CloudFormationConnector {
    pub fn new(cli: AwsCli) -> Self {
        Self { cli }
    }
}

impl ControlPlaneConnector for CloudFormationConnector {
    type Client = CloudFormationClient;

    fn connect(&self, credentials: &CredentialSet) -> Self::Client {
        CloudFormationClient::new(self.cli.with_credentials(credentials))
    }
}
