//! Scenario: the first deploy of a new stack set to a fresh fleet.

use crate::common::*;

pub(crate) const TEMPLATE: &str = "\
Transform: AWS::Serverless-2016-10-31
Resources:
  ResizeFunction:
    Type: AWS::Serverless::Function
    Properties:
      CodeUri: ./src
      Handler: resize.handler
";

pub(crate) fn project() -> (TestEnv, FakeAws) {
    let env = TestEnv::new();
    env.write_project_file("cloudformation-stack-set.yml", TEMPLATE);
    (env, FakeAws::install())
}

pub(crate) fn run(env: &TestEnv, fake: &FakeAws, args: &[&str], extra: &[(&str, &str)]) -> TestResult {
    let fake_vars = fake.vars();
    let mut vars: Vec<(&str, &str)> = fleet_vars();
    vars.extend(fake_vars.iter().map(|(k, v)| (*k, v.as_str())));
    vars.extend_from_slice(extra);
    env.run(args, &vars)
}

#[test]
fn first_deploy_creates_stack_set_and_every_instance() {
    let (env, fake) = project();

    let result = run(&env, &fake, &["deploy"], &[]);

    assert!(result.is_success(), "deploy failed:\n{}", result.combined_output());
    assert_eq!(fake.count("cloudformation create-stack-set"), 1);
    assert_eq!(fake.count("cloudformation create-stack-instances"), 1);
    assert_eq!(fake.count("cloudformation update-stack-instances"), 0);
    assert_eq!(fake.count("cloudformation update-stack-set"), 0);

    let create = fake
        .calls()
        .into_iter()
        .find(|c| c.starts_with("cloudformation create-stack-instances"))
        .unwrap();
    assert!(create.contains("--accounts 111122223333 444455556666 --regions us-east-1"));
    assert!(create.contains("\"FailureTolerancePercentage\":0"));

    assert!(result.stdout.contains("Deployed image-resizer"), "{}", result.stdout);
    assert!(result.stdout.contains("2 instances created"), "{}", result.stdout);
}

#[test]
fn first_deploy_probes_everything_before_acting_on_instances() {
    let (env, fake) = project();

    let result = run(&env, &fake, &["deploy"], &[]);
    assert!(result.is_success(), "{}", result.combined_output());

    let calls = fake.calls();
    let last_probe = calls
        .iter()
        .rposition(|c| c.starts_with("cloudformation describe-stack-instance"))
        .unwrap();
    let first_instance_action = calls
        .iter()
        .position(|c| c.contains("-stack-instances"))
        .unwrap();
    assert!(last_probe < first_instance_action);
    assert_eq!(
        calls
            .iter()
            .filter(|c| c.starts_with("cloudformation describe-stack-instance"))
            .count(),
        2
    );
}

#[test]
fn first_deploy_uploads_a_region_neutral_template_with_assumed_credentials() {
    let (env, fake) = project();

    let result = run(&env, &fake, &["deploy"], &[]);
    assert!(result.is_success(), "{}", result.combined_output());

    let uploaded = fake.uploaded_template().expect("template uploaded");
    assert!(uploaded.contains(
        r#"CodeUri: {Bucket: !Sub "stackfleet-deploy-${AWS::AccountId}-${AWS::Region}", Key: "cloudformation/5d41402abc4b2a76"}"#
    ));
    assert!(!uploaded.contains("s3://"));
    assert_eq!(fake.upload_token().as_deref(), Some("fake-token"));

    let create_set = fake
        .calls()
        .into_iter()
        .find(|c| c.starts_with("cloudformation create-stack-set"))
        .unwrap();
    assert!(create_set
        .contains("--template-url https://s3.amazonaws.com/stackfleet-stack-sets/image-resizer.yml"));
    assert!(create_set.contains(r#""ParameterKey":"stage","ParameterValue":"dev""#));
}

#[test]
fn json_deploy_streams_ndjson_ending_in_complete() {
    let (env, fake) = project();

    let result = run(&env, &fake, &["deploy", "--json"], &[]);
    assert!(result.is_success(), "{}", result.combined_output());

    let events: Vec<serde_json::Value> = result
        .stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("every stdout line is JSON"))
        .collect();
    let last = events.last().unwrap();
    assert_eq!(last["event"], "complete");
    assert_eq!(last["status"], "success");
    assert_eq!(last["created"], 2);
    assert!(events.iter().all(|e| e["command"] == "deploy"));
    assert!(!result.stdout.contains("fake-secret"));
}
