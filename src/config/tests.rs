//! Tests for the config module

use super::*;
use crate::domain::value_objects::{Capability, RegionConcurrency};
use crate::error::{ErrorKind, StackfleetError};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::tempdir;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

fn required_env() -> Vec<(&'static str, &'static str)> {
    vec![
        ("ENV", "dev"),
        ("TARGET_ACCOUNTS", "111122223333,444455556666"),
        ("TARGET_REGIONS", "us-east-1"),
        ("STACK_SET_NAME", "image-resizer"),
        ("AWS_STACK_ADMIN_ARN", "arn:aws:iam::999:role/admin"),
    ]
}

fn no_files() -> ConfigSources {
    ConfigSources::default()
}

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.target.environment, None);
    assert_eq!(config.target.session_name, "StackSetDeploymentSession");
    assert_eq!(config.template.parameter_key, "stage");
    assert_eq!(config.deploy.poll_interval_secs, 10);
    assert_eq!(config.deploy.conflict_max_attempts, 3);
    assert_eq!(config.deploy.conflict_backoff_secs, 30);
    assert!(config.deploy.reapply_parameters_on_update);
    assert_eq!(config.aws.cli_path, PathBuf::from("aws"));
}

#[test]
fn test_config_parse_toml() {
    let toml = r#"
[target]
environment = "prod"
accounts = ["111122223333", "444455556666"]
regions = "us-east-1, eu-west-1"
stack_set_name = "image-resizer"

[template]
template_bucket = "acme-templates"
capabilities = ["CAPABILITY_IAM"]

[deploy]
max_polls = 90
region_concurrency = "parallel"
reapply_parameters_on_update = false
"#;

    let config: Config = toml::from_str(toml).unwrap();

    assert_eq!(config.target.accounts.0.len(), 2);
    assert_eq!(config.target.regions.0, vec!["us-east-1", "eu-west-1"]);
    assert_eq!(config.template.capabilities, vec![Capability::Iam]);
    assert_eq!(config.deploy.max_polls, Some(90));
    assert_eq!(config.deploy.region_concurrency, RegionConcurrency::Parallel);
    assert!(!config.deploy.reapply_parameters_on_update);
}

#[test]
fn test_load_with_warnings_reports_unknown_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stackfleet.toml");
    fs::write(&path, "[deploy]\npoll_intervl_secs = 5\n").unwrap();

    let (config, warnings) = Config::load_with_warnings(&path).unwrap();

    assert_eq!(config.deploy.poll_interval_secs, 10);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "poll_intervl_secs");
    assert_eq!(warnings[0].line, Some(2));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("poll_interval_secs"));
    assert!(warnings[0].to_string().contains("did you mean 'poll_interval_secs'"));
}

#[test]
fn test_invalid_toml_is_config_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stackfleet.toml");
    fs::write(&path, "[deploy\n").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_project_file_overrides_user_file_key_by_key() {
    let dir = tempdir().unwrap();
    let user = dir.path().join("user.toml");
    let project = dir.path().join("stackfleet.toml");
    fs::write(
        &user,
        "[template]\ntemplate_bucket = \"user-bucket\"\nartifact_prefix = \"lambda\"\n",
    )
    .unwrap();
    fs::write(&project, "[template]\ntemplate_bucket = \"project-bucket\"\n").unwrap();

    let sources = ConfigSources {
        user_file: Some(user),
        project_file: Some(project),
        explicit: false,
    };
    let (config, warnings) = load_files(&sources).unwrap();

    assert!(warnings.is_empty());
    assert_eq!(config.template.template_bucket, "project-bucket");
    assert_eq!(config.template.artifact_prefix, "lambda");
}

#[test]
fn test_missing_default_project_file_is_skipped() {
    let dir = tempdir().unwrap();
    let sources = ConfigSources::discover(dir.path(), None);
    assert!(!sources.explicit);

    let sources = ConfigSources {
        user_file: None,
        ..sources
    };
    let (config, _) = load_files(&sources).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let sources = ConfigSources {
        user_file: None,
        project_file: Some(missing.clone()),
        explicit: true,
    };

    let err = load_files(&sources).unwrap_err();
    assert!(matches!(err, StackfleetError::InvalidConfig { path, .. } if path == missing));
}

#[test]
fn test_env_overrides_required_values() {
    let mut warn = Vec::new();
    let config = with_env_overrides(Config::default(), env_from(&required_env()), &mut warn);

    assert_eq!(config.target.environment.as_deref(), Some("dev"));
    assert_eq!(
        config.target.accounts.0,
        vec!["111122223333", "444455556666"]
    );
    assert_eq!(config.target.stack_set_name.as_deref(), Some("image-resizer"));
    assert!(warn.is_empty());
}

#[test]
fn test_blank_env_values_count_as_unset() {
    let mut config = Config::default();
    config.target.stack_set_name = Some("from-file".to_string());
    let mut warn = Vec::new();

    let config = with_env_overrides(config, env_from(&[("STACK_SET_NAME", "  ")]), &mut warn);

    assert_eq!(config.target.stack_set_name.as_deref(), Some("from-file"));
}

#[test]
fn test_env_tunables_are_parsed() {
    let mut warn = Vec::new();
    let config = with_env_overrides(
        Config::default(),
        env_from(&[
            ("STACKFLEET_POLL_INTERVAL_SECS", "2"),
            ("STACKFLEET_MAX_POLLS", "40"),
            ("STACKFLEET_CONFLICT_MAX_ATTEMPTS", "5"),
            ("STACKFLEET_CONFLICT_BACKOFF_SECS", "0"),
            ("STACKFLEET_REGION_CONCURRENCY", "PARALLEL"),
            ("STACKFLEET_REAPPLY_PARAMETERS", "false"),
            ("STACKFLEET_AWS_CLI", "/opt/aws/bin/aws"),
        ]),
        &mut warn,
    );

    assert_eq!(config.deploy.poll_interval_secs, 2);
    assert_eq!(config.deploy.max_polls, Some(40));
    assert_eq!(config.deploy.conflict_max_attempts, 5);
    assert_eq!(config.deploy.conflict_backoff_secs, 0);
    assert_eq!(config.deploy.region_concurrency, RegionConcurrency::Parallel);
    assert!(!config.deploy.reapply_parameters_on_update);
    assert_eq!(config.aws.cli_path, PathBuf::from("/opt/aws/bin/aws"));
    assert!(warn.is_empty());
}

#[test]
fn test_invalid_env_tunable_keeps_value_and_warns() {
    let mut warn = Vec::new();
    let config = with_env_overrides(
        Config::default(),
        env_from(&[
            ("STACKFLEET_MAX_POLLS", "0"),
            ("STACKFLEET_REGION_CONCURRENCY", "paralel"),
        ]),
        &mut warn,
    );

    assert_eq!(config.deploy.max_polls, None);
    assert_eq!(config.deploy.region_concurrency, RegionConcurrency::Sequential);
    let msg = String::from_utf8(warn).unwrap();
    assert!(msg.contains("STACKFLEET_MAX_POLLS"));
    assert!(msg.contains("Did you mean 'parallel'?"));
}

#[test]
fn test_cli_flags_win_over_environment() {
    let overrides = ConfigOverrides {
        environment: Some("prod".to_string()),
        regions: Some("eu-west-1,eu-central-1".to_string()),
        ..ConfigOverrides::default()
    };
    let mut warn = Vec::new();

    let (config, _) = load(&no_files(), &overrides, env_from(&required_env()), &mut warn).unwrap();

    assert_eq!(config.target.environment.as_deref(), Some("prod"));
    assert_eq!(config.target.regions.0, vec!["eu-west-1", "eu-central-1"]);
    assert_eq!(config.target.stack_set_name.as_deref(), Some("image-resizer"));
}

#[test]
fn test_resolve_lists_every_missing_value() {
    let err = Config::default().resolve().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Precondition);
    match err {
        StackfleetError::Precondition { missing } => assert_eq!(
            missing,
            vec![
                "ENV",
                "TARGET_ACCOUNTS",
                "TARGET_REGIONS",
                "STACK_SET_NAME",
                "AWS_STACK_ADMIN_ARN"
            ]
        ),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_resolve_reports_partial_gaps() {
    let mut warn = Vec::new();
    let env: Vec<_> = required_env()
        .into_iter()
        .filter(|(key, _)| *key != "TARGET_REGIONS")
        .collect();
    let config = with_env_overrides(Config::default(), env_from(&env), &mut warn);

    let err = config.resolve().unwrap_err();
    assert!(matches!(err, StackfleetError::Precondition { ref missing } if missing == &["TARGET_REGIONS"]));
}

#[test]
fn test_resolve_builds_run_configuration() {
    let mut warn = Vec::new();
    let mut config = with_env_overrides(Config::default(), env_from(&required_env()), &mut warn);
    config.deploy.max_polls = Some(60);

    let resolved = config.resolve().unwrap();

    assert_eq!(resolved.fleet.len(), 2);
    assert_eq!(resolved.parameters.get("stage").map(String::as_str), Some("dev"));
    assert_eq!(resolved.settings.poll_interval, Duration::from_secs(10));
    assert_eq!(resolved.settings.max_polls, Some(60));
    assert_eq!(resolved.settings.preferences.max_concurrent_percentage, 100);
    assert_eq!(
        resolved.publisher.template_url("image-resizer"),
        "https://s3.amazonaws.com/stackfleet-stack-sets/image-resizer.yml"
    );

    let options = resolved.deploy_options();
    assert_eq!(options.unit_name, "image-resizer");
    assert_eq!(options.parameters, resolved.parameters);
    assert_eq!(resolved.package_options().session_name, "StackSetDeploymentSession");
}

#[test]
fn test_resolve_rejects_out_of_range_percentages() {
    let mut warn = Vec::new();
    let mut config = with_env_overrides(Config::default(), env_from(&required_env()), &mut warn);
    config.deploy.failure_tolerance_percentage = 120;

    let err = config.resolve().unwrap_err();
    assert!(matches!(err, StackfleetError::InvalidValue { ref key, .. } if key == "deploy.failure_tolerance_percentage"));
}
