use std::process::Command;

#[test]
fn test_help_lists_both_verbs() {
    let bin = env!("CARGO_BIN_EXE_stackfleet");

    let output = Command::new(bin).arg("--help").output().unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("package"), "help should list package; got:\n{}", stdout);
    assert!(stdout.contains("deploy"), "help should list deploy; got:\n{}", stdout);
}

#[test]
fn test_help_names_required_settings() {
    let bin = env!("CARGO_BIN_EXE_stackfleet");

    let output = Command::new(bin).arg("--help").output().unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("ENV, TARGET_ACCOUNTS, TARGET_REGIONS, STACK_SET_NAME, AWS_STACK_ADMIN_ARN"),
        "help should name the required settings; got:\n{}",
        stdout
    );
}

#[test]
fn test_deploy_help_lists_fleet_flags() {
    let bin = env!("CARGO_BIN_EXE_stackfleet");

    let output = Command::new(bin).args(["deploy", "--help"]).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in [
        "--env",
        "--accounts",
        "--regions",
        "--stack-set-name",
        "--admin-role-arn",
    ] {
        assert!(stdout.contains(flag), "missing {flag} in:\n{stdout}");
    }
}
