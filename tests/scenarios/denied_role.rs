//! Scenario: the caller may not assume the administration role.

use super::first_deploy::{project, run};

#[test]
fn denied_role_assumption_stops_before_any_stack_set_call() {
    let (env, fake) = project();

    let result = run(&env, &fake, &["deploy"], &[("FAKE_AWS_DENY", "1")]);

    assert!(!result.is_success());
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("not authorized"), "{}", result.stderr);
    assert_eq!(fake.count("cloudformation"), 0);
    assert!(fake.uploaded_template().is_none());
}

#[test]
fn denied_role_in_json_mode_reports_authorization_kind() {
    let (env, fake) = project();

    let result = run(&env, &fake, &["deploy", "--json"], &[("FAKE_AWS_DENY", "1")]);

    assert_eq!(result.exit_code, 1);
    let error: serde_json::Value = result
        .stdout
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
        .find(|event| event["event"] == "error")
        .expect("error event on stdout");
    assert_eq!(error["kind"], "authorization");
}
