//! Scenario: deploying again, and growing the fleet.

use super::first_deploy::{project, run};

#[test]
fn second_deploy_only_updates() {
    let (env, fake) = project();

    let first = run(&env, &fake, &["deploy"], &[]);
    assert!(first.is_success(), "{}", first.combined_output());
    let second = run(&env, &fake, &["deploy"], &[]);
    assert!(second.is_success(), "{}", second.combined_output());

    assert_eq!(fake.count("cloudformation create-stack-set"), 1);
    assert_eq!(fake.count("cloudformation create-stack-instances"), 1);
    assert_eq!(fake.count("cloudformation update-stack-set"), 1);
    assert_eq!(fake.count("cloudformation update-stack-instances"), 1);

    let update_set = fake
        .calls()
        .into_iter()
        .find(|c| c.starts_with("cloudformation update-stack-set"))
        .unwrap();
    assert!(update_set.contains("--operation-id UpdateTemplate-"));
    assert!(second.stdout.contains("2 instances updated"), "{}", second.stdout);
}

#[test]
fn new_region_is_created_while_existing_targets_are_updated() {
    let (env, fake) = project();

    let first = run(&env, &fake, &["deploy"], &[]);
    assert!(first.is_success(), "{}", first.combined_output());

    let second = run(&env, &fake, &["deploy", "--regions", "us-east-1,eu-west-1"], &[]);
    assert!(second.is_success(), "{}", second.combined_output());

    let calls = fake.calls();
    let create = calls
        .iter()
        .filter(|c| c.starts_with("cloudformation create-stack-instances"))
        .last()
        .unwrap();
    assert!(create.contains("--regions eu-west-1"), "{create}");
    let update = calls
        .iter()
        .find(|c| c.starts_with("cloudformation update-stack-instances"))
        .unwrap();
    assert!(update.contains("--regions us-east-1"), "{update}");
    assert!(update.contains("--operation-id Update-"), "{update}");
}
