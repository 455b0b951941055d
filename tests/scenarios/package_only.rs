//! Scenario: packaging without deploying.

use super::first_deploy::{project, run};

#[test]
fn package_never_touches_the_stack_set() {
    let (env, fake) = project();

    let result = run(&env, &fake, &["package"], &[]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert_eq!(fake.count("cloudformation package"), 2);
    assert_eq!(fake.count("cloudformation describe-stack-set"), 0);
    assert_eq!(fake.count("cloudformation create-stack-set"), 0);
    assert!(result.stdout.contains("Packaged image-resizer"), "{}", result.stdout);
}

#[test]
fn identical_rewritten_templates_are_uploaded_once() {
    let (env, fake) = project();

    let result = run(&env, &fake, &["package"], &[]);
    assert!(result.is_success(), "{}", result.combined_output());

    // Each account packages into its own bucket, but the rewritten
    // templates are identical
    let packages: Vec<String> = fake
        .calls()
        .into_iter()
        .filter(|c| c.starts_with("cloudformation package"))
        .collect();
    assert!(packages[0].contains("--s3-bucket stackfleet-deploy-111122223333-us-east-1"));
    assert!(packages[1].contains("--s3-bucket stackfleet-deploy-444455556666-us-east-1"));
    assert_eq!(fake.count("s3 cp"), 1);
}

#[test]
fn missing_template_fails_before_packaging() {
    let (env, fake) = project();
    std::fs::remove_file(env.project_path("cloudformation-stack-set.yml")).unwrap();

    let result = run(&env, &fake, &["package"], &[]);

    assert!(!result.is_success());
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("template not found"), "{}", result.stderr);
    assert_eq!(fake.count("cloudformation package"), 0);
}
