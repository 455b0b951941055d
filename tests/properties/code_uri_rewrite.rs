//! Property tests for the packaged-template CodeUri rewrite.

use proptest::prelude::*;

use stackfleet::infrastructure::aws::CodeUriRewriter;

const PREFIX: &str = "acme-deploy";

fn rewrite_code_uris(template: &str) -> String {
    CodeUriRewriter::new(PREFIX)
        .unwrap()
        .rewrite(template)
        .into_owned()
}

fn code_uri_line() -> impl Strategy<Value = String> {
    (
        "[0-9]{12}",
        prop_oneof![Just("us-east-1"), Just("eu-west-1")],
        "[a-z0-9]{1,8}/[a-f0-9]{8,16}",
    )
        .prop_map(|(account, region, key)| {
            format!("      CodeUri: s3://{PREFIX}-{account}-{region}/{key}\n")
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: rewriting never panics and is idempotent.
    #[test]
    fn property_rewrite_is_idempotent(template in ".{0,200}") {
        let once = rewrite_code_uris(&template);
        prop_assert_eq!(rewrite_code_uris(&once), once);
    }

    /// PROPERTY: every staging reference becomes account/region neutral.
    #[test]
    fn property_staging_references_are_all_rewritten(
        lines in proptest::collection::vec(code_uri_line(), 1..6),
    ) {
        let template = format!("Resources:\n{}", lines.concat());

        let rewritten = rewrite_code_uris(&template);

        prop_assert!(!rewritten.contains("s3://"));
        prop_assert_eq!(rewritten.matches("${AWS::AccountId}-${AWS::Region}").count(), lines.len());
    }

    /// PROPERTY: buckets that merely share the prefix are never touched.
    #[test]
    fn property_non_staging_buckets_are_untouched(
        suffix in "[a-z]{1,12}(-[a-z]{1,8})?",
        key in "[a-z0-9]{1,8}\\.zip",
    ) {
        let template = format!("      CodeUri: s3://{PREFIX}-{suffix}/{key}\n");
        prop_assert_eq!(rewrite_code_uris(&template), template);
    }
}
