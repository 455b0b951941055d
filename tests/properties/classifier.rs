//! Property tests for the failure reason classifier.

use proptest::prelude::*;

use stackfleet::domain::services::{classify, ConflictKind};

fn random_case(text: &str, flips: &[bool]) -> String {
    text.chars()
        .zip(flips.iter().cycle())
        .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: classification never panics on arbitrary text.
    #[test]
    fn property_classify_never_panics(reason in ".*") {
        let _ = classify(&reason);
    }

    /// PROPERTY: ASCII case never changes the classification.
    #[test]
    fn property_classify_ignores_ascii_case(reason in "[ -~]{0,80}") {
        prop_assert_eq!(classify(&reason), classify(&reason.to_ascii_uppercase()));
        prop_assert_eq!(classify(&reason), classify(&reason.to_ascii_lowercase()));
    }

    /// PROPERTY: an "already exists" reason is benign wherever it appears.
    #[test]
    fn property_already_exists_is_benign_in_any_context(
        prefix in "[a-zA-Z0-9 :.]{0,30}",
        suffix in "[a-zA-Z0-9 :.]{0,30}",
        flips in proptest::collection::vec(any::<bool>(), 1..16),
    ) {
        let reason = format!("{}{}{}", prefix, random_case("already exists", &flips), suffix);
        let kind = classify(&reason);
        prop_assert_eq!(kind, ConflictKind::AlreadyExists);
        prop_assert!(kind.is_benign());
    }
}
