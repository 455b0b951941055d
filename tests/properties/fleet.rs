//! Property tests for fleet construction and partitioning.

use std::collections::HashSet;

use proptest::prelude::*;

use stackfleet::domain::services::Partition;
use stackfleet::{Target, TargetFleet};

fn account() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[0-9]{3}").unwrap()
}

fn region() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("us-east-1".to_string()),
        Just("us-west-2".to_string()),
        Just("eu-west-1".to_string()),
        Just("ap-southeast-2".to_string()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the fleet is the cross product of the distinct inputs.
    #[test]
    fn property_fleet_deduplicates_inputs(
        accounts in proptest::collection::vec(account(), 1..8),
        regions in proptest::collection::vec(region(), 1..6),
    ) {
        let fleet = TargetFleet::new(&accounts, &regions).unwrap();

        let distinct_accounts: HashSet<&String> = accounts.iter().collect();
        let distinct_regions: HashSet<&String> = regions.iter().collect();
        prop_assert_eq!(fleet.accounts().len(), distinct_accounts.len());
        prop_assert_eq!(fleet.regions().len(), distinct_regions.len());
        prop_assert_eq!(fleet.len(), distinct_accounts.len() * distinct_regions.len());

        let targets: Vec<Target> = fleet.targets().collect();
        let unique: HashSet<&Target> = targets.iter().collect();
        prop_assert_eq!(unique.len(), targets.len());
        prop_assert_eq!(fleet.accounts()[0].as_str(), accounts[0].as_str());
    }

    /// PROPERTY: every target lands in exactly one half, in fleet order.
    #[test]
    fn property_partition_is_exact_and_disjoint(
        accounts in proptest::collection::vec(account(), 1..6),
        regions in proptest::collection::vec(region(), 1..4),
        flags in proptest::collection::vec(any::<bool>(), 24),
    ) {
        let fleet = TargetFleet::new(&accounts, &regions).unwrap();
        let probes: Vec<(Target, bool)> = fleet
            .targets()
            .zip(flags.iter().cycle().copied())
            .collect();

        let partition = Partition::from_probes(probes.clone());

        prop_assert_eq!(partition.len(), fleet.len());
        let expected_new: Vec<Target> = probes.iter().filter(|(_, e)| !e).map(|(t, _)| t.clone()).collect();
        let expected_existing: Vec<Target> = probes.iter().filter(|(_, e)| *e).map(|(t, _)| t.clone()).collect();
        prop_assert_eq!(&partition.new_targets, &expected_new);
        prop_assert_eq!(&partition.existing_targets, &expected_existing);

        let new: HashSet<&Target> = partition.new_targets.iter().collect();
        prop_assert!(partition.existing_targets.iter().all(|t| !new.contains(t)));
    }
}
