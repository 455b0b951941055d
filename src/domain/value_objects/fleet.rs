//! Target Fleet Value Objects
//!
//! A fleet is the cross-product of an ordered account list and an ordered
//! region list. Both lists are deduplicated (first occurrence wins) and must
//! be non-empty.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cloud account identifier (e.g. `"123456789012"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Region identifier (e.g. `"us-east-1"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Region {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One (account, region) pair of the fleet
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Target {
    pub account: AccountId,
    pub region: Region,
}

impl Target {
    pub fn new(account: impl Into<AccountId>, region: impl Into<Region>) -> Self {
        Self {
            account: account.into(),
            region: region.into(),
        }
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<String> for Region {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.account, self.region)
    }
}

/// Invalid fleet definition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FleetError {
    #[error("target fleet has no accounts")]
    NoAccounts,

    #[error("target fleet has no regions")]
    NoRegions,
}

/// Accounts × regions to converge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFleet {
    accounts: Vec<AccountId>,
    regions: Vec<Region>,
}

impl TargetFleet {
    /// Build a fleet from account and region lists.
    ///
    /// Entries are trimmed, blank entries are dropped and duplicates are
    /// removed while keeping the first occurrence.
    pub fn new<A, R>(
        accounts: impl IntoIterator<Item = A>,
        regions: impl IntoIterator<Item = R>,
    ) -> Result<Self, FleetError>
    where
        A: AsRef<str>,
        R: AsRef<str>,
    {
        let accounts: Vec<AccountId> = dedup_ordered(
            accounts
                .into_iter()
                .map(|a| a.as_ref().trim().to_string())
                .filter(|a| !a.is_empty())
                .map(AccountId::new),
        );
        let regions: Vec<Region> = dedup_ordered(
            regions
                .into_iter()
                .map(|r| r.as_ref().trim().to_string())
                .filter(|r| !r.is_empty())
                .map(Region::new),
        );

        if accounts.is_empty() {
            return Err(FleetError::NoAccounts);
        }
        if regions.is_empty() {
            return Err(FleetError::NoRegions);
        }

        Ok(Self { accounts, regions })
    }

    /// Parse comma-separated lists (`"111,222"`, `"us-east-1,eu-west-1"`)
    pub fn parse(accounts: &str, regions: &str) -> Result<Self, FleetError> {
        Self::new(accounts.split(','), regions.split(','))
    }

    pub fn accounts(&self) -> &[AccountId] {
        &self.accounts
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// All targets, account-major
    pub fn targets(&self) -> impl Iterator<Item = Target> + '_ {
        self.accounts.iter().flat_map(move |account| {
            self.regions.iter().map(move |region| Target {
                account: account.clone(),
                region: region.clone(),
            })
        })
    }

    pub fn len(&self) -> usize {
        self.accounts.len() * self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Remove duplicates, keeping the first occurrence of each item
pub(crate) fn dedup_ordered<T: Eq + Hash + Clone>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_dedups() {
        let fleet = TargetFleet::parse(" 111, 222,111 ,", "us-east-1,us-east-1").unwrap();
        assert_eq!(
            fleet.accounts(),
            &[AccountId::new("111"), AccountId::new("222")]
        );
        assert_eq!(fleet.regions(), &[Region::new("us-east-1")]);
        assert_eq!(fleet.len(), 2);
    }

    #[test]
    fn empty_accounts_rejected() {
        assert_eq!(
            TargetFleet::parse(" , ", "us-east-1"),
            Err(FleetError::NoAccounts)
        );
    }

    #[test]
    fn empty_regions_rejected() {
        assert_eq!(TargetFleet::parse("111", ""), Err(FleetError::NoRegions));
    }

    #[test]
    fn targets_are_account_major() {
        let fleet = TargetFleet::parse("111,222", "us-east-1,eu-west-1").unwrap();
        let targets: Vec<String> = fleet.targets().map(|t| t.to_string()).collect();
        assert_eq!(
            targets,
            vec![
                "111/us-east-1",
                "111/eu-west-1",
                "222/us-east-1",
                "222/eu-west-1"
            ]
        );
    }

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        assert_eq!(dedup_ordered(vec![3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }
}
