//! Capabilities and concurrency modes understood by the control plane

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Acknowledgement the control plane requires before it performs
/// elevated actions on behalf of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// `CAPABILITY_IAM`
    #[serde(rename = "CAPABILITY_IAM")]
    Iam,
    /// `CAPABILITY_NAMED_IAM`
    #[serde(rename = "CAPABILITY_NAMED_IAM")]
    NamedIam,
    /// `CAPABILITY_AUTO_EXPAND` (macros and nested transforms)
    #[serde(rename = "CAPABILITY_AUTO_EXPAND")]
    AutoExpand,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Iam => "CAPABILITY_IAM",
            Self::NamedIam => "CAPABILITY_NAMED_IAM",
            Self::AutoExpand => "CAPABILITY_AUTO_EXPAND",
        }
    }

    /// Capabilities a serverless stack set needs by default
    pub fn defaults() -> Vec<Capability> {
        vec![Self::NamedIam, Self::AutoExpand]
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        match normalized.trim_start_matches("CAPABILITY_") {
            "IAM" => Ok(Self::Iam),
            "NAMED_IAM" => Ok(Self::NamedIam),
            "AUTO_EXPAND" => Ok(Self::AutoExpand),
            _ => Err(format!("unknown capability '{}'", s)),
        }
    }
}

/// How the control plane walks regions within one operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionConcurrency {
    #[default]
    Sequential,
    Parallel,
}

impl RegionConcurrency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequential => "SEQUENTIAL",
            Self::Parallel => "PARALLEL",
        }
    }
}

impl FromStr for RegionConcurrency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "parallel" => Ok(Self::Parallel),
            _ => Err(format!("unknown region concurrency '{}'", s)),
        }
    }
}
