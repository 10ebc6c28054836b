//! Package metadata — one entry per documented package.

use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Unique identifier (e.g. "data-grid").
    pub id: String,

    /// Published name (e.g. "@quivly/data-grid").
    pub name: String,

    /// Semantic version string.
    pub version: String,

    pub status: PackageStatus,

    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageStatus {
    Prod,
    Proposed,
    Deprecated,
}

impl PackageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PackageStatus::Prod => "prod",
            PackageStatus::Proposed => "proposed",
            PackageStatus::Deprecated => "deprecated",
        }
    }
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prod" => Ok(PackageStatus::Prod),
            "proposed" => Ok(PackageStatus::Proposed),
            "deprecated" => Ok(PackageStatus::Deprecated),
            other => Err(CoreError::UnknownStatus(other.into())),
        }
    }
}
