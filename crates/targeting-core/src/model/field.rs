//! Record attributes addressable by a condition

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field types a condition may test
///
/// The wire form is the SCREAMING_SNAKE_CASE name, which is also the key
/// used to look the value up on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    /// Stable user identifier
    Smid,
    /// Membership in an uploaded distribution list
    DistributionGroupsFile,
    Country,
    OperatingSystem,
    ClientVersion,
    Browser,
    InternetType,
    InternalTransition,
    CleCampaign,
}

impl FieldType {
    /// Every field type, in declaration order
    pub const ALL: [FieldType; 9] = [
        FieldType::Smid,
        FieldType::DistributionGroupsFile,
        FieldType::Country,
        FieldType::OperatingSystem,
        FieldType::ClientVersion,
        FieldType::Browser,
        FieldType::InternetType,
        FieldType::InternalTransition,
        FieldType::CleCampaign,
    ];

    /// Wire name, also used as the record lookup key
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Smid => "SMID",
            FieldType::DistributionGroupsFile => "DISTRIBUTION_GROUPS_FILE",
            FieldType::Country => "COUNTRY",
            FieldType::OperatingSystem => "OPERATING_SYSTEM",
            FieldType::ClientVersion => "CLIENT_VERSION",
            FieldType::Browser => "BROWSER",
            FieldType::InternetType => "INTERNET_TYPE",
            FieldType::InternalTransition => "INTERNAL_TRANSITION",
            FieldType::CleCampaign => "CLE_CAMPAIGN",
        }
    }

    /// Human-readable name shown in client UIs
    pub fn display_name(&self) -> &'static str {
        self.as_str()
    }

    /// Returns true if conditions on this field are resolved by an
    /// external membership lookup instead of a direct comparison
    pub fn is_membership(&self) -> bool {
        matches!(self, FieldType::DistributionGroupsFile)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| CoreError::UnknownFieldType(s.to_string()))
    }
}
