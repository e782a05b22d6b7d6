#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Owner-review status of a submitted analysis.
///
/// Absence (a record that was never submitted) is modeled as `Option::None`
/// wherever the status is carried. Once terminal, the status never changes
/// through the verification workflow; re-analysis means a new record.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in
/// SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// Submitted and waiting in the owner's review queue.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "pending"))]
    Pending,
    /// Accepted by the owner. Terminal; the record becomes system of record.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "approved"))]
    Approved,
    /// Rejected by the owner. Terminal, but the record stays deletable.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "rejected"))]
    Rejected,
}

impl VerificationStatus {
    /// Returns true once the owner has decided (no further transitions).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// All possible status values.
    pub const ALL: &'static [VerificationStatus] = &[Self::Pending, Self::Approved, Self::Rejected];

    /// Returns the wire representation (lowercase).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an invalid status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid verification status '{0}'; valid values: pending, approved, rejected")]
pub struct ParseStatusError(String);

impl FromStr for VerificationStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}
