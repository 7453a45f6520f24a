//! Status enum shared by catalog entities.

use serde::{Deserialize, Serialize};

/// Lifecycle status for catalog objects (stores, destinations).
///
/// Only `Active` objects participate in resolution. `Hidden` objects stay out
/// of customer-facing queries but remain visible to administration tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ObjectStatus {
    Active,
    #[default]
    Disabled,
    Hidden,
}

impl ObjectStatus {
    /// Returns `true` for the active status.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for ObjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Disabled => write!(f, "disabled"),
            Self::Hidden => write!(f, "hidden"),
        }
    }
}

impl std::str::FromStr for ObjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "disabled" => Ok(Self::Disabled),
            "hidden" => Ok(Self::Hidden),
            _ => Err(format!("invalid object status: {s}")),
        }
    }
}
