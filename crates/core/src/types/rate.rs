//! Manual shipping rates using decimal arithmetic.
//!
//! A manual rate is a carrier-configured price per destination, independent of
//! real-time carrier APIs. The table distinguishes "configured as zero" (free
//! pickup) from "not configured at all" (the destination cannot be used for
//! pickup), so the unset case is a dedicated variant rather than a sentinel
//! amount.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A shipping rate amount in the shop's base currency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Rate(Decimal);

impl Rate {
    /// A zero rate (free pickup).
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a rate from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Decimal> for Rate {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

/// A manual rate table entry for one destination.
///
/// `Unset` means the carrier has no rate configured for the destination, so
/// the destination is not reachable for pickup. This is distinct from
/// `Amount(Rate::ZERO)`, which is a configured free pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ManualRate {
    /// No rate configured; the destination cannot be used for pickup.
    #[default]
    Unset,
    /// A configured rate amount.
    Amount(Rate),
}

impl ManualRate {
    /// Returns the configured rate, or `None` when unset.
    #[must_use]
    pub const fn as_rate(self) -> Option<Rate> {
        match self {
            Self::Unset => None,
            Self::Amount(rate) => Some(rate),
        }
    }

    /// Returns `true` when no rate is configured.
    #[must_use]
    pub const fn is_unset(self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Map a nullable database amount to a manual rate.
    ///
    /// `NULL` columns mean the rate was never configured, not that it is zero.
    #[must_use]
    pub fn from_db(amount: Option<Decimal>) -> Self {
        amount.map_or(Self::Unset, |a| Self::Amount(Rate::new(a)))
    }
}

impl From<Rate> for ManualRate {
    fn from(rate: Rate) -> Self {
        Self::Amount(rate)
    }
}
