//! Destination resolution.
//!
//! A destination is a resolved geographic target derived from a delivery
//! address. Resolution may fail: an unknown or ambiguous address yields no
//! identifier, which callers treat as a hard stop.

use serde::{Deserialize, Serialize};

use storepoint_core::{DestinationId, ObjectStatus};

use crate::request::Location;

/// Resolves a delivery address to a destination identifier.
pub trait DestinationResolver {
    /// The destination for a location, or `None` when no destination matches.
    fn resolve(&self, location: &Location) -> Option<DestinationId>;
}

impl<F> DestinationResolver for F
where
    F: Fn(&Location) -> Option<DestinationId>,
{
    fn resolve(&self, location: &Location) -> Option<DestinationId> {
        self(location)
    }
}

/// Matching criteria for one destination.
///
/// A rule matches a location when every non-empty criterion list contains the
/// corresponding address field. An empty list places no constraint, so a rule
/// with only `countries` matches the whole country.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DestinationRule {
    pub destination_id: DestinationId,
    pub status: ObjectStatus,
    /// ISO country codes, uppercase.
    pub countries: Vec<String>,
    /// State/province codes, uppercase.
    pub states: Vec<String>,
    /// City names, compared case-insensitively.
    pub cities: Vec<String>,
    /// Exact postal codes.
    pub zipcodes: Vec<String>,
}

impl DestinationRule {
    fn matches(&self, location: &Location) -> bool {
        self.status.is_active()
            && field_matches(&self.countries, location.country.as_deref(), false)
            && field_matches(&self.states, location.state.as_deref(), false)
            && field_matches(&self.cities, location.city.as_deref(), true)
            && field_matches(&self.zipcodes, location.zipcode.as_deref(), false)
    }
}

/// An empty criterion list is unconstrained; otherwise the address field must
/// be present and listed.
fn field_matches(criteria: &[String], value: Option<&str>, fold_case: bool) -> bool {
    if criteria.is_empty() {
        return true;
    }
    value.is_some_and(|v| {
        criteria.iter().any(|c| {
            if fold_case {
                c.eq_ignore_ascii_case(v)
            } else {
                c == v
            }
        })
    })
}

/// Destination resolver backed by an ordered rule list.
///
/// Rules are evaluated in order; the first active rule matching the location
/// wins, so narrower rules (zip-level) should be listed before broader ones
/// (country-level).
#[derive(Debug, Clone, Default)]
pub struct RuleBasedResolver {
    rules: Vec<DestinationRule>,
}

impl RuleBasedResolver {
    /// Create a resolver from rules in evaluation order.
    #[must_use]
    pub const fn new(rules: Vec<DestinationRule>) -> Self {
        Self { rules }
    }
}

impl DestinationResolver for RuleBasedResolver {
    fn resolve(&self, location: &Location) -> Option<DestinationId> {
        self.rules
            .iter()
            .find(|rule| rule.matches(location))
            .map(|rule| rule.destination_id)
    }
}
