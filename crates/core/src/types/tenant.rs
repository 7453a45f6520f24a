//! Tenant scoping for catalog queries.

use serde::{Deserialize, Serialize};

use super::id::CompanyId;

/// Tenant scope applied to store catalog lookups.
///
/// Single-tenant deployments use `Shared`, which applies no company filter.
/// Multi-tenant deployments resolve the current company and pass
/// `Company(id)`, restricting the catalog to stores owned by that company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TenantScope {
    /// No company filtering (single-tenant mode).
    #[default]
    Shared,
    /// Restrict to stores owned by the given company.
    Company(CompanyId),
}

impl TenantScope {
    /// Returns `true` if a store owned by `owner` is visible under this scope.
    ///
    /// A store with no owner is visible only in shared mode; a company scope
    /// requires an exact owner match.
    #[must_use]
    pub fn allows(self, owner: Option<CompanyId>) -> bool {
        match self {
            Self::Shared => true,
            Self::Company(id) => owner == Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_allows_everything() {
        assert!(TenantScope::Shared.allows(None));
        assert!(TenantScope::Shared.allows(Some(CompanyId::new(3))));
    }

    #[test]
    fn test_company_scope_requires_exact_match() {
        let scope = TenantScope::Company(CompanyId::new(3));
        assert!(scope.allows(Some(CompanyId::new(3))));
        assert!(!scope.allows(Some(CompanyId::new(4))));
        assert!(!scope.allows(None));
    }
}
