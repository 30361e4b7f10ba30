//! Run policy: the budget and engine configuration a search ran under.
//!
//! The engine has no budgets of its own. The runner enforces
//! `max_expansions` by stopping the driver loop, which is the only
//! cancellation mechanism the stepping model offers.

use waypoint_kernel::proof::canon::{canonical_json_bytes, CanonError};
use waypoint_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use waypoint_search::policy::SearchPolicy;

/// Default cap on nodes popped by one run.
const DEFAULT_MAX_EXPANSIONS: u64 = 1_000_000;

/// Budget and engine configuration for one driver run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunPolicy {
    /// Hard cap on expansions (nodes popped as current).
    pub max_expansions: u64,
    /// Engine configuration.
    pub search: SearchPolicy,
}

impl Default for RunPolicy {
    fn default() -> Self {
        Self {
            max_expansions: DEFAULT_MAX_EXPANSIONS,
            search: SearchPolicy::default(),
        }
    }
}

/// Error from [`RunPolicy::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// `max_expansions` is zero, so not even the start could be expanded.
    ZeroExpansionBudget,
}

impl std::fmt::Display for PolicyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroExpansionBudget => f.write_str("max_expansions must be at least 1"),
        }
    }
}

impl std::error::Error for PolicyError {}

impl RunPolicy {
    /// Pre-flight check, run before any search step.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::ZeroExpansionBudget`] if `max_expansions == 0`.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.max_expansions == 0 {
            return Err(PolicyError::ZeroExpansionBudget);
        }
        Ok(())
    }

    /// Canonical JSON form, as bound into search reports.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "max_expansions": self.max_expansions,
            "tie_break": self.search.tie_break.as_str(),
        })
    }

    /// Content digest of the canonical JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(HashDomain::RunPolicy, &bytes))
    }
}
