//! Eligibility filtering over ranked candidates.
//!
//! Filtering keeps a subsequence of its input: it never reorders.

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::{Architecture, CostedCandidate, MachineCategory};
use crate::error::{Error, Result};

/// What a candidate must satisfy to stay in the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Only candidates of this architecture pass.
    pub architecture: Architecture,
    /// Inclusive ceiling on daily cost.
    pub max_daily_cost: Option<Decimal>,
    /// When non-empty, the family must belong to one of these categories.
    pub categories: Vec<MachineCategory>,
}

impl FilterCriteria {
    /// Criteria for `architecture` with no ceiling and no category limit.
    #[must_use]
    pub fn new(architecture: Architecture) -> Self {
        Self {
            architecture,
            ..Self::default()
        }
    }

    /// Set the inclusive daily cost ceiling.
    #[must_use]
    pub fn with_max_daily_cost(mut self, max_daily_cost: Option<Decimal>) -> Self {
        self.max_daily_cost = max_daily_cost;
        self
    }

    /// Restrict to families of `categories`; empty means any.
    #[must_use]
    pub fn with_categories(mut self, categories: Vec<MachineCategory>) -> Self {
        self.categories = categories;
        self
    }

    /// Whether a single candidate passes.
    #[must_use]
    pub fn accepts(&self, candidate: &CostedCandidate) -> bool {
        if candidate.pricing().architecture() != self.architecture {
            return false;
        }
        if let Some(max) = self.max_daily_cost {
            if candidate.total_daily_cost() > max {
                return false;
            }
        }
        self.categories.is_empty()
            || self
                .categories
                .iter()
                .any(|category| category.contains(candidate.family()))
    }

    /// Keep the accepted candidates in their ranked order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoEligibleInstances`] when nothing passes.
    pub fn apply(&self, ranked: Vec<CostedCandidate>) -> Result<Vec<CostedCandidate>> {
        let considered = ranked.len();
        let kept: Vec<CostedCandidate> = ranked.into_iter().filter(|c| self.accepts(c)).collect();

        debug!(
            considered,
            kept = kept.len(),
            architecture = %self.architecture,
            "Filtered candidates"
        );

        if kept.is_empty() {
            return Err(Error::NoEligibleInstances {
                architecture: self.architecture,
                categories: self.categories.clone(),
                max_daily_cost: self.max_daily_cost,
                considered,
            });
        }
        Ok(kept)
    }
}
