//! Total-cost ranking of candidates.
//!
//! Candidates are ordered by daily cost alone, so spot and on-demand
//! interleave: a cheap on-demand family ranks ahead of a pricier spot one.
//! Equal costs fall back to family name, then spot before on-demand, which
//! makes the order fully deterministic.

use std::cmp::Ordering;

use crate::domain::CostedCandidate;

/// Compare two candidates in priority order.
#[must_use]
pub fn priority_order(a: &CostedCandidate, b: &CostedCandidate) -> Ordering {
    a.total_daily_cost()
        .cmp(&b.total_daily_cost())
        .then_with(|| a.family().cmp(b.family()))
        .then_with(|| a.tier().cmp(&b.tier()))
}

/// Sort candidates cheapest first.
#[must_use]
pub fn rank(mut candidates: Vec<CostedCandidate>) -> Vec<CostedCandidate> {
    candidates.sort_by(priority_order);
    candidates
}
