//! Reviewer selection policy.
//!
//! Selection is pure: callers hand in a candidate set that is already
//! filtered (active members only, author and current reviewers removed) and
//! get back the chosen ids. Keeping filtering out of the selector lets tests
//! swap in [`OrderedReviewerSelector`] without touching the workflow.

use crate::roster::domain::UserId;
use rand::seq::{IteratorRandom, SliceRandom};
use std::collections::BTreeSet;

/// Chooses reviewers from a pre-filtered candidate set.
pub trait ReviewerSelector: Send + Sync {
    /// Returns `min(max, candidates.len())` distinct candidates.
    ///
    /// An empty candidate set yields an empty selection.
    fn pick_reviewers(&self, candidates: &BTreeSet<UserId>, max: usize) -> Vec<UserId>;

    /// Returns one candidate, or `None` when the set is empty.
    fn pick_replacement(&self, candidates: &BTreeSet<UserId>) -> Option<UserId>;
}

/// Uniformly random selection backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomReviewerSelector;

impl ReviewerSelector for RandomReviewerSelector {
    fn pick_reviewers(&self, candidates: &BTreeSet<UserId>, max: usize) -> Vec<UserId> {
        let mut rng = rand::thread_rng();
        let mut picked: Vec<UserId> = candidates
            .iter()
            .choose_multiple(&mut rng, max)
            .into_iter()
            .cloned()
            .collect();
        // `choose_multiple` does not randomise order; shuffle so every
        // permutation is equally likely.
        picked.shuffle(&mut rng);
        picked
    }

    fn pick_replacement(&self, candidates: &BTreeSet<UserId>) -> Option<UserId> {
        candidates.iter().choose(&mut rand::thread_rng()).cloned()
    }
}

/// Deterministic selection of the lowest ids in sorted order.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderedReviewerSelector;

impl ReviewerSelector for OrderedReviewerSelector {
    fn pick_reviewers(&self, candidates: &BTreeSet<UserId>, max: usize) -> Vec<UserId> {
        candidates.iter().take(max).cloned().collect()
    }

    fn pick_replacement(&self, candidates: &BTreeSet<UserId>) -> Option<UserId> {
        candidates.first().cloned()
    }
}
