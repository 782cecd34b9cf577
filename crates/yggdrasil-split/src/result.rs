//! Split search result types.

use crate::aggregator::{Impurity, ImpurityAggregator, SplitCriterion};

/// The winning threshold and the partition it induces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestSplit<const K: usize> {
    threshold: f64,
    gain: f64,
    left: ImpurityAggregator<K>,
    right: ImpurityAggregator<K>,
}

impl<const K: usize> BestSplit<K> {
    pub(crate) fn new(
        threshold: f64,
        gain: f64,
        left: ImpurityAggregator<K>,
        right: ImpurityAggregator<K>,
    ) -> Self {
        Self {
            threshold,
            gain,
            left,
            right,
        }
    }

    /// Return the threshold: samples with `value <= threshold` go left.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Return the impurity decrease achieved by this split.
    #[must_use]
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Return the class counts of the left side.
    #[must_use]
    pub fn left(&self) -> &ImpurityAggregator<K> {
        &self.left
    }

    /// Return the class counts of the right side.
    #[must_use]
    pub fn right(&self) -> &ImpurityAggregator<K> {
        &self.right
    }

    /// Return the number of samples on the left side.
    #[must_use]
    pub fn left_count(&self) -> usize {
        self.left.total()
    }

    /// Return the number of samples on the right side.
    #[must_use]
    pub fn right_count(&self) -> usize {
        self.right.total()
    }
}

/// Outcome of one split search.
///
/// Holds the best split, if one was found, alongside the statistics of the
/// full sample set it was measured against.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitResult<const K: usize> {
    best: Option<BestSplit<K>>,
    full_impurity: Impurity,
    full: ImpurityAggregator<K>,
    criterion: SplitCriterion,
    n_samples: usize,
    n_candidates: usize,
}

impl<const K: usize> SplitResult<K> {
    pub(crate) fn new(
        best: Option<BestSplit<K>>,
        full_impurity: Impurity,
        full: ImpurityAggregator<K>,
        criterion: SplitCriterion,
        n_samples: usize,
        n_candidates: usize,
    ) -> Self {
        Self {
            best,
            full_impurity,
            full,
            criterion,
            n_samples,
            n_candidates,
        }
    }

    /// Return `true` if a split with positive gain was found.
    #[must_use]
    pub fn is_found(&self) -> bool {
        self.best.is_some()
    }

    /// Return the best split, if any.
    #[must_use]
    pub fn best(&self) -> Option<&BestSplit<K>> {
        self.best.as_ref()
    }

    /// Consume the result and return the best split, if any.
    #[must_use]
    pub fn into_best(self) -> Option<BestSplit<K>> {
        self.best
    }

    /// Return the best threshold, if a split was found.
    #[must_use]
    pub fn threshold(&self) -> Option<f64> {
        self.best.map(|b| b.threshold)
    }

    /// Return the gain of the best split, or 0 when none was found.
    #[must_use]
    pub fn gain(&self) -> f64 {
        self.best.map_or(0.0, |b| b.gain)
    }

    /// Return the impurity of the full sample set.
    #[must_use]
    pub fn full_impurity(&self) -> Impurity {
        self.full_impurity
    }

    /// Return the class counts of the full sample set.
    #[must_use]
    pub fn full_aggregator(&self) -> &ImpurityAggregator<K> {
        &self.full
    }

    /// Return the criterion the split was scored with.
    #[must_use]
    pub fn criterion(&self) -> SplitCriterion {
        self.criterion
    }

    /// Return the number of samples searched.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Return the number of candidate thresholds evaluated.
    #[must_use]
    pub fn n_candidates(&self) -> usize {
        self.n_candidates
    }
}
