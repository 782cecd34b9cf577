//! Incremental threshold sweep over sorted samples.
//!
//! Samples move one at a time from the right-hand aggregator into the
//! left-hand one. Whenever the sorted value changes, every sample at or
//! below the previous value is already on the left, so that previous value
//! is a candidate threshold and is scored before the next sample moves.

use tracing::{debug, instrument};

use crate::aggregator::{Impurity, ImpurityAggregator, SplitCriterion};
use crate::result::{BestSplit, SplitResult};
use crate::sort::SortedSamples;

/// The partition at one candidate threshold.
///
/// Samples with `value <= threshold` are on the left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitCandidate<const K: usize> {
    threshold: f64,
    gain: f64,
    left: ImpurityAggregator<K>,
    right: ImpurityAggregator<K>,
    left_count: usize,
    right_count: usize,
}

impl<const K: usize> SplitCandidate<K> {
    /// Return the threshold value.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Return the impurity decrease: parent impurity minus the
    /// sample-weighted impurity of both sides.
    #[must_use]
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Return the class counts on the left side.
    #[must_use]
    pub fn left(&self) -> &ImpurityAggregator<K> {
        &self.left
    }

    /// Return the class counts on the right side.
    #[must_use]
    pub fn right(&self) -> &ImpurityAggregator<K> {
        &self.right
    }

    /// Return the number of samples on the left side.
    #[must_use]
    pub fn left_count(&self) -> usize {
        self.left_count
    }

    /// Return the number of samples on the right side.
    #[must_use]
    pub fn right_count(&self) -> usize {
        self.right_count
    }

    /// A candidate counts as a split only if both sides are non-empty.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.left_count > 0 && self.right_count > 0
    }
}

/// Iterator over every candidate threshold of one sweep, in ascending
/// threshold order.
///
/// Yields eligible and ineligible candidates alike. A threshold equal to
/// the largest value, which would leave the right side empty, is never
/// produced.
#[derive(Debug, Clone)]
pub struct Candidates<'a, const K: usize> {
    values: &'a [f64],
    labels: &'a [usize],
    criterion: SplitCriterion,
    full_impurity: Impurity,
    left: ImpurityAggregator<K>,
    right: ImpurityAggregator<K>,
    left_count: usize,
    right_count: usize,
    current_threshold: f64,
    position: usize,
}

impl<'a, const K: usize> Candidates<'a, K> {
    fn new(sorted: &'a SortedSamples<K>, criterion: SplitCriterion) -> Self {
        let full = sorted.full_aggregator();
        let values = sorted.values();
        Self {
            values,
            labels: sorted.labels_in_order(),
            criterion,
            full_impurity: full.impurity(criterion),
            left: ImpurityAggregator::new(),
            right: *full,
            left_count: 0,
            right_count: values.len(),
            current_threshold: values.first().copied().unwrap_or_default(),
            position: 0,
        }
    }

    /// Return the impurity of the whole sample set.
    #[must_use]
    pub fn full_impurity(&self) -> Impurity {
        self.full_impurity
    }

    fn evaluate(&self) -> SplitCandidate<K> {
        let n = self.values.len() as f64;
        let left_weight = self.left_count as f64 / n;
        let right_weight = self.right_count as f64 / n;
        let gain = self.full_impurity.value()
            - left_weight * self.left.impurity(self.criterion).value()
            - right_weight * self.right.impurity(self.criterion).value();
        SplitCandidate {
            threshold: self.current_threshold,
            gain,
            left: self.left,
            right: self.right,
            left_count: self.left_count,
            right_count: self.right_count,
        }
    }

    fn absorb(&mut self, label: usize) {
        self.left.increment(label);
        self.right.decrement(label);
        self.left_count += 1;
        self.right_count -= 1;
        debug_assert_eq!(self.left_count + self.right_count, self.values.len());
    }
}

impl<const K: usize> Iterator for Candidates<'_, K> {
    type Item = SplitCandidate<K>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.position < self.values.len() {
            let value = self.values[self.position];
            let candidate = if value != self.current_threshold {
                let candidate = self.evaluate();
                self.current_threshold = value;
                Some(candidate)
            } else {
                None
            };
            self.absorb(self.labels[self.position]);
            self.position += 1;
            if candidate.is_some() {
                return candidate;
            }
        }
        None
    }
}

/// Single-pass best-threshold search over sorted samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitScanner<const K: usize> {
    criterion: SplitCriterion,
}

impl<const K: usize> SplitScanner<K> {
    /// Create a scanner scoring splits with `criterion`.
    #[must_use]
    pub fn new(criterion: SplitCriterion) -> Self {
        Self { criterion }
    }

    /// Return the criterion used to score splits.
    #[must_use]
    pub fn criterion(&self) -> SplitCriterion {
        self.criterion
    }

    /// Iterate over every candidate threshold of `sorted`.
    #[must_use]
    pub fn candidates<'a>(&self, sorted: &'a SortedSamples<K>) -> Candidates<'a, K> {
        Candidates::new(sorted, self.criterion)
    }

    /// Find the eligible candidate with the largest strictly positive gain.
    ///
    /// Ties keep the lowest threshold. A split is reported only if such a
    /// candidate exists and its threshold is not the largest value.
    #[instrument(skip_all, fields(n_samples = sorted.len(), criterion = %self.criterion))]
    pub fn scan(&self, sorted: &SortedSamples<K>) -> SplitResult<K> {
        let full = sorted.full_aggregator();
        let candidates = self.candidates(sorted);
        let full_impurity = candidates.full_impurity();

        let mut best: Option<SplitCandidate<K>> = None;
        let mut best_gain = 0.0;
        let mut n_candidates = 0usize;
        for candidate in candidates {
            n_candidates += 1;
            if candidate.is_eligible() && candidate.gain > best_gain {
                best_gain = candidate.gain;
                best = Some(candidate);
            }
        }

        let last_value = sorted.last_value();
        let best = best
            .filter(|c| Some(c.threshold) != last_value)
            .map(|c| {
                let mut right = *full;
                right.subtract(&c.left);
                BestSplit::new(c.threshold, c.gain, c.left, right)
            });

        match &best {
            Some(split) => debug!(
                n_candidates,
                threshold = split.threshold(),
                gain = split.gain(),
                "found split"
            ),
            None => debug!(n_candidates, "no split found"),
        }

        SplitResult::new(
            best,
            full_impurity,
            *full,
            self.criterion,
            sorted.len(),
            n_candidates,
        )
    }
}
