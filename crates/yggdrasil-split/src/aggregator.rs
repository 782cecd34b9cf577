use std::fmt;

/// Criterion for measuring the impurity of a group of samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SplitCriterion {
    /// Gini impurity: 1 - Σ(p_i²)
    #[default]
    Gini,
    /// Information entropy in bits: -Σ(p_i · log2(p_i))
    Entropy,
}

impl fmt::Display for SplitCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitCriterion::Gini => write!(f, "gini"),
            SplitCriterion::Entropy => write!(f, "entropy"),
        }
    }
}

/// Criterion-agnostic impurity value (Gini or Entropy).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Impurity(f64);

impl Impurity {
    /// Create a new impurity value.
    pub(crate) fn new(value: f64) -> Self {
        Self(value)
    }

    /// Return the raw impurity value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Impurity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

/// Per-class sample counts for a group of samples.
///
/// `K` is the number of classes, fixed at compile time, so the counts live
/// in a stack array and copying an aggregator is a plain memcpy.
///
/// Labels passed to [`increment`](Self::increment) and
/// [`decrement`](Self::decrement) are not range-checked beyond the array
/// index; callers validate labels once up front (see
/// [`Dataset`](crate::Dataset)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImpurityAggregator<const K: usize> {
    counts: [usize; K],
}

impl<const K: usize> ImpurityAggregator<K> {
    /// Create an aggregator with every class count at zero.
    #[must_use]
    pub fn new() -> Self {
        Self { counts: [0; K] }
    }

    /// Build an aggregator holding the class counts of `labels`.
    ///
    /// # Panics
    ///
    /// Panics if any label is `>= K`.
    #[must_use]
    pub fn from_labels(labels: impl IntoIterator<Item = usize>) -> Self {
        let mut agg = Self::new();
        for label in labels {
            agg.increment(label);
        }
        agg
    }

    /// Add one sample of class `class`.
    #[inline]
    pub fn increment(&mut self, class: usize) {
        self.counts[class] += 1;
    }

    /// Remove one sample of class `class`.
    #[inline]
    pub fn decrement(&mut self, class: usize) {
        self.counts[class] -= 1;
    }

    /// Subtract `other` elementwise: `self[i] -= other[i]`.
    ///
    /// Used to derive a right-hand aggregator as full minus left, so
    /// `other` must be a sub-multiset of `self`.
    pub fn subtract(&mut self, other: &Self) {
        for (count, &removed) in self.counts.iter_mut().zip(other.counts.iter()) {
            *count -= removed;
        }
    }

    /// Return the count for a single class.
    #[must_use]
    pub fn count(&self, class: usize) -> usize {
        self.counts[class]
    }

    /// Return all class counts indexed by class.
    #[must_use]
    pub fn counts(&self) -> &[usize; K] {
        &self.counts
    }

    /// Return the number of samples represented (sum of all counts).
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Return `true` if no samples are represented.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Gini impurity: `1 - Σ(p_i²)` over classes with a non-zero count.
    ///
    /// An empty aggregator has impurity 0.
    #[must_use]
    pub fn gini_impurity(&self) -> Impurity {
        let total = self.total();
        if total == 0 {
            return Impurity::new(0.0);
        }
        let n = total as f64;
        let sum_sq: f64 = self
            .counts
            .iter()
            .filter(|&&c| c != 0)
            .map(|&c| {
                let p = c as f64 / n;
                p * p
            })
            .sum();
        Impurity::new(1.0 - sum_sq)
    }

    /// Entropy impurity in bits: `-Σ(p_i · log2(p_i))`.
    ///
    /// Empty classes contribute 0. An empty aggregator has impurity 0.
    #[must_use]
    pub fn entropy_impurity(&self) -> Impurity {
        let total = self.total();
        if total == 0 {
            return Impurity::new(0.0);
        }
        let n = total as f64;
        let value = -self
            .counts
            .iter()
            .filter(|&&c| c != 0)
            .map(|&c| {
                let p = c as f64 / n;
                p * p.log2()
            })
            .sum::<f64>();
        // A pure group sums to -0.0.
        Impurity::new(value.max(0.0))
    }

    /// Compute impurity with the given criterion.
    #[must_use]
    pub fn impurity(&self, criterion: SplitCriterion) -> Impurity {
        match criterion {
            SplitCriterion::Gini => self.gini_impurity(),
            SplitCriterion::Entropy => self.entropy_impurity(),
        }
    }
}

impl<const K: usize> Default for ImpurityAggregator<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const K: usize> From<[usize; K]> for ImpurityAggregator<K> {
    fn from(counts: [usize; K]) -> Self {
        Self { counts }
    }
}

#[cfg(test)]
mod tests {
    use super::{ImpurityAggregator, SplitCriterion};

    #[test]
    fn new_is_zeroed() {
        let agg = ImpurityAggregator::<4>::new();
        assert_eq!(agg.counts(), &[0, 0, 0, 0]);
        assert!(agg.is_empty());
        assert_eq!(agg.total(), 0);
    }

    #[test]
    fn increment_and_decrement() {
        let mut agg = ImpurityAggregator::<3>::new();
        agg.increment(1);
        agg.increment(1);
        agg.increment(2);
        agg.decrement(1);
        assert_eq!(agg.counts(), &[0, 1, 1]);
        assert_eq!(agg.total(), 2);
    }

    #[test]
    fn from_labels_counts_each_class() {
        let agg = ImpurityAggregator::<3>::from_labels([0, 2, 2, 1, 2]);
        assert_eq!(agg.counts(), &[1, 1, 3]);
    }

    #[test]
    fn subtract_elementwise() {
        let mut full = ImpurityAggregator::from([5, 3, 2]);
        let left = ImpurityAggregator::from([2, 3, 0]);
        full.subtract(&left);
        assert_eq!(full.counts(), &[3, 0, 2]);
    }

    #[test]
    #[should_panic]
    fn increment_out_of_range_panics() {
        let mut agg = ImpurityAggregator::<2>::new();
        agg.increment(2);
    }

    #[test]
    fn gini_pure() {
        let imp = ImpurityAggregator::from([10, 0, 0]).gini_impurity();
        assert!((imp.value() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn gini_binary_balanced() {
        let imp = ImpurityAggregator::from([5, 5]).gini_impurity();
        assert!((imp.value() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn gini_uniform_reaches_maximum() {
        let imp = ImpurityAggregator::from([7; 10]).gini_impurity();
        assert!((imp.value() - 0.9).abs() < 1e-12);
    }

    #[test]
    fn gini_three_class_uniform() {
        let imp = ImpurityAggregator::from([100, 100, 100]).gini_impurity();
        assert!((imp.value() - (1.0 - 3.0 * (1.0 / 3.0_f64).powi(2))).abs() < 1e-10);
    }

    #[test]
    fn entropy_pure() {
        let imp = ImpurityAggregator::from([0, 10, 0]).entropy_impurity();
        assert_eq!(imp.value(), 0.0);
    }

    #[test]
    fn entropy_binary_balanced_is_one_bit() {
        let imp = ImpurityAggregator::from([5, 5]).entropy_impurity();
        assert!((imp.value() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn entropy_uniform_four_classes_is_two_bits() {
        let imp = ImpurityAggregator::from([3, 3, 3, 3]).entropy_impurity();
        assert!((imp.value() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_aggregator_has_zero_impurity() {
        let agg = ImpurityAggregator::<3>::new();
        assert_eq!(agg.gini_impurity().value(), 0.0);
        assert_eq!(agg.entropy_impurity().value(), 0.0);
    }

    #[test]
    fn impurity_dispatches_on_criterion() {
        let agg = ImpurityAggregator::from([1, 3]);
        assert_eq!(agg.impurity(SplitCriterion::Gini), agg.gini_impurity());
        assert_eq!(agg.impurity(SplitCriterion::Entropy), agg.entropy_impurity());
    }

    #[test]
    fn impurity_display() {
        let imp = ImpurityAggregator::from([1, 1]).gini_impurity();
        assert_eq!(format!("{imp}"), "0.500000");
    }

    #[test]
    fn criterion_default_and_display() {
        assert_eq!(SplitCriterion::default(), SplitCriterion::Gini);
        assert_eq!(SplitCriterion::Entropy.to_string(), "entropy");
    }
}
