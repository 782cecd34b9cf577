//! Configuration builder for split search.

use tracing::{debug, instrument};

use crate::aggregator::SplitCriterion;
use crate::dataset::Dataset;
use crate::error::SplitError;
use crate::result::SplitResult;
use crate::scan::SplitScanner;
use crate::sort::sort_samples;

/// Configuration for a best-split search.
///
/// Construct via [`SplitConfig::new`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter   | Default |
/// |-------------|---------|
/// | `criterion` | `Gini`  |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitConfig {
    pub(crate) criterion: SplitCriterion,
}

impl SplitConfig {
    /// Create a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the split quality criterion.
    #[must_use]
    pub fn with_criterion(mut self, criterion: SplitCriterion) -> Self {
        self.criterion = criterion;
        self
    }

    /// Return the split criterion.
    #[must_use]
    pub fn criterion(&self) -> SplitCriterion {
        self.criterion
    }

    /// Sort `dataset` by value and scan it for the best threshold.
    #[instrument(skip_all, fields(n_samples = dataset.len(), n_classes = K))]
    pub fn find_best_split<const K: usize>(&self, dataset: &Dataset<K>) -> SplitResult<K> {
        let sorted = sort_samples(dataset);
        debug!(counts = ?sorted.full_aggregator().counts(), "aggregated class counts");
        SplitScanner::new(self.criterion).scan(&sorted)
    }

    /// Validate parallel value and label columns, then search them.
    ///
    /// # Errors
    ///
    /// Returns any [`SplitError`] produced by [`Dataset::from_columns`].
    pub fn find_best_split_in<const K: usize>(
        &self,
        values: &[f64],
        labels: &[usize],
    ) -> Result<SplitResult<K>, SplitError> {
        let dataset = Dataset::<K>::from_columns(values, labels)?;
        Ok(self.find_best_split(&dataset))
    }
}

/// Search `values`/`labels` for the best Gini split.
///
/// # Errors
///
/// | Variant                          | When                                  |
/// |----------------------------------|---------------------------------------|
/// | [`SplitError::ZeroClasses`]      | `K` is zero                           |
/// | [`SplitError::EmptyDataset`]     | no samples                            |
/// | [`SplitError::LengthMismatch`]   | `values` and `labels` differ in length|
/// | [`SplitError::NonFiniteValue`]   | any value is NaN or infinite          |
/// | [`SplitError::LabelOutOfRange`]  | any label is `>= K`                   |
pub fn find_best_split<const K: usize>(
    values: &[f64],
    labels: &[usize],
) -> Result<SplitResult<K>, SplitError> {
    SplitConfig::new().find_best_split_in(values, labels)
}

#[cfg(test)]
mod tests {
    use super::{SplitConfig, find_best_split};
    use crate::aggregator::SplitCriterion;
    use crate::error::SplitError;

    #[test]
    fn defaults() {
        let config = SplitConfig::new();
        assert_eq!(config.criterion(), SplitCriterion::Gini);
    }

    #[test]
    fn with_criterion() {
        let config = SplitConfig::new().with_criterion(SplitCriterion::Entropy);
        assert_eq!(config.criterion(), SplitCriterion::Entropy);
    }

    #[test]
    fn unsorted_input_is_sorted_before_scanning() {
        let result = find_best_split::<2>(&[0.4, 0.1, 0.3, 0.2], &[1, 0, 1, 0]).unwrap();
        assert_eq!(result.threshold(), Some(0.2));
    }

    #[test]
    fn invalid_input_is_an_error() {
        let err = find_best_split::<2>(&[], &[]).unwrap_err();
        assert_eq!(err, SplitError::EmptyDataset);

        let err = SplitConfig::new()
            .find_best_split_in::<2>(&[0.1, 0.2], &[0, 5])
            .unwrap_err();
        assert!(matches!(err, SplitError::LabelOutOfRange { label: 5, .. }));
    }
}
