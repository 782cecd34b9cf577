//! Validated single-feature samples.

use crate::aggregator::ImpurityAggregator;
use crate::error::SplitError;

/// One observation: a feature value and its class label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    value: f64,
    label: usize,
}

impl Sample {
    /// Create a sample. Validation happens when it joins a [`Dataset`].
    #[must_use]
    pub fn new(value: f64, label: usize) -> Self {
        Self { value, label }
    }

    /// Return the feature value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.value
    }

    /// Return the class label.
    #[must_use]
    pub fn label(self) -> usize {
        self.label
    }
}

/// A non-empty set of samples whose labels all lie in `[0, K)` and whose
/// values are all finite.
///
/// Once constructed, the split search can index aggregators by label
/// without further checks.
#[derive(Debug, Clone)]
pub struct Dataset<const K: usize> {
    samples: Vec<Sample>,
}

impl<const K: usize> Dataset<K> {
    /// Validate and wrap a list of samples.
    ///
    /// # Errors
    ///
    /// | Variant                          | When                              |
    /// |----------------------------------|-----------------------------------|
    /// | [`SplitError::ZeroClasses`]      | `K` is zero                       |
    /// | [`SplitError::EmptyDataset`]     | `samples` is empty                |
    /// | [`SplitError::NonFiniteValue`]   | any value is NaN or infinite      |
    /// | [`SplitError::LabelOutOfRange`]  | any label is `>= K`               |
    pub fn new(samples: Vec<Sample>) -> Result<Self, SplitError> {
        if K == 0 {
            return Err(SplitError::ZeroClasses);
        }
        if samples.is_empty() {
            return Err(SplitError::EmptyDataset);
        }
        for (sample_index, sample) in samples.iter().enumerate() {
            if !sample.value.is_finite() {
                return Err(SplitError::NonFiniteValue { sample_index });
            }
            if sample.label >= K {
                return Err(SplitError::LabelOutOfRange {
                    sample_index,
                    label: sample.label,
                    n_classes: K,
                });
            }
        }
        Ok(Self { samples })
    }

    /// Validate parallel value and label columns.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::LengthMismatch`] if the columns differ in
    /// length, otherwise the same errors as [`Dataset::new`].
    pub fn from_columns(values: &[f64], labels: &[usize]) -> Result<Self, SplitError> {
        if values.len() != labels.len() {
            return Err(SplitError::LengthMismatch {
                values: values.len(),
                labels: labels.len(),
            });
        }
        let samples = values
            .iter()
            .zip(labels)
            .map(|(&value, &label)| Sample::new(value, label))
            .collect();
        Self::new(samples)
    }

    /// Return the samples in their original order.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Return the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; a dataset holds at least one sample.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Class counts over every sample.
    #[must_use]
    pub fn full_aggregator(&self) -> ImpurityAggregator<K> {
        ImpurityAggregator::from_labels(self.samples.iter().map(|s| s.label))
    }
}

#[cfg(test)]
mod tests {
    use super::{Dataset, Sample};
    use crate::error::SplitError;

    #[test]
    fn accepts_valid_samples() {
        let ds = Dataset::<2>::from_columns(&[0.5, 0.1, 0.9], &[1, 0, 1]).unwrap();
        assert_eq!(ds.len(), 3);
        assert!(!ds.is_empty());
        assert_eq!(ds.samples()[0], Sample::new(0.5, 1));
        assert_eq!(ds.full_aggregator().counts(), &[1, 2]);
    }

    #[test]
    fn rejects_empty() {
        let err = Dataset::<2>::new(Vec::new()).unwrap_err();
        assert_eq!(err, SplitError::EmptyDataset);
    }

    #[test]
    fn rejects_zero_classes() {
        let err = Dataset::<0>::new(vec![Sample::new(1.0, 0)]).unwrap_err();
        assert_eq!(err, SplitError::ZeroClasses);
    }

    #[test]
    fn rejects_label_out_of_range() {
        let err = Dataset::<3>::from_columns(&[1.0, 2.0], &[2, 3]).unwrap_err();
        assert_eq!(
            err,
            SplitError::LabelOutOfRange {
                sample_index: 1,
                label: 3,
                n_classes: 3,
            }
        );
    }

    #[test]
    fn rejects_nan_and_infinity() {
        let err = Dataset::<2>::from_columns(&[1.0, f64::NAN], &[0, 1]).unwrap_err();
        assert_eq!(err, SplitError::NonFiniteValue { sample_index: 1 });

        let err = Dataset::<2>::from_columns(&[f64::NEG_INFINITY], &[0]).unwrap_err();
        assert_eq!(err, SplitError::NonFiniteValue { sample_index: 0 });
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = Dataset::<2>::from_columns(&[1.0, 2.0], &[0]).unwrap_err();
        assert_eq!(err, SplitError::LengthMismatch { values: 2, labels: 1 });
    }

    #[test]
    fn error_messages() {
        let err = SplitError::LabelOutOfRange {
            sample_index: 4,
            label: 12,
            n_classes: 10,
        };
        assert_eq!(
            err.to_string(),
            "sample 4 has label 12, expected a label below 10"
        );
    }
}
