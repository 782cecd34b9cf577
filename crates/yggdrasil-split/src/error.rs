/// Errors from split search input validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SplitError {
    /// Returned when the dataset has zero samples.
    #[error("dataset has zero samples")]
    EmptyDataset,

    /// Returned when the class count `K` is zero.
    #[error("number of classes must be at least 1, got 0")]
    ZeroClasses,

    /// Returned when a label is outside `[0, n_classes)`.
    #[error("sample {sample_index} has label {label}, expected a label below {n_classes}")]
    LabelOutOfRange {
        /// The zero-based index of the offending sample.
        sample_index: usize,
        /// The invalid label.
        label: usize,
        /// The number of classes the dataset was declared with.
        n_classes: usize,
    },

    /// Returned when a feature value is NaN or infinite.
    #[error("non-finite value at sample {sample_index}")]
    NonFiniteValue {
        /// The zero-based index of the offending sample.
        sample_index: usize,
    },

    /// Returned when value and label columns have different lengths.
    #[error("got {values} values but {labels} labels")]
    LengthMismatch {
        /// Number of feature values provided.
        values: usize,
        /// Number of labels provided.
        labels: usize,
    },
}
