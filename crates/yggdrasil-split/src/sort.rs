use crate::aggregator::ImpurityAggregator;
use crate::dataset::Dataset;

/// Samples of a [`Dataset`] arranged by ascending feature value, together
/// with the class counts of the whole dataset.
///
/// `order[i]` is the index, in the dataset, of the sample with the `i`-th
/// smallest value, and `values[i]` is that value. Only [`sort_samples`]
/// builds one, so the values are finite, the labels are below `K`, and the
/// full aggregator always counts exactly these samples.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedSamples<const K: usize> {
    order: Vec<usize>,
    values: Vec<f64>,
    labels: Vec<usize>,
    full: ImpurityAggregator<K>,
}

impl<const K: usize> SortedSamples<K> {
    /// Return the sorting permutation.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Return the feature values in non-decreasing order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Return the labels, permuted to line up with [`values`](Self::values).
    #[must_use]
    pub fn labels_in_order(&self) -> &[usize] {
        &self.labels
    }

    /// Return the class counts over every sample.
    #[must_use]
    pub fn full_aggregator(&self) -> &ImpurityAggregator<K> {
        &self.full
    }

    /// Return the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; a dataset holds at least one sample.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Return the largest feature value, if any.
    #[must_use]
    pub fn last_value(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

/// Sort a dataset by feature value in O(n log n).
///
/// Ties keep an unspecified relative order; every sample sharing a value
/// lands on the same side of any threshold, so the scan does not depend on
/// it.
#[must_use]
pub fn sort_samples<const K: usize>(dataset: &Dataset<K>) -> SortedSamples<K> {
    let samples = dataset.samples();
    let mut order: Vec<usize> = (0..samples.len()).collect();
    order.sort_unstable_by(|&a, &b| samples[a].value().total_cmp(&samples[b].value()));

    let (values, labels): (Vec<f64>, Vec<usize>) = order
        .iter()
        .map(|&i| (samples[i].value(), samples[i].label()))
        .unzip();

    SortedSamples {
        order,
        values,
        labels,
        full: dataset.full_aggregator(),
    }
}
