//! Best single-feature split search for CART-style decision trees.
//!
//! Sorts `(value, label)` samples by value, sweeps a threshold across the
//! sorted order while moving class counts from a right-hand aggregator into
//! a left-hand one, and keeps the threshold with the largest impurity
//! decrease.

mod aggregator;
mod config;
mod dataset;
mod error;
mod result;
mod scan;
mod sort;

pub use aggregator::{Impurity, ImpurityAggregator, SplitCriterion};
pub use config::{SplitConfig, find_best_split};
pub use dataset::{Dataset, Sample};
pub use error::SplitError;
pub use result::{BestSplit, SplitResult};
pub use scan::{Candidates, SplitCandidate, SplitScanner};
pub use sort::{SortedSamples, sort_samples};
