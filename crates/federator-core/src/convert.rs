//! Decoded series -> samples.

use crate::model::{Metric, Sample};
use crate::protocol::remote::TimeSeries;

/// Expand one series into samples sharing its identity, in input order.
///
/// Total over decoder output: no labels and no samples are both fine.
pub fn series_to_samples(series: &TimeSeries) -> Vec<Sample> {
    let metric: Metric = series
        .labels
        .iter()
        .map(|l| (l.name.as_str(), l.value.as_str()))
        .collect();

    series
        .samples
        .iter()
        .map(|s| Sample::new(metric.clone(), s.value, s.timestamp))
        .collect()
}
