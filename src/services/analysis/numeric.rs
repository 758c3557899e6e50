use indexmap::IndexMap;

use super::types::{NumericStats, NumericSummary};
use super::utils::{format_fixed2, to_number};
use crate::models::Dataset;

/// Raw statistics for every column holding at least one finite number.
///
/// Columns with no convertible values are omitted rather than zero-filled.
pub fn numeric_stats(dataset: &Dataset) -> IndexMap<String, NumericStats> {
    dataset
        .columns()
        .iter()
        .filter_map(|column| {
            let values: Vec<f64> = dataset
                .column_values(column)
                .filter_map(|value| value.and_then(to_number))
                .collect();
            describe(values).map(|stats| (column.clone(), stats))
        })
        .collect()
}

/// Display summaries, one per column returned by [`numeric_stats`].
pub fn numeric_summaries(dataset: &Dataset) -> IndexMap<String, NumericSummary> {
    numeric_stats(dataset)
        .into_iter()
        .map(|(column, stats)| (column, NumericSummary::from(&stats)))
        .collect()
}

/// Population statistics over `values`; `None` when empty.
pub fn describe(mut values: Vec<f64>) -> Option<NumericStats> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));

    let count = values.len();
    let min = values[0];
    let max = values[count - 1];

    // Clamped so float drift never pushes the mean outside the observed range.
    let mean = (values.iter().sum::<f64>() / count as f64).clamp(min, max);

    let mid = count / 2;
    let median = if count % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    };

    let std_dev = if min == max {
        0.0
    } else {
        let variance =
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;
        variance.sqrt()
    };

    Some(NumericStats {
        count,
        mean,
        median,
        min,
        max,
        std_dev,
    })
}

impl From<&NumericStats> for NumericSummary {
    fn from(stats: &NumericStats) -> Self {
        Self {
            count: stats.count,
            mean: format_fixed2(stats.mean),
            median: format_fixed2(stats.median),
            min: format_fixed2(stats.min),
            max: format_fixed2(stats.max),
            std_dev: format_fixed2(stats.std_dev),
        }
    }
}
