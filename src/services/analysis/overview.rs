use super::numeric::numeric_summaries;
use super::types::DatasetOverview;
use crate::models::LoadedDataset;

/// Dashboard counts for the currently loaded dataset.
///
/// The numeric column count is the number of columns with any numeric value, matching the
/// numeric summary table rather than the 80% classification.
pub fn dataset_overview(loaded: &LoadedDataset) -> DatasetOverview {
    let dataset = &loaded.dataset;
    DatasetOverview {
        row_count: dataset.len(),
        column_count: dataset.columns().len(),
        numeric_column_count: numeric_summaries(dataset).len(),
        source: loaded.source.clone(),
        loaded_at: loaded.loaded_at,
    }
}
