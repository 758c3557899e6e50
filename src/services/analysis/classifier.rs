use super::types::{ColumnTypes, NUMERIC_THRESHOLD};
use super::utils::to_number;
use crate::models::Dataset;

/// Splits the dataset's columns into numeric and categorical.
///
/// A column is numeric when at least 80% of all records hold a value for it that converts
/// to a finite number. Missing and null cells count against the ratio.
pub fn classify_columns(dataset: &Dataset) -> ColumnTypes {
    let total = dataset.len();
    if total == 0 {
        return ColumnTypes::default();
    }

    let mut types = ColumnTypes::default();
    for column in dataset.columns() {
        let numeric_count = dataset
            .column_values(column)
            .filter(|value| value.and_then(to_number).is_some())
            .count();

        if numeric_count as f64 / total as f64 >= NUMERIC_THRESHOLD {
            types.numeric.push(column.clone());
        } else {
            types.categorical.push(column.clone());
        }
    }

    tracing::debug!(
        "Classified {} numeric and {} categorical columns",
        types.numeric.len(),
        types.categorical.len()
    );
    types
}
