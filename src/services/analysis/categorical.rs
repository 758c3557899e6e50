use indexmap::IndexMap;

use super::types::{CategoricalSummary, CATEGORICAL_CARDINALITY_LIMIT, TOP_VALUES};
use super::utils::{is_numeric_text, to_display_string};
use crate::models::Dataset;

/// Frequency summaries for columns with low cardinality or any non-numeric value.
///
/// This rule is independent of [`super::classifier::classify_columns`]; a low-cardinality
/// numeric column appears in both the numeric and the categorical summaries.
pub fn categorical_summaries(dataset: &Dataset) -> IndexMap<String, CategoricalSummary> {
    let mut summaries = IndexMap::new();

    for column in dataset.columns() {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for value in dataset.column_values(column) {
            let key = value.map(to_display_string).unwrap_or_default();
            *counts.entry(key).or_insert(0) += 1;
        }

        let has_text = counts.keys().any(|value| !is_numeric_text(value));
        if counts.len() >= CATEGORICAL_CARDINALITY_LIMIT && !has_text {
            tracing::debug!("Skipping high-cardinality numeric column {}", column);
            continue;
        }

        let unique_count = counts.len();
        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        // stable: ties keep first-seen order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        summaries.insert(
            column.clone(),
            CategoricalSummary {
                unique_count,
                top_values: ranked.into_iter().take(TOP_VALUES).collect(),
            },
        );
    }

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CellValue, Record};

    fn single_column(values: &[CellValue]) -> Dataset {
        Dataset::new(
            values
                .iter()
                .map(|v| Record::from([("c".to_string(), v.clone())]))
                .collect(),
        )
    }

    #[test]
    fn months_tie_in_first_seen_order() {
        let ds = Dataset::new(
            [("Jan", 100), ("Feb", 120), ("Mar", 150)]
                .into_iter()
                .map(|(month, sales)| {
                    Record::from([
                        ("month".to_string(), CellValue::from(month)),
                        ("sales".to_string(), CellValue::from(sales as i64)),
                    ])
                })
                .collect(),
        );
        let summaries = categorical_summaries(&ds);
        let month = &summaries["month"];
        assert_eq!(month.unique_count, 3);
        assert_eq!(
            month.top_values.as_slice(),
            &[("Jan".to_string(), 1), ("Feb".to_string(), 1), ("Mar".to_string(), 1)]
        );
        // three distinct numbers are still under the cardinality limit
        assert!(summaries.contains_key("sales"));
    }

    #[test]
    fn top_values_sorted_and_capped() {
        let values: Vec<CellValue> = "a b b c c c d d d d e f g a"
            .split(' ')
            .map(CellValue::from)
            .collect();
        let summaries = categorical_summaries(&single_column(&values));
        let summary = &summaries["c"];
        assert_eq!(summary.unique_count, 7);
        assert_eq!(summary.top_values.len(), 5);
        let counts: Vec<usize> = summary.top_values.iter().map(|(_, n)| *n).collect();
        assert_eq!(counts, [4, 3, 2, 2, 1]);
        assert_eq!(summary.top_values[2].0, "a");
        assert_eq!(summary.top_values[3].0, "b");
        assert_eq!(summary.top_values[4].0, "e");
    }

    #[test]
    fn high_cardinality_numeric_column_is_excluded() {
        let values: Vec<CellValue> = (0..20).map(|i| CellValue::from(i as i64)).collect();
        assert!(categorical_summaries(&single_column(&values)).is_empty());
    }

    #[test]
    fn infinite_and_overflowing_text_counts_as_numeric() {
        let mut values: Vec<CellValue> = (0..20).map(|i| CellValue::from(format!("{i}"))).collect();
        values.push(CellValue::from("Infinity"));
        values.push(CellValue::from("-Infinity"));
        values.push(CellValue::from("1e400"));
        assert!(categorical_summaries(&single_column(&values)).is_empty());

        values.push(CellValue::from("n/a"));
        assert_eq!(categorical_summaries(&single_column(&values))["c"].unique_count, 24);
    }

    #[test]
    fn high_cardinality_text_column_is_included() {
        let values: Vec<CellValue> = (0..20).map(|i| CellValue::from(format!("id-{i}"))).collect();
        let summaries = categorical_summaries(&single_column(&values));
        assert_eq!(summaries["c"].unique_count, 20);
    }

    #[test]
    fn nulls_become_empty_category() {
        let mut values: Vec<CellValue> = (0..20).map(|i| CellValue::from(i as i64)).collect();
        values.push(CellValue::Null);
        values.push(CellValue::Null);
        // still all-numeric apart from the empty category, so excluded
        assert!(categorical_summaries(&single_column(&values)).is_empty());

        let summaries = categorical_summaries(&single_column(&[
            CellValue::Null,
            CellValue::from("x"),
            CellValue::Null,
        ]));
        assert_eq!(summaries["c"].top_values[0], (String::new(), 2));
    }
}
