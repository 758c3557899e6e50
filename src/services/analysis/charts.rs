use indexmap::IndexMap;
use smallvec::SmallVec;

use super::classifier::classify_columns;
use super::types::*;
use super::utils::to_display_string;
use crate::models::Dataset;

/// Applies defaults to a caller selection.
///
/// Unset, empty or unknown columns fall back: x to the first numeric column, y to the
/// second numeric column (or the first if there is only one), category to the first
/// categorical column (or the first numeric one).
pub fn resolve_selection(
    dataset: &Dataset,
    types: &ColumnTypes,
    selection: &ChartSelection,
) -> ResolvedSelection {
    let valid = |choice: &Option<String>| {
        choice
            .as_deref()
            .filter(|name| !name.is_empty() && dataset.columns().iter().any(|c| c == name))
            .map(str::to_string)
    };

    let x_axis = valid(&selection.x_axis).or_else(|| types.numeric.first().cloned());
    let y_axis = valid(&selection.y_axis).or_else(|| {
        types
            .numeric
            .get(1)
            .or_else(|| types.numeric.first())
            .cloned()
    });
    let category_field = valid(&selection.category_field).or_else(|| {
        types
            .categorical
            .first()
            .or_else(|| types.numeric.first())
            .cloned()
    });

    ResolvedSelection {
        x_axis,
        y_axis,
        category_field,
    }
}

/// Builds the projection for one chart kind.
pub fn build_projection<'a>(
    dataset: &'a Dataset,
    kind: ChartKind,
    selection: &ChartSelection,
) -> ChartProjection<'a> {
    let types = classify_columns(dataset);
    let resolved = resolve_selection(dataset, &types, selection);
    tracing::debug!("Building {:?} chart with {:?}", kind, resolved);

    match kind {
        ChartKind::Bar | ChartKind::Line | ChartKind::Scatter => ChartProjection::Series {
            kind,
            x_axis: resolved.x_axis,
            y_axis: resolved.y_axis,
            records: dataset.records(),
        },
        ChartKind::Pie => {
            let buckets = match resolved.category_field.as_deref() {
                Some(field) => pie_buckets(dataset, field),
                None => SmallVec::new(),
            };
            ChartProjection::Pie {
                category_field: resolved.category_field,
                buckets,
            }
        }
    }
}

/// Counts records per category value, keeping the first eight categories encountered.
///
/// Null, missing and empty values are grouped under `"Unknown"`. Buckets are kept in
/// insertion order, not ranked by size.
pub fn pie_buckets(dataset: &Dataset, field: &str) -> SmallVec<[Bucket; PIE_BUCKETS]> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for value in dataset.column_values(field) {
        let name = value
            .map(to_display_string)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());
        *counts.entry(name).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .take(PIE_BUCKETS)
        .map(|(name, value)| Bucket { name, value })
        .collect()
}
