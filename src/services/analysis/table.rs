use super::types::{TablePage, PAGE_SIZE};
use super::utils::to_display_string;
use crate::models::{Dataset, Record};

/// Returns true when any non-null value of `record` contains `needle` (already lowercased).
fn matches(record: &Record, needle: &str) -> bool {
    record
        .values()
        .filter(|value| !value.is_null())
        .any(|value| to_display_string(value).to_lowercase().contains(needle))
}

/// Records matching `search`, case-insensitively. An empty term matches everything.
pub fn filter_records<'a>(dataset: &'a Dataset, search: &str) -> Vec<&'a Record> {
    if search.is_empty() {
        return dataset.records().iter().collect();
    }
    let needle = search.to_lowercase();
    dataset
        .records()
        .iter()
        .filter(|record| matches(record, &needle))
        .collect()
}

/// One 1-based page of the filtered records.
///
/// Pages outside `1..=total_pages` yield an empty slice; clamping is left to the caller,
/// who must also reset to page 1 when the search term changes.
pub fn table_page<'a>(dataset: &'a Dataset, search: &str, page: usize) -> TablePage<'a> {
    let filtered = filter_records(dataset, search);
    let total_matches = filtered.len();
    let total_pages = total_matches.div_ceil(PAGE_SIZE);

    let rows = match page.checked_sub(1) {
        Some(index) => filtered
            .into_iter()
            .skip(index.saturating_mul(PAGE_SIZE))
            .take(PAGE_SIZE)
            .collect(),
        None => Vec::new(),
    };

    TablePage {
        rows,
        page,
        page_size: PAGE_SIZE,
        total_matches,
        total_pages,
    }
}

/// The first `limit` records, unfiltered.
pub fn preview(dataset: &Dataset, limit: usize) -> &[Record] {
    let records = dataset.records();
    &records[..limit.min(records.len())]
}
