use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::models::{DatasetSource, Record};

pub const NUMERIC_THRESHOLD: f64 = 0.8;
pub const CATEGORICAL_CARDINALITY_LIMIT: usize = 15;
pub const TOP_VALUES: usize = 5;
pub const PIE_BUCKETS: usize = 8;
pub const PAGE_SIZE: usize = 10;
pub const PREVIEW_ROWS: usize = 5;
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Column names split by the 80% numeric rule, both in dataset order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColumnTypes {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

/// Raw statistics for one numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
}

/// Display form of [`NumericStats`], every statistic fixed to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericSummary {
    pub count: usize,
    pub mean: String,
    pub median: String,
    pub min: String,
    pub max: String,
    pub std_dev: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoricalSummary {
    pub unique_count: usize,
    pub top_values: SmallVec<[(String, usize); TOP_VALUES]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Scatter,
    Pie,
}

/// Caller-owned chart selection; any field may be unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSelection {
    pub x_axis: Option<String>,
    pub y_axis: Option<String>,
    pub category_field: Option<String>,
}

/// A selection after defaults have been applied. `None` means nothing was available.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSelection {
    pub x_axis: Option<String>,
    pub y_axis: Option<String>,
    pub category_field: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub name: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChartProjection<'a> {
    #[serde(rename_all = "camelCase")]
    Series {
        kind: ChartKind,
        x_axis: Option<String>,
        y_axis: Option<String>,
        records: &'a [Record],
    },
    #[serde(rename_all = "camelCase")]
    Pie {
        category_field: Option<String>,
        buckets: SmallVec<[Bucket; PIE_BUCKETS]>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePage<'a> {
    pub rows: Vec<&'a Record>,
    pub page: usize,
    pub page_size: usize,
    pub total_matches: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetOverview {
    pub row_count: usize,
    pub column_count: usize,
    pub numeric_column_count: usize,
    pub source: DatasetSource,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}
