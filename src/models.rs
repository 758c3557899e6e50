use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single cell as it arrives from ingestion.
///
/// An "undefined" cell is a key missing from its [`Record`]; it is never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

/// One row, keyed by column name in insertion order.
pub type Record = IndexMap<String, CellValue>;

/// An immutable, ordered collection of records sharing the first record's columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    /// Builds a dataset whose schema is taken from the first record's keys.
    pub fn new(records: Vec<Record>) -> Self {
        let columns = records
            .first()
            .map(|record| record.keys().cloned().collect())
            .unwrap_or_default();
        Self { columns, records }
    }

    /// Builds a dataset with an explicit header, used when the source has a header row
    /// but the first record may be missing trailing keys.
    pub fn with_columns(columns: Vec<String>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates the cells of `column`, yielding `None` for records that omit it.
    pub fn column_values<'a>(
        &'a self,
        column: &'a str,
    ) -> impl Iterator<Item = Option<&'a CellValue>> + 'a {
        self.records.iter().map(move |record| record.get(column))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DatasetSource {
    Sample,
    #[serde(rename_all = "camelCase")]
    Upload { file_name: String },
}

/// The unit swapped in and out of the dataset store.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub source: DatasetSource,
    pub loaded_at: DateTime<Utc>,
}

impl LoadedDataset {
    pub fn new(dataset: Dataset, source: DatasetSource) -> Self {
        Self {
            dataset,
            source,
            loaded_at: Utc::now(),
        }
    }
}
