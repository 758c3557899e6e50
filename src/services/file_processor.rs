use std::collections::HashSet;
use std::io::Cursor;

use bytes::Bytes;
use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};

use crate::error::AppError;
use crate::models::{CellValue, Dataset, Record};
use crate::services::analysis::utils::to_display_string;

pub const EXPORT_FILE_NAME: &str = "data_export.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Csv,
    Xlsx,
}

impl UploadKind {
    pub fn from_file_name(file_name: &str) -> Result<Self, AppError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(UploadKind::Csv),
            "xlsx" => Ok(UploadKind::Xlsx),
            _ => Err(AppError::UnsupportedFile(format!(
                "'{}' is not a CSV or XLSX file",
                file_name
            ))),
        }
    }
}

/// Parses an uploaded file into a dataset, choosing the reader from the file extension.
pub fn load_upload(file_name: &str, file_data: Bytes) -> Result<Dataset, AppError> {
    let start = std::time::Instant::now();
    let kind = UploadKind::from_file_name(file_name)?;
    tracing::info!("Parsing {:?} upload '{}' ({} bytes)", kind, file_name, file_data.len());

    let dataset = match kind {
        UploadKind::Csv => parse_csv(&file_data)?,
        UploadKind::Xlsx => parse_xlsx(file_data)?,
    };

    tracing::info!(
        "Loaded {} rows x {} columns from '{}' in {:?}",
        dataset.len(),
        dataset.columns().len(),
        file_name,
        start.elapsed()
    );
    Ok(dataset)
}

/// Makes header names unique, naming blanks by position and suffixing repeats.
pub fn unique_column_name(name: &str, index: usize, existing_names: &mut HashSet<String>) -> String {
    let base = name.trim();
    let base = if base.is_empty() {
        format!("column_{}", index + 1)
    } else {
        base.to_string()
    };

    let mut candidate = base.clone();
    let mut counter = 1;
    while !existing_names.insert(candidate.clone()) {
        candidate = format!("{}_{}", base, counter);
        counter += 1;
    }
    candidate
}

fn unique_headers<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut existing_names = HashSet::new();
    names
        .enumerate()
        .map(|(idx, name)| unique_column_name(name, idx, &mut existing_names))
        .collect()
}

/// Reads CSV text with a header row. Every field arrives as text.
pub fn parse_csv(data: &[u8]) -> Result<Dataset, AppError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers = unique_headers(reader.headers()?.iter());
    if headers.is_empty() {
        return Err(AppError::ParseError("CSV file has no header row".to_string()));
    }

    let mut records = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let row = result?;
        if row.len() > headers.len() {
            tracing::debug!(
                "Row {} has {} fields, dropping {} extra",
                row_idx + 1,
                row.len(),
                row.len() - headers.len()
            );
        }

        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(name, field)| (name.clone(), CellValue::from(field)))
            .collect();
        records.push(record);
    }

    Ok(Dataset::with_columns(headers, records))
}

fn cell_value(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Empty => None,
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::Int(i) => Some(CellValue::Number(*i as f64)),
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        Data::String(s) => Some(CellValue::Text(s.clone())),
        other => Some(CellValue::Text(other.to_string())),
    }
}

/// Reads the first worksheet of an XLSX workbook, taking row 0 as the header.
pub fn parse_xlsx(file_data: Bytes) -> Result<Dataset, AppError> {
    let cursor = Cursor::new(file_data);
    let mut workbook: Xlsx<_> = open_workbook_from_rs(cursor)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AppError::ParseError("No sheets found in workbook".to_string()))?;
    tracing::debug!("Reading worksheet {}", sheet_name);

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows = range.rows();

    let header_cells: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .unwrap_or_default();
    if header_cells.is_empty() {
        return Err(AppError::ParseError(format!("Sheet {} is empty", sheet_name)));
    }
    let headers = unique_headers(header_cells.iter().map(String::as_str));

    let records = rows
        .filter(|row| !row.iter().all(|cell| matches!(cell, Data::Empty)))
        .map(|row| {
            headers
                .iter()
                .zip(row.iter())
                .filter_map(|(name, cell)| cell_value(cell).map(|value| (name.clone(), value)))
                .collect::<Record>()
        })
        .collect();

    Ok(Dataset::with_columns(headers, records))
}

/// Writes the dataset as CSV: a header row, then one line per record in column order.
///
/// Missing and null cells are written empty; fields with commas, quotes or newlines are
/// quoted.
pub fn export_csv(dataset: &Dataset) -> Result<String, AppError> {
    if dataset.columns().is_empty() {
        return Ok(String::new());
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(dataset.columns())?;
    for record in dataset.records() {
        writer.write_record(dataset.columns().iter().map(|column| {
            record.get(column).map(to_display_string).unwrap_or_default()
        }))?;
    }

    let buffer = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to flush CSV export: {}", e)))?;
    String::from_utf8(buffer)
        .map_err(|e| AppError::Internal(format!("CSV export is not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_kind_from_extension() {
        assert_eq!(UploadKind::from_file_name("Data.CSV").unwrap(), UploadKind::Csv);
        assert_eq!(UploadKind::from_file_name("book.xlsx").unwrap(), UploadKind::Xlsx);
        assert!(matches!(
            UploadKind::from_file_name("notes.txt"),
            Err(AppError::UnsupportedFile(_))
        ));
        assert!(UploadKind::from_file_name("csv").is_err());
    }

    #[test]
    fn csv_rows_become_text_records() {
        let ds = parse_csv(b"month,sales\nJan,100\n\nFeb,120\n").unwrap();
        assert_eq!(ds.columns(), ["month", "sales"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[1]["sales"], CellValue::from("120"));
    }

    #[test]
    fn duplicate_and_blank_headers_are_renamed() {
        let ds = parse_csv(b"a,a,,a\n1,2,3,4\n").unwrap();
        assert_eq!(ds.columns(), ["a", "a_1", "column_3", "a_2"]);
    }

    #[test]
    fn short_rows_omit_keys_and_long_rows_are_truncated() {
        let ds = parse_csv(b"a,b,c\n1\n1,2,3,4\n").unwrap();
        // columns come from the header even though the first record only has `a`
        assert_eq!(ds.columns(), ["a", "b", "c"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].len(), 1);
        assert!(ds.records()[0].get("b").is_none());
        assert_eq!(ds.records()[1].len(), 3);
    }

    #[test]
    fn header_only_csv_is_an_empty_dataset() {
        let ds = parse_csv(b"a,b\n").unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.columns(), ["a", "b"]);
        assert!(matches!(parse_csv(b""), Err(AppError::ParseError(_))));
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let result = parse_csv(b"a,b\n\xff\xfe,1\n");
        assert!(matches!(result, Err(AppError::ParseError(_))));
    }

    #[test]
    fn export_quotes_commas_and_round_trips() {
        let ds = Dataset::new(vec![
            Record::from([
                ("city".to_string(), CellValue::from("Portland, OR")),
                ("pop".to_string(), CellValue::from(650000i64)),
                ("note".to_string(), CellValue::from("say \"hi\"")),
            ]),
            Record::from([
                ("city".to_string(), CellValue::from("Austin")),
                ("pop".to_string(), CellValue::Null),
            ]),
        ]);

        let text = export_csv(&ds).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("city,pop,note"));
        assert_eq!(lines.next(), Some("\"Portland, OR\",650000,\"say \"\"hi\"\"\""));
        assert_eq!(lines.next(), Some("Austin,,"));

        let reparsed = parse_csv(text.as_bytes()).unwrap();
        assert_eq!(reparsed.columns(), ds.columns());
        assert_eq!(reparsed.len(), ds.len());
        assert_eq!(reparsed.records()[0]["city"], CellValue::from("Portland, OR"));
    }

    #[test]
    fn single_column_blank_cells_survive_round_trip() {
        let ds = Dataset::new(vec![
            Record::from([("a".to_string(), CellValue::from("x"))]),
            Record::from([("a".to_string(), CellValue::Null)]),
            Record::from([("a".to_string(), CellValue::from(""))]),
        ]);

        let text = export_csv(&ds).unwrap();
        let reparsed = parse_csv(text.as_bytes()).unwrap();
        assert_eq!(reparsed.len(), 3);
        assert_eq!(reparsed.columns(), ["a"]);
        assert_eq!(reparsed.records()[1]["a"], CellValue::from(""));
        assert_eq!(reparsed.records()[2]["a"], CellValue::from(""));
    }

    #[test]
    fn xlsx_cells_keep_their_types() {
        let bytes = Bytes::from_static(include_bytes!("../../tests/fixtures/sales.xlsx"));
        let ds = load_upload("sales.xlsx", bytes).unwrap();

        assert_eq!(ds.columns(), ["month", "amount", "count", "active"]);
        // the blank third row is dropped
        assert_eq!(ds.len(), 2);

        let jan = &ds.records()[0];
        assert_eq!(jan["month"], CellValue::from("Jan"));
        assert_eq!(jan["amount"], CellValue::Number(1.5));
        assert_eq!(jan["count"], CellValue::Number(3.0));
        assert_eq!(jan["active"], CellValue::Bool(true));

        let feb = &ds.records()[1];
        assert_eq!(feb["amount"], CellValue::Number(2.0));
        assert!(feb.get("count").is_none());
        assert_eq!(feb["active"], CellValue::Bool(false));
    }

    #[test]
    fn sample_export_round_trips() {
        let ds = crate::services::sample::sample_dataset();
        let reparsed = parse_csv(export_csv(&ds).unwrap().as_bytes()).unwrap();
        assert_eq!(reparsed.columns(), ds.columns());
        assert_eq!(reparsed.len(), 12);
        assert_eq!(reparsed.records()[0]["sales"], CellValue::from("100"));
    }

    #[test]
    fn corrupt_xlsx_is_a_parse_error() {
        let result = load_upload("book.xlsx", Bytes::from_static(b"not a zip archive"));
        assert!(matches!(result, Err(AppError::ParseError(_))));
    }
}
