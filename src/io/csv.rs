//! CSV adapter for import batches.
//!
//! Maps already-tokenized CSV rows onto [`Record`]s. Cell typing is
//! inferred: empty cells are absent, numeric cells become numbers,
//! cells containing a `;` or `|` separator become lists (the form
//! vehicle skill and capacity columns arrive in), everything else is
//! text.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::models::{FieldValue, Record};
use crate::{Error, Result};

/// Parses one CSV cell into a field value.
fn parse_cell(cell: &str) -> FieldValue {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return FieldValue::Null;
    }
    if trimmed.contains([';', '|']) {
        let items = trimmed
            .split([';', '|'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_scalar)
            .collect();
        return FieldValue::List(items);
    }
    parse_scalar(trimmed)
}

/// Parses a scalar cell: number when it parses as one, text otherwise.
fn parse_scalar(cell: &str) -> FieldValue {
    cell.parse::<f64>()
        .map_or_else(|_| FieldValue::Text(cell.to_string()), FieldValue::Number)
}

/// Reads an entire CSV document into records.
///
/// The first row must be a header row naming the fields.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when the header row is missing or
/// empty, and [`Error::OperationFailed`] on malformed CSV.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<Record>> {
    read_records_delimited(reader, b',')
}

/// Reads a delimited document into records with an explicit cell
/// delimiter (`b','` for CSV, `b'\t'` for TSV).
///
/// # Errors
///
/// Same as [`read_records`].
pub fn read_records_delimited<R: BufRead>(reader: R, delimiter: u8) -> Result<Vec<Record>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| Error::OperationFailed {
            operation: "read_csv_headers".to_string(),
            cause: e.to_string(),
        })?
        .clone();

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(Error::InvalidInput(
            "CSV file has no header row".to_string(),
        ));
    }

    let mut records = Vec::new();
    let mut row = csv::StringRecord::new();
    loop {
        let has_row = csv_reader
            .read_record(&mut row)
            .map_err(|e| Error::OperationFailed {
                operation: "read_csv".to_string(),
                cause: e.to_string(),
            })?;
        if !has_row {
            break;
        }

        let mut record = Record::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            let value = parse_cell(cell);
            if !value.is_null() {
                record.insert(header, value);
            }
        }
        records.push(record);
    }

    Ok(records)
}

/// Reads a delimited file into records.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] when the file cannot be opened,
/// plus everything [`read_records`] can return.
pub fn read_records_from_path(path: &Path, delimiter: u8) -> Result<Vec<Record>> {
    let file = std::fs::File::open(path).map_err(|e| Error::OperationFailed {
        operation: format!("open '{}'", path.display()),
        cause: e.to_string(),
    })?;
    read_records_delimited(std::io::BufReader::new(file), delimiter)
}

/// Writes records as CSV with a header row.
///
/// The header is the sorted union of all field names across the
/// records; absent fields render as empty cells, lists join with `;`.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] on write failures.
pub fn write_records<W: Write>(writer: W, records: &[Record]) -> Result<()> {
    write_records_delimited(writer, records, b',')
}

/// Writes records as a delimited document with an explicit cell
/// delimiter.
///
/// # Errors
///
/// Same as [`write_records`].
pub fn write_records_delimited<W: Write>(
    writer: W,
    records: &[Record],
    delimiter: u8,
) -> Result<()> {
    let mut headers: Vec<&str> = Vec::new();
    for record in records {
        for name in record.field_names() {
            if !headers.contains(&name) {
                headers.push(name);
            }
        }
    }
    headers.sort_unstable();

    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    let write_err = |e: csv::Error| Error::OperationFailed {
        operation: "write_csv".to_string(),
        cause: e.to_string(),
    };

    csv_writer.write_record(&headers).map_err(write_err)?;
    for record in records {
        let row: Vec<String> = headers
            .iter()
            .map(|header| record.get(header).map_or_else(String::new, render_cell))
            .collect();
        csv_writer.write_record(&row).map_err(write_err)?;
    }
    csv_writer.flush().map_err(|e| Error::OperationFailed {
        operation: "write_csv".to_string(),
        cause: e.to_string(),
    })?;

    Ok(())
}

/// Renders a field value as one CSV cell.
fn render_cell(value: &FieldValue) -> String {
    match value {
        FieldValue::List(items) => items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(";"),
        other => other.to_string(),
    }
}
