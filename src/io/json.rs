//! JSON adapter for import batches.
//!
//! Reads a JSON array of objects into [`Record`]s via the untagged
//! [`FieldValue`](crate::models::FieldValue) representation, and writes
//! batches back out as pretty-printed JSON.

use std::io::{Read, Write};
use std::path::Path;

use crate::models::Record;
use crate::{Error, Result};

/// Reads a JSON array of objects into records.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when the document is not an array of
/// objects with null/string/number/list field values.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>> {
    serde_json::from_reader(reader)
        .map_err(|e| Error::InvalidInput(format!("expected a JSON array of objects: {e}")))
}

/// Reads a JSON file into records.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] when the file cannot be opened,
/// plus everything [`read_records`] can return.
pub fn read_records_from_path(path: &Path) -> Result<Vec<Record>> {
    let file = std::fs::File::open(path).map_err(|e| Error::OperationFailed {
        operation: format!("open '{}'", path.display()),
        cause: e.to_string(),
    })?;
    read_records(std::io::BufReader::new(file))
}

/// Writes records as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] on serialization or write
/// failures.
pub fn write_records<W: Write>(writer: W, records: &[Record]) -> Result<()> {
    serde_json::to_writer_pretty(writer, records).map_err(|e| Error::OperationFailed {
        operation: "write_json".to_string(),
        cause: e.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::FieldValue;

    #[test]
    fn test_read_array_of_objects() {
        let input = r#"[
            {"_id": "j1", "description": "Delivery 1", "locationLat": 52.52},
            {"description": "Delivery 2", "priority": 3, "tags": ["am", "fragile"]}
        ]"#;

        let records = read_records(input.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("locationLat"), Some(&FieldValue::from(52.52)));
        assert_eq!(
            records[1].get("tags"),
            Some(&FieldValue::List(vec![
                FieldValue::from("am"),
                FieldValue::from("fragile"),
            ]))
        );
    }

    #[test]
    fn test_read_rejects_non_array() {
        let err = read_records(r#"{"_id": "j1"}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_write_roundtrip() {
        let records = vec![
            Record::new()
                .with_field("_id", "v1")
                .with_field("capacity", 40.0),
        ];

        let mut buffer = Vec::new();
        write_records(&mut buffer, &records).unwrap();
        let back = read_records(buffer.as_slice()).unwrap();

        assert_eq!(back, records);
    }
}
