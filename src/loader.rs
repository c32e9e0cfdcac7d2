//! Intake record loading utilities
//!
//! Records arrive as JSON Lines: one JSON object per line, already reduced to
//! the logical intake fields by the extraction stage. A line that is not an
//! object is a structural precondition violation and fails the load; a
//! malformed field inside an object never does.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use serde_json::Value;

use crate::error::{Result, TriageStatsError};
use crate::models::record::RawRecord;
use crate::utils::logging::{log_batch_complete, log_operation_start, log_warning};

/// Read records from any buffered JSON Lines source
///
/// Blank lines are skipped.
///
/// # Errors
/// Returns `InvalidRecord` with the 1-based line number if a line is not a
/// JSON object, or `Stream` if reading fails.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<RawRecord>> {
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let value: Value = serde_json::from_str(&line)
            .map_err(|e| TriageStatsError::invalid_record(line_number, e.to_string()))?;
        if !value.is_object() {
            return Err(TriageStatsError::invalid_record(
                line_number,
                "expected a JSON object",
            ));
        }
        let record = serde_json::from_value::<RawRecord>(value)
            .map_err(|e| TriageStatsError::invalid_record(line_number, e.to_string()))?;
        records.push(record);
    }

    Ok(records)
}

/// Load records from a JSON Lines file
///
/// # Arguments
/// * `path` - Path to the input file
///
/// # Returns
/// The raw records in file order
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>> {
    let start = Instant::now();
    log_operation_start("Reading intake records from", path);

    let file = File::open(path).map_err(|e| TriageStatsError::io(path, e))?;
    let records = read_records(BufReader::new(file)).map_err(|e| match e {
        TriageStatsError::Stream(source) => TriageStatsError::io(path, source),
        other => other,
    })?;

    if records.is_empty() {
        log_warning("No intake records found", Some(path));
    } else {
        log_batch_complete("read", records.len(), Some(start.elapsed()));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_records_skips_blank_lines() {
        let input = concat!(
            "{\"symptoms\": \"fever, cough\", \"gender\": \"M\"}\n",
            "\n",
            "   \n",
            "{\"symptoms\": [\"rash\"], \"age\": 12}\n",
        );
        let records = read_records(Cursor::new(input)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].age, serde_json::json!(12));
    }

    #[test]
    fn test_non_object_line_is_invalid_record() {
        let input = "{\"symptoms\": \"fever\"}\n[\"fever\"]\n";
        match read_records(Cursor::new(input)) {
            Err(TriageStatsError::InvalidRecord { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected invalid record, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_is_invalid_record() {
        let input = "{\"symptoms\": \"fever\"\n";
        assert!(matches!(
            read_records(Cursor::new(input)),
            Err(TriageStatsError::InvalidRecord { line: 1, .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_records(Path::new("/nonexistent/intake.jsonl"));
        assert!(matches!(result, Err(TriageStatsError::Io { .. })));
    }
}
