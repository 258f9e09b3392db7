// K6LogView - core/export.rs
//
// CSV and JSON export of the currently visible log records.
// Core layer: writes to any Write trait object.

use crate::core::model::LogRecord;
use crate::util::constants::MAX_EXPORT_RECORDS;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export records to CSV format.
///
/// Writes: time, level, message, VU, ITER (the viewer's column order).
pub fn export_csv<W: Write>(
    records: &[&LogRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_size(records)?;
    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["time", "level", "message", "VU", "ITER"])
        .map_err(csv_err)?;

    for record in records {
        let vu = record.vu_text();
        let iter = record.iter_text();
        csv_writer
            .write_record([
                record.time.as_str(),
                record.level.as_str(),
                record.message_text(),
                vu.as_str(),
                iter.as_str(),
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(records.len())
}

/// Export records to JSON format (array of objects).
pub fn export_json<W: Write>(
    records: &[&LogRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_size(records)?;
    serde_json::to_writer_pretty(writer, records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(records.len())
}

fn check_size(records: &[&LogRecord]) -> Result<(), ExportError> {
    if records.len() > MAX_EXPORT_RECORDS {
        return Err(ExportError::TooManyRecords {
            count: records.len(),
            max: MAX_EXPORT_RECORDS,
        });
    }
    Ok(())
}
