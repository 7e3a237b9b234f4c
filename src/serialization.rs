//! NDJSON output for parsed records.

use std::io::Write;

use crate::error::ConvertError;
use crate::record::Record;

/// NDJSON (Newline Delimited JSON) writer
///
/// Writes one `{"table": ..., "columns": {...}}` object per line.
pub struct NdjsonWriter<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> NdjsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Write a single record as an NDJSON line
    pub fn write(&mut self, record: &Record) -> Result<(), ConvertError> {
        let json = serde_json::to_string(&record.to_json())?;
        writeln!(self.writer, "{}", json)?;
        self.written += 1;
        Ok(())
    }

    pub fn write_all(&mut self, records: &[Record]) -> Result<(), ConvertError> {
        for record in records {
            self.write(record)?;
        }
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn flush(&mut self) -> Result<(), ConvertError> {
        self.writer.flush()?;
        Ok(())
    }
}
