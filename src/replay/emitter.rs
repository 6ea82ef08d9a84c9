//! NDJSON emitter for recording runs.
//!
//! Records trace entries as newline-delimited JSON, one object per line.

use super::TraceRecord;
use crate::error::Error;
use crate::simulate::Run;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Writes [`TraceRecord`]s as NDJSON.
///
/// Each call to `emit()` writes one JSON object on a new line:
/// ```json
/// {"step":2,"symbol":"@","state":"after_at"}
/// ```
pub struct TraceEmitter {
    writer: std::io::BufWriter<std::fs::File>,
    count: usize,
}

impl TraceEmitter {
    /// Create a new emitter writing to the given file path.
    pub fn new(path: &Path) -> Result<Self, Error> {
        let file = std::fs::File::create(path)?;
        debug!(path = %path.display(), "Recording trace");
        Ok(Self {
            writer: std::io::BufWriter::new(file),
            count: 0,
        })
    }

    /// Emit one record as an NDJSON line.
    pub fn emit(&mut self, record: &TraceRecord) -> Result<(), Error> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.count += 1;
        Ok(())
    }

    /// Emit every entry of `run`, which must come from simulating `input`.
    pub fn emit_run(&mut self, input: &str, run: &Run) -> Result<(), Error> {
        for record in TraceRecord::from_run(input, run) {
            self.emit(&record)?;
        }
        Ok(())
    }

    /// Flush buffered output and return the number of records emitted.
    pub fn finish(mut self) -> Result<usize, Error> {
        self.writer.flush()?;
        Ok(self.count)
    }

    /// Get the number of records emitted so far.
    pub fn count(&self) -> usize {
        self.count
    }
}
