//! Streaming iterator over the dependency tokens of a CSV table.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::iter::FusedIterator;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, trace};

use super::quotes::QuoteTracker;
use super::split_dependencies;
use crate::constants::{FIELD_DELIMITER, QUOTE_CHAR};
use crate::core::DeplistError;

/// Lazy sequence of dependency names read from one CSV source.
///
/// Rows are read one at a time as the iterator is advanced; only the tokens of
/// the current row are held in memory. The underlying reader is owned by the
/// iterator and released when it is dropped, whether iteration finished or
/// stopped on an error.
///
/// After the first `Err` the iterator is exhausted.
pub struct Dependencies<R> {
    reader: csv::Reader<QuoteTracker<R>>,
    source_name: String,
    column: String,
    column_index: Option<usize>,
    record: StringRecord,
    pending: VecDeque<String>,
    rows: u64,
    emitted: u64,
    done: bool,
}

impl<R: io::Read> Dependencies<R> {
    pub(crate) fn new(reader: R, source_name: String, column: String) -> Self {
        let reader = ReaderBuilder::new()
            .delimiter(FIELD_DELIMITER)
            .quote(QUOTE_CHAR)
            .has_headers(true)
            .flexible(false)
            .from_reader(QuoteTracker::new(reader));

        Self {
            reader,
            source_name,
            column,
            column_index: None,
            record: StringRecord::new(),
            pending: VecDeque::new(),
            rows: 0,
            emitted: 0,
            done: false,
        }
    }

    /// Name used for this source in error messages (usually the file path).
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Number of data rows read so far.
    pub fn rows_read(&self) -> u64 {
        self.rows
    }

    /// Write every remaining dependency to `out`, one per line.
    ///
    /// Each line is handed to the writer as soon as its row has been split, so
    /// lines written before an error stay written. Returns the number of
    /// dependencies written.
    pub fn write_to<W: Write>(self, out: &mut W) -> Result<u64, DeplistError> {
        let mut written = 0;
        for dependency in self {
            let dependency = dependency?;
            writeln!(out, "{dependency}").map_err(|e| DeplistError::output(&e))?;
            written += 1;
        }
        out.flush().map_err(|e| DeplistError::output(&e))?;
        Ok(written)
    }

    /// Read the next data row and queue its tokens. Returns `false` at end of
    /// input.
    fn read_row(&mut self) -> Result<bool, DeplistError> {
        let more = self
            .reader
            .read_record(&mut self.record)
            .map_err(|e| DeplistError::format(&self.source_name, &e))?;
        self.check_quotes()?;
        if !more {
            return Ok(false);
        }

        self.rows += 1;
        let line = self.record.position().map_or(self.rows + 1, csv::Position::line);
        let index = self.column_index(line)?;

        let value = self.record.get(index).ok_or_else(|| self.missing_column(line, Vec::new()))?;
        let before = self.pending.len();
        self.pending.extend(split_dependencies(value).map(str::to_owned));
        trace!(line, tokens = self.pending.len() - before, "Split dependency field");

        Ok(true)
    }

    /// Position of the requested column, resolved from the header on the first
    /// data row. A repeated header name resolves to its last occurrence.
    fn column_index(&mut self, line: u64) -> Result<usize, DeplistError> {
        if let Some(index) = self.column_index {
            return Ok(index);
        }

        let headers = self.reader.headers().map_err(|e| DeplistError::format(&self.source_name, &e))?;
        let found = headers
            .iter()
            .enumerate()
            .filter(|(_, header)| *header == self.column)
            .map(|(index, _)| index)
            .last();
        match found {
            Some(index) => {
                debug!(column = %self.column, index, "Resolved dependency column");
                self.column_index = Some(index);
                Ok(index)
            }
            None => {
                let headers = headers.iter().map(str::to_owned).collect();
                Err(self.missing_column(line, headers))
            }
        }
    }

    /// Fail once the reader has consumed all input and the last field was
    /// opened with a quote that never closed. Records read before that point
    /// have already been returned.
    fn check_quotes(&self) -> Result<(), DeplistError> {
        let tracker = self.reader.get_ref();
        match tracker.unterminated_quote() {
            Some(line) if self.reader.position().byte() == tracker.bytes_read() => {
                Err(DeplistError::Format {
                    source_name: self.source_name.clone(),
                    line: Some(line),
                    reason: "quoted field is never closed".to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    fn missing_column(&self, line: u64, headers: Vec<String>) -> DeplistError {
        DeplistError::MissingColumn {
            source_name: self.source_name.clone(),
            column: self.column.clone(),
            line,
            headers,
        }
    }
}

impl<R: io::Read> Iterator for Dependencies<R> {
    type Item = Result<String, DeplistError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(dependency) = self.pending.pop_front() {
                self.emitted += 1;
                return Some(Ok(dependency));
            }
            if self.done {
                return None;
            }

            match self.read_row() {
                Ok(true) => {}
                Ok(false) => {
                    self.done = true;
                    debug!(
                        source = %self.source_name,
                        rows = self.rows,
                        dependencies = self.emitted,
                        "Finished reading dependency table"
                    );
                    return None;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<R: io::Read> FusedIterator for Dependencies<R> {}
