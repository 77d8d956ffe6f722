//! Quote balance tracking for the raw CSV byte stream.
//!
//! The `csv` reader accepts a quoted field that is never closed and runs it to
//! the end of the input. [`QuoteTracker`] sits between the source and the
//! reader, follows the same quoting rules over every byte handed to the
//! reader, and remembers whether the input ended inside a quoted field.

use std::io::{self, Read};

use crate::constants::{FIELD_DELIMITER, QUOTE_CHAR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    StartOfField,
    Unquoted,
    Quoted,
    /// A quote seen inside a quoted field: either the closing quote or the
    /// first half of a doubled `""`.
    QuoteInQuoted,
}

/// [`Read`] adapter that tracks CSV quoting state over the bytes it passes on.
#[derive(Debug)]
pub(crate) struct QuoteTracker<R> {
    inner: R,
    state: FieldState,
    bytes: u64,
    line: u64,
    quote_line: u64,
    eof: bool,
}

impl<R> QuoteTracker<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            state: FieldState::StartOfField,
            bytes: 0,
            line: 1,
            quote_line: 1,
            eof: false,
        }
    }

    /// Total bytes passed on so far.
    pub(crate) fn bytes_read(&self) -> u64 {
        self.bytes
    }

    /// Line of the opening quote when the input ended inside a quoted field.
    pub(crate) fn unterminated_quote(&self) -> Option<u64> {
        (self.eof && self.state == FieldState::Quoted).then_some(self.quote_line)
    }

    fn scan(&mut self, chunk: &[u8]) {
        for &byte in chunk {
            let terminator = byte == b'\n' || byte == b'\r';
            self.state = match self.state {
                FieldState::StartOfField if byte == QUOTE_CHAR => {
                    self.quote_line = self.line;
                    FieldState::Quoted
                }
                FieldState::StartOfField | FieldState::Unquoted | FieldState::QuoteInQuoted
                    if byte == FIELD_DELIMITER || terminator =>
                {
                    FieldState::StartOfField
                }
                FieldState::StartOfField | FieldState::Unquoted => FieldState::Unquoted,
                FieldState::Quoted if byte == QUOTE_CHAR => FieldState::QuoteInQuoted,
                FieldState::Quoted => FieldState::Quoted,
                FieldState::QuoteInQuoted if byte == QUOTE_CHAR => FieldState::Quoted,
                FieldState::QuoteInQuoted => FieldState::Unquoted,
            };
            if byte == b'\n' {
                self.line += 1;
            }
        }
    }
}

impl<R: Read> Read for QuoteTracker<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n == 0 && !buf.is_empty() {
            self.eof = true;
        }
        self.scan(&buf[..n]);
        self.bytes += n as u64;
        Ok(n)
    }
}
