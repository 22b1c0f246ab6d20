//! Line buffering for the serial protocol.
//!
//! Bytes arrive one at a time from the UART. The buffer collects them until
//! the `\n` terminator and then hands out the complete line. Lines longer
//! than [`MAX_LINE_LEN`] are dropped whole: everything up to the next
//! terminator is discarded and reported once as [`LineError::Overflow`].

use heapless::Vec;

/// Line terminator byte
pub const LINE_TERMINATOR: u8 = b'\n';

/// Maximum line length in bytes, excluding the terminator
pub const MAX_LINE_LEN: usize = 64;

/// Errors reported when a line is completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded [`MAX_LINE_LEN`] and was discarded
    Overflow,
    /// Line was not valid UTF-8
    InvalidUtf8,
}

impl core::fmt::Display for LineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LineError::Overflow => write!(f, "line longer than {} bytes", MAX_LINE_LEN),
            LineError::InvalidUtf8 => write!(f, "line is not valid UTF-8"),
        }
    }
}

impl core::error::Error for LineError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineState {
    /// Appending bytes to the current line
    Collecting,
    /// Current line overflowed, dropping bytes until the terminator
    Discarding,
    /// A line was just handed out; cleared on the next byte
    Complete,
}

/// Room for one full line plus the `\r` of a CRLF terminator
const BUFFER_CAPACITY: usize = MAX_LINE_LEN + 1;

/// Accumulates bytes into newline-terminated lines
#[derive(Debug, Clone)]
pub struct LineBuffer {
    buffer: Vec<u8, BUFFER_CAPACITY>,
    state: LineState,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    /// Create an empty line buffer
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            state: LineState::Collecting,
        }
    }

    /// Drop any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.state = LineState::Collecting;
    }

    /// Number of bytes buffered for the line in progress
    pub fn len(&self) -> usize {
        match self.state {
            LineState::Collecting => self.buffer.len(),
            LineState::Discarding | LineState::Complete => 0,
        }
    }

    /// Whether no partial line is buffered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` when `byte` terminates a line, `Ok(None)`
    /// while more bytes are needed, or `Err` when the terminated line has to
    /// be dropped. A trailing `\r` is stripped so CRLF senders work. The
    /// returned line may be empty.
    pub fn feed(&mut self, byte: u8) -> Result<Option<&str>, LineError> {
        if self.state == LineState::Complete {
            self.reset();
        }

        match self.state {
            LineState::Discarding => {
                if byte == LINE_TERMINATOR {
                    self.state = LineState::Complete;
                    return Err(LineError::Overflow);
                }
                Ok(None)
            }
            _ => {
                if byte != LINE_TERMINATOR {
                    if self.buffer.push(byte).is_err() {
                        self.buffer.clear();
                        self.state = LineState::Discarding;
                    }
                    return Ok(None);
                }

                if self.buffer.last() == Some(&b'\r') {
                    self.buffer.pop();
                }
                self.state = LineState::Complete;

                if self.buffer.len() > MAX_LINE_LEN {
                    return Err(LineError::Overflow);
                }

                core::str::from_utf8(&self.buffer)
                    .map(Some)
                    .map_err(|_| LineError::InvalidUtf8)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::String;
    use std::vec::Vec;

    /// Feed all bytes, collecting each completed line or error
    fn feed_all(buffer: &mut LineBuffer, bytes: &[u8]) -> Vec<Result<String, LineError>> {
        let mut out = Vec::new();
        for &byte in bytes {
            match buffer.feed(byte) {
                Ok(Some(line)) => out.push(Ok(String::from(line))),
                Ok(None) => {}
                Err(e) => out.push(Err(e)),
            }
        }
        out
    }

    #[test]
    fn test_single_line() {
        let mut buffer = LineBuffer::new();
        let lines = feed_all(&mut buffer, b"14:37,2025-12-11,Thursday\n");
        assert_eq!(lines, [Ok(String::from("14:37,2025-12-11,Thursday"))]);
    }

    #[test]
    fn test_no_terminator_yields_nothing() {
        let mut buffer = LineBuffer::new();
        assert!(feed_all(&mut buffer, b"14:37,2025").is_empty());
        assert_eq!(buffer.len(), 10);
    }

    #[test]
    fn test_line_split_across_feeds() {
        let mut buffer = LineBuffer::new();
        assert!(feed_all(&mut buffer, b"09:05,20").is_empty());
        let lines = feed_all(&mut buffer, b"25-12-11,Thursday\n");
        assert_eq!(lines, [Ok(String::from("09:05,2025-12-11,Thursday"))]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_crlf_stripped() {
        let mut buffer = LineBuffer::new();
        let lines = feed_all(&mut buffer, b"a,b,c\r\n");
        assert_eq!(lines, [Ok(String::from("a,b,c"))]);
    }

    #[test]
    fn test_empty_line() {
        let mut buffer = LineBuffer::new();
        let lines = feed_all(&mut buffer, b"\n");
        assert_eq!(lines, [Ok(String::new())]);
    }

    #[test]
    fn test_consecutive_lines() {
        let mut buffer = LineBuffer::new();
        let lines = feed_all(&mut buffer, b"first\nsecond\n");
        assert_eq!(lines, [Ok(String::from("first")), Ok(String::from("second"))]);
    }

    #[test]
    fn test_overflow_reported_once_then_recovers() {
        let mut buffer = LineBuffer::new();
        let mut data = Vec::new();
        data.extend(core::iter::repeat(b'x').take(MAX_LINE_LEN + 10));
        data.push(b'\n');
        data.extend_from_slice(b"12:00,2026-01-01,Thursday\n");

        let lines = feed_all(&mut buffer, &data);
        assert_eq!(
            lines,
            [
                Err(LineError::Overflow),
                Ok(String::from("12:00,2026-01-01,Thursday")),
            ]
        );
    }

    #[test]
    fn test_exactly_max_len_fits() {
        let mut buffer = LineBuffer::new();
        let mut data = Vec::new();
        data.extend(core::iter::repeat(b'y').take(MAX_LINE_LEN));
        data.push(b'\n');

        let lines = feed_all(&mut buffer, &data);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].as_ref().map(|l| l.len()), Ok(MAX_LINE_LEN));
    }

    #[test]
    fn test_exactly_max_len_with_crlf_fits() {
        let mut buffer = LineBuffer::new();
        let mut data = Vec::new();
        data.extend(core::iter::repeat(b'y').take(MAX_LINE_LEN));
        data.extend_from_slice(b"\r\n");

        let lines = feed_all(&mut buffer, &data);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].as_ref().map(|l| l.len()), Ok(MAX_LINE_LEN));
    }

    #[test]
    fn test_one_past_max_len_overflows() {
        let mut buffer = LineBuffer::new();
        let mut data = Vec::new();
        data.extend(core::iter::repeat(b'y').take(MAX_LINE_LEN + 1));
        data.push(b'\n');
        data.extend_from_slice(b"ok\n");

        let lines = feed_all(&mut buffer, &data);
        assert_eq!(lines, [Err(LineError::Overflow), Ok(String::from("ok"))]);
    }

    #[test]
    fn test_invalid_utf8() {
        let mut buffer = LineBuffer::new();
        let lines = feed_all(&mut buffer, &[0xFF, 0xFE, b'\n', b'o', b'k', b'\n']);
        assert_eq!(lines, [Err(LineError::InvalidUtf8), Ok(String::from("ok"))]);
    }

    #[test]
    fn test_reset_drops_partial_line() {
        let mut buffer = LineBuffer::new();
        feed_all(&mut buffer, b"garbage");
        buffer.reset();
        let lines = feed_all(&mut buffer, b"clean\n");
        assert_eq!(lines, [Ok(String::from("clean"))]);
    }
}
