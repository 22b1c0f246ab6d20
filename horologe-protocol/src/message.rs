//! Time message parsing and encoding.
//!
//! A message is one line split on its first two commas. Only the presence
//! of the two delimiters is checked; the display shows whatever text the
//! sender put in each field.

use heapless::{String, Vec};

use crate::line::{LINE_TERMINATOR, MAX_LINE_LEN};

/// Field separator
pub const FIELD_SEPARATOR: char = ',';

/// Maximum encoded message size (line plus terminator)
pub const MAX_ENCODED_LEN: usize = MAX_LINE_LEN + 1;

/// One text field of a message
///
/// Sized to a whole line so any field of an accepted line fits.
pub type Field = String<MAX_LINE_LEN>;

/// Errors from parsing a line or building a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Fewer than two field separators; `found` is how many were present
    MissingDelimiter { found: u8 },
    /// Line is longer than [`MAX_LINE_LEN`]
    LineTooLong,
    /// A field passed to [`TimeMessage::new`] contains a separator or terminator
    InvalidField,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::MissingDelimiter { found } => {
                write!(f, "expected 2 field separators, found {}", found)
            }
            ParseError::LineTooLong => write!(f, "line longer than {} bytes", MAX_LINE_LEN),
            ParseError::InvalidField => write!(f, "field contains ',' or a line break"),
        }
    }
}

impl core::error::Error for ParseError {}

/// Errors from encoding a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Buffer too small for the encoded line
    BufferTooSmall,
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EncodeError::BufferTooSmall => write!(f, "buffer too small for encoded message"),
        }
    }
}

impl core::error::Error for EncodeError {}

/// A parsed `time,date,weekday` message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeMessage {
    time: Field,
    date: Field,
    weekday: Field,
}

impl TimeMessage {
    /// Build a message from its three parts
    ///
    /// Parts may not contain the separator or a line break, and the
    /// encoded line has to fit in [`MAX_LINE_LEN`].
    pub fn new(time: &str, date: &str, weekday: &str) -> Result<Self, ParseError> {
        let parts = [time, date, weekday];
        if parts
            .iter()
            .any(|p| p.contains(|c: char| c == FIELD_SEPARATOR || c == '\n' || c == '\r'))
        {
            return Err(ParseError::InvalidField);
        }

        let line_len = time.len() + date.len() + weekday.len() + 2;
        if line_len > MAX_LINE_LEN {
            return Err(ParseError::LineTooLong);
        }

        Ok(Self {
            time: to_field(time)?,
            date: to_field(date)?,
            weekday: to_field(weekday)?,
        })
    }

    /// Split a line into its three fields
    ///
    /// Surrounding whitespace of the whole line is trimmed. Everything after
    /// the second separator is the weekday, commas included.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        if line.len() > MAX_LINE_LEN {
            return Err(ParseError::LineTooLong);
        }

        let (time, rest) = line
            .split_once(FIELD_SEPARATOR)
            .ok_or(ParseError::MissingDelimiter { found: 0 })?;
        let (date, weekday) = rest
            .split_once(FIELD_SEPARATOR)
            .ok_or(ParseError::MissingDelimiter { found: 1 })?;

        Ok(Self {
            time: to_field(time)?,
            date: to_field(date)?,
            weekday: to_field(weekday)?,
        })
    }

    /// Time of day, e.g. `14:37`
    pub fn time(&self) -> &str {
        self.time.as_str()
    }

    /// Calendar date, e.g. `2025-12-11`
    pub fn date(&self) -> &str {
        self.date.as_str()
    }

    /// Weekday name, e.g. `Thursday`
    pub fn weekday(&self) -> &str {
        self.weekday.as_str()
    }

    /// Length of the encoded line including the terminator
    pub fn encoded_len(&self) -> usize {
        self.time.len() + self.date.len() + self.weekday.len() + 3
    }

    /// Encode this message as a terminated line into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, EncodeError> {
        let len = self.encoded_len();
        if buffer.len() < len {
            return Err(EncodeError::BufferTooSmall);
        }

        let mut pos = 0;
        for (i, field) in [&self.time, &self.date, &self.weekday].into_iter().enumerate() {
            if i > 0 {
                buffer[pos] = FIELD_SEPARATOR as u8;
                pos += 1;
            }
            buffer[pos..pos + field.len()].copy_from_slice(field.as_bytes());
            pos += field.len();
        }
        buffer[pos] = LINE_TERMINATOR;

        Ok(len)
    }

    /// Encode this message into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_ENCODED_LEN>, EncodeError> {
        let mut buffer = [0u8; MAX_ENCODED_LEN];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| EncodeError::BufferTooSmall)?;
        Ok(vec)
    }
}

/// Formats as the unterminated wire line
impl core::fmt::Display for TimeMessage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.time,
            self.date,
            self.weekday,
            sep = FIELD_SEPARATOR
        )
    }
}

fn to_field(text: &str) -> Result<Field, ParseError> {
    let mut field = Field::new();
    field.push_str(text).map_err(|_| ParseError::LineTooLong)?;
    Ok(field)
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimeMessage {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{} {} {}",
            self.time.as_str(),
            self.date.as_str(),
            self.weekday.as_str()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_example_line() {
        let msg = TimeMessage::parse("14:37,2025-12-11,Thursday").unwrap();
        assert_eq!(msg.time(), "14:37");
        assert_eq!(msg.date(), "2025-12-11");
        assert_eq!(msg.weekday(), "Thursday");
    }

    #[test]
    fn test_parse_trims_surrounding_whitespace() {
        let msg = TimeMessage::parse("  09:05,2025-12-11,Thursday \r").unwrap();
        assert_eq!(msg.time(), "09:05");
        assert_eq!(msg.weekday(), "Thursday");
    }

    #[test]
    fn test_parse_missing_both_delimiters() {
        assert_eq!(
            TimeMessage::parse("14:37 2025-12-11 Thursday"),
            Err(ParseError::MissingDelimiter { found: 0 })
        );
    }

    #[test]
    fn test_parse_missing_second_delimiter() {
        assert_eq!(
            TimeMessage::parse("14:37,2025-12-11 Thursday"),
            Err(ParseError::MissingDelimiter { found: 1 })
        );
    }

    #[test]
    fn test_parse_empty_line() {
        assert_eq!(
            TimeMessage::parse(""),
            Err(ParseError::MissingDelimiter { found: 0 })
        );
    }

    #[test]
    fn test_parse_empty_fields() {
        let msg = TimeMessage::parse(",,").unwrap();
        assert_eq!(msg.time(), "");
        assert_eq!(msg.date(), "");
        assert_eq!(msg.weekday(), "");
    }

    #[test]
    fn test_parse_extra_separator_stays_in_weekday() {
        let msg = TimeMessage::parse("14:37,2025-12-11,Thursday,extra").unwrap();
        assert_eq!(msg.weekday(), "Thursday,extra");
    }

    #[test]
    fn test_parse_too_long() {
        let mut line = std::string::String::from("12:00,2026-01-01,");
        line.extend(core::iter::repeat('x').take(MAX_LINE_LEN));
        assert_eq!(TimeMessage::parse(&line), Err(ParseError::LineTooLong));
    }

    #[test]
    fn test_new_rejects_separator_in_field() {
        assert_eq!(
            TimeMessage::new("14:37", "2025,12", "Thursday"),
            Err(ParseError::InvalidField)
        );
        assert_eq!(
            TimeMessage::new("14:37", "2025-12-11", "Thurs\nday"),
            Err(ParseError::InvalidField)
        );
    }

    #[test]
    fn test_encode_example() {
        let msg = TimeMessage::new("14:37", "2025-12-11", "Thursday").unwrap();
        let encoded = msg.encode_to_vec().unwrap();
        assert_eq!(encoded.as_slice(), b"14:37,2025-12-11,Thursday\n");
        assert_eq!(encoded.len(), msg.encoded_len());
    }

    #[test]
    fn test_display_is_unterminated_line() {
        let msg = TimeMessage::new("09:05", "2025-12-11", "Thursday").unwrap();
        assert_eq!(std::format!("{}", msg), "09:05,2025-12-11,Thursday");
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let msg = TimeMessage::new("14:37", "2025-12-11", "Thursday").unwrap();
        let mut buffer = [0u8; 10];
        assert_eq!(msg.encode(&mut buffer), Err(EncodeError::BufferTooSmall));
    }

    #[test]
    fn test_new_rejects_line_too_long() {
        // 5 + 10 + 48 field bytes plus two separators is 65
        let weekday: std::string::String = core::iter::repeat('x').take(48).collect();
        assert_eq!(
            TimeMessage::new("14:37", "2025-12-11", &weekday),
            Err(ParseError::LineTooLong)
        );
    }

    #[test]
    fn test_new_accepts_line_of_max_len() {
        let weekday: std::string::String = core::iter::repeat('x').take(47).collect();
        let msg = TimeMessage::new("14:37", "2025-12-11", &weekday).unwrap();
        assert_eq!(msg.encoded_len(), MAX_ENCODED_LEN);
    }

    #[test]
    fn test_encode_exact_fit() {
        let msg = TimeMessage::new("14:37", "2025-12-11", "Thursday").unwrap();
        let mut buffer = [0u8; 26];
        assert_eq!(msg.encoded_len(), buffer.len());
        assert_eq!(msg.encode(&mut buffer), Ok(26));
        assert_eq!(&buffer, b"14:37,2025-12-11,Thursday\n");
    }

    proptest! {
        #[test]
        fn prop_fields_match_segments(
            time in "[0-9:]{1,8}",
            date in "[0-9-]{1,12}",
            weekday in "[A-Za-z]{1,16}",
        ) {
            let line = std::format!("{},{},{}", time, date, weekday);
            let msg = TimeMessage::parse(&line).unwrap();
            prop_assert_eq!(msg.time(), time.as_str());
            prop_assert_eq!(msg.date(), date.as_str());
            prop_assert_eq!(msg.weekday(), weekday.as_str());
        }

        #[test]
        fn prop_line_without_separator_rejected(line in "[A-Za-z0-9: -]{0,60}") {
            prop_assert_eq!(
                TimeMessage::parse(&line),
                Err(ParseError::MissingDelimiter { found: 0 })
            );
        }

        #[test]
        fn prop_line_with_one_separator_rejected(
            head in "[A-Za-z0-9:-]{0,30}",
            tail in "[A-Za-z0-9:-]{0,30}",
        ) {
            let line = std::format!("{},{}", head, tail);
            prop_assert_eq!(
                TimeMessage::parse(&line),
                Err(ParseError::MissingDelimiter { found: 1 })
            );
        }
    }
}
