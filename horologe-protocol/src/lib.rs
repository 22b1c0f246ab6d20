//! Horologe Serial Line Protocol
//!
//! This crate defines the text protocol spoken between the host time sender
//! and the clock display. Every message is a single line of ASCII:
//!
//! ```text
//! ┌───────┬───┬────────────┬───┬─────────────┬────┐
//! │ HH:MM │ , │ YYYY-MM-DD │ , │ WeekdayName │ \n │
//! └───────┴───┴────────────┴───┴─────────────┴────┘
//! ```
//!
//! For example `14:37,2025-12-11,Thursday\n`.
//!
//! There is no framing beyond the newline, no checksum and no reply. The
//! display acts as a "dumb terminal": it shows whatever the host says and
//! drops lines it cannot split into three fields.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod line;
pub mod message;

pub use line::{LineBuffer, LineError, LINE_TERMINATOR, MAX_LINE_LEN};
pub use message::{EncodeError, Field, ParseError, TimeMessage, FIELD_SEPARATOR, MAX_ENCODED_LEN};
