//! Host-side time sender for the Horologe clock display.
//!
//! The computer acts as the time server: every interval it formats the
//! local time as one protocol line and writes it to the display's serial
//! port. The display shows whatever it is told.

pub mod clock;
pub mod link;
pub mod sender;

pub use clock::message_for;
pub use link::{list_ports, resolve_port, SerialLink};
pub use sender::{run, send_message, Schedule};
