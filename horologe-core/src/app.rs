//! Clock display control loop
//!
//! One iteration polls the UART, parses a line whenever the terminator was
//! seen and redraws the face if it is dirty. All state lives in
//! [`ClockApp`]; the caller owns the peripherals and passes them in.

use horologe_display::{render, ClockFace, DisplayBackend, DisplayError};
use horologe_hal::UartRx;
use horologe_protocol::{LineBuffer, LineError, ParseError, TimeMessage};

use crate::config::ClockConfig;

/// Why a line was discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reject {
    /// Line could not be buffered
    Line(LineError),
    /// Line could not be split into fields
    Parse(ParseError),
}

/// Outcome of a completed line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event<'a> {
    /// The face now shows this message
    Updated(&'a TimeMessage),
    /// The line was dropped; the face is unchanged
    Rejected(Reject),
}

/// Errors from one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepError<E> {
    /// Reading the UART failed; the partial line was dropped
    Uart(E),
    /// Drawing the face failed; it stays dirty
    Display(DisplayError),
}

/// Control loop context
#[derive(Debug, Clone)]
pub struct ClockApp {
    config: ClockConfig,
    lines: LineBuffer,
    face: ClockFace,
    lines_accepted: u32,
    lines_rejected: u32,
}

impl Default for ClockApp {
    fn default() -> Self {
        Self::new(ClockConfig::default())
    }
}

impl ClockApp {
    /// Create the loop context with an empty, dirty face
    pub const fn new(config: ClockConfig) -> Self {
        Self {
            config,
            lines: LineBuffer::new(),
            face: ClockFace::new(),
            lines_accepted: 0,
            lines_rejected: 0,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Current face
    pub fn face(&self) -> &ClockFace {
        &self.face
    }

    /// Number of lines shown since boot
    pub fn lines_accepted(&self) -> u32 {
        self.lines_accepted
    }

    /// Number of lines dropped since boot
    pub fn lines_rejected(&self) -> u32 {
        self.lines_rejected
    }

    /// Feed one received byte
    ///
    /// Returns an event when `byte` completed a line. Blank lines are
    /// ignored without an event. A rejected line leaves the face untouched.
    pub fn feed(&mut self, byte: u8) -> Option<Event<'_>> {
        let outcome = match self.lines.feed(byte) {
            Ok(None) => return None,
            Ok(Some(line)) if line.trim().is_empty() => return None,
            Ok(Some(line)) => TimeMessage::parse(line).map_err(Reject::Parse),
            Err(e) => Err(Reject::Line(e)),
        };

        match outcome {
            Ok(message) => {
                self.face.apply(message);
                self.lines_accepted = self.lines_accepted.wrapping_add(1);
                self.face.message().map(Event::Updated)
            }
            Err(reject) => {
                self.lines_rejected = self.lines_rejected.wrapping_add(1);
                Some(Event::Rejected(reject))
            }
        }
    }

    /// Drain waiting bytes from the UART without blocking
    ///
    /// Reads at most `max_bytes_per_poll` bytes and reports each completed
    /// line through `on_event`. Returns the number of bytes read. On a read
    /// error the partial line is dropped, since bytes may have been lost.
    pub fn poll<R, F>(&mut self, rx: &mut R, mut on_event: F) -> Result<usize, R::Error>
    where
        R: UartRx + ?Sized,
        F: FnMut(Event<'_>),
    {
        let limit = self.config.max_bytes_per_poll as usize;
        let mut count = 0;

        while count < limit {
            let byte = match rx.try_read_byte() {
                Ok(Some(byte)) => byte,
                Ok(None) => break,
                Err(e) => {
                    self.lines.reset();
                    return Err(e);
                }
            };
            count += 1;

            if let Some(event) = self.feed(byte) {
                on_event(event);
            }
        }

        Ok(count)
    }

    /// Redraw the face if it is dirty
    ///
    /// Returns whether a redraw happened. The dirty flag is only cleared
    /// after a successful flush; a display that is not ready is skipped.
    pub fn refresh<D>(&mut self, display: &mut D) -> Result<bool, DisplayError>
    where
        D: DisplayBackend + ?Sized,
    {
        if !self.face.is_dirty() || !display.is_ready() {
            return Ok(false);
        }

        render(&self.face, display)?;
        self.face.mark_clean();
        Ok(true)
    }

    /// One loop iteration: poll, then refresh
    ///
    /// Returns whether the display was redrawn.
    pub fn step<R, D, F>(
        &mut self,
        rx: &mut R,
        display: &mut D,
        on_event: F,
    ) -> Result<bool, StepError<R::Error>>
    where
        R: UartRx + ?Sized,
        D: DisplayBackend + ?Sized,
        F: FnMut(Event<'_>),
    {
        self.poll(rx, on_event).map_err(StepError::Uart)?;
        self.refresh(display).map_err(StepError::Display)
    }
}
