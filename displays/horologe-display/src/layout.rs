//! Clock face layout
//!
//! Fixed layout in character cells: the time in large glyphs across the top,
//! the date and weekday centered underneath.
//!
//! ```text
//!        ┌─────────────────────┐
//! row 0  │       1 4 : 3 7     │
//! row 1  │                     │
//! row 2  │                     │
//! row 3  │      2025-12-11     │
//! row 4  │       Thursday      │
//! row 5  │                     │
//!        └─────────────────────┘
//! ```

use crate::backend::{DisplayBackend, DisplayError, TextSize};
use crate::face::ClockFace;

/// Time shown before the first message arrives
pub const PLACEHOLDER_TIME: &str = "--:--";

/// Date line shown before the first message arrives
pub const PLACEHOLDER_DATE: &str = "Waiting for time";

/// Rows needed for the large-time layout
const LARGE_LAYOUT_ROWS: u8 = 4;

/// Cell positions of the three fields for a given display size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Layout {
    pub cols: u8,
    pub time_row: u8,
    pub time_size: TextSize,
    pub date_row: u8,
    pub weekday_row: u8,
}

impl Layout {
    /// Pick the layout for a display of `cols` x `rows` normal cells
    ///
    /// Displays with at least four rows get the large time; smaller ones
    /// stack the three fields in normal text. Fewer than three rows cannot
    /// hold the face.
    pub fn for_dimensions(cols: u8, rows: u8) -> Result<Self, DisplayError> {
        if cols == 0 || rows < 3 {
            return Err(DisplayError::InvalidCoordinates);
        }

        if rows >= LARGE_LAYOUT_ROWS {
            // Spare rows go above the date so the block stays centered
            let date_row = 2 + (rows - LARGE_LAYOUT_ROWS) / 2;
            Ok(Self {
                cols,
                time_row: 0,
                time_size: TextSize::Large,
                date_row,
                weekday_row: date_row + 1,
            })
        } else {
            Ok(Self {
                cols,
                time_row: 0,
                time_size: TextSize::Normal,
                date_row: 1,
                weekday_row: 2,
            })
        }
    }

    /// Column that centers `text` at `size`, and the part of it that fits
    pub fn center<'a>(&self, text: &'a str, size: TextSize) -> (u8, &'a str) {
        let scale = size.scale();
        let max_chars = (self.cols / scale) as usize;
        let text = truncate_chars(text, max_chars);
        let width = text.chars().count() as u8 * scale;
        ((self.cols - width) / 2, text)
    }
}

/// Render the face through a display backend
///
/// Clears, draws all three fields and flushes. The dirty flag is left to
/// the caller, which knows whether the flush succeeded.
pub fn render<D>(face: &ClockFace, display: &mut D) -> Result<(), DisplayError>
where
    D: DisplayBackend + ?Sized,
{
    let (cols, rows) = display.dimensions();
    let layout = Layout::for_dimensions(cols, rows)?;

    let (time, date, weekday) = match face.message() {
        Some(message) => (message.time(), message.date(), message.weekday()),
        None => (PLACEHOLDER_TIME, PLACEHOLDER_DATE, ""),
    };

    display.clear()?;
    draw_centered(display, &layout, layout.time_row, time, layout.time_size)?;
    draw_centered(display, &layout, layout.date_row, date, TextSize::Normal)?;
    draw_centered(display, &layout, layout.weekday_row, weekday, TextSize::Normal)?;
    display.flush()
}

fn draw_centered<D>(
    display: &mut D,
    layout: &Layout,
    row: u8,
    text: &str,
    size: TextSize,
) -> Result<(), DisplayError>
where
    D: DisplayBackend + ?Sized,
{
    if text.is_empty() {
        return Ok(());
    }
    let (col, text) = layout.center(text, size);
    display.draw_text(row, col, text, size)
}

/// First `max` characters of `text`
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::{String, Vec};
    use horologe_protocol::TimeMessage;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Op {
        Clear,
        Text(u8, u8, String<32>, TextSize),
        Flush,
    }

    /// Backend that records every call
    struct Recorder {
        dims: (u8, u8),
        ops: Vec<Op, 16>,
    }

    impl Recorder {
        fn new(cols: u8, rows: u8) -> Self {
            Self {
                dims: (cols, rows),
                ops: Vec::new(),
            }
        }
    }

    impl DisplayBackend for Recorder {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.ops.push(Op::Clear).unwrap();
            Ok(())
        }

        fn draw_text(
            &mut self,
            row: u8,
            col: u8,
            text: &str,
            size: TextSize,
        ) -> Result<(), DisplayError> {
            let mut s = String::new();
            s.push_str(text).unwrap();
            self.ops.push(Op::Text(row, col, s, size)).unwrap();
            Ok(())
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            self.ops.push(Op::Flush).unwrap();
            Ok(())
        }

        fn dimensions(&self) -> (u8, u8) {
            self.dims
        }

        fn is_ready(&self) -> bool {
            true
        }
    }

    fn text(row: u8, col: u8, s: &str, size: TextSize) -> Op {
        let mut text = String::new();
        text.push_str(s).unwrap();
        Op::Text(row, col, text, size)
    }

    #[test]
    fn test_layout_six_rows() {
        let layout = Layout::for_dimensions(21, 6).unwrap();
        assert_eq!(layout.time_size, TextSize::Large);
        assert_eq!(layout.time_row, 0);
        assert_eq!(layout.date_row, 3);
        assert_eq!(layout.weekday_row, 4);
    }

    #[test]
    fn test_layout_three_rows_uses_normal_text() {
        let layout = Layout::for_dimensions(16, 3).unwrap();
        assert_eq!(layout.time_size, TextSize::Normal);
        assert_eq!((layout.date_row, layout.weekday_row), (1, 2));
    }

    #[test]
    fn test_layout_too_small() {
        assert_eq!(
            Layout::for_dimensions(16, 2),
            Err(DisplayError::InvalidCoordinates)
        );
    }

    #[test]
    fn test_center_truncates() {
        let layout = Layout::for_dimensions(8, 4).unwrap();
        assert_eq!(layout.center("Wednesday", TextSize::Normal), (0, "Wednesda"));
        assert_eq!(layout.center("12:345", TextSize::Large), (0, "12:3"));
        assert_eq!(layout.center("ab", TextSize::Normal), (3, "ab"));
    }

    #[test]
    fn test_render_message() {
        let mut face = ClockFace::new();
        face.apply(TimeMessage::parse("14:37,2025-12-11,Thursday").unwrap());

        let mut display = Recorder::new(21, 6);
        render(&face, &mut display).unwrap();

        assert_eq!(
            display.ops.as_slice(),
            &[
                Op::Clear,
                text(0, 5, "14:37", TextSize::Large),
                text(3, 5, "2025-12-11", TextSize::Normal),
                text(4, 6, "Thursday", TextSize::Normal),
                Op::Flush,
            ]
        );
    }

    #[test]
    fn test_render_placeholder_before_first_message() {
        let face = ClockFace::new();
        let mut display = Recorder::new(21, 6);
        render(&face, &mut display).unwrap();

        assert_eq!(
            display.ops.as_slice(),
            &[
                Op::Clear,
                text(0, 5, PLACEHOLDER_TIME, TextSize::Large),
                text(3, 2, PLACEHOLDER_DATE, TextSize::Normal),
                Op::Flush,
            ]
        );
    }

    #[test]
    fn test_render_does_not_touch_dirty_flag() {
        let face = ClockFace::new();
        let mut display = Recorder::new(21, 6);
        render(&face, &mut display).unwrap();
        assert!(face.is_dirty());
    }
}
