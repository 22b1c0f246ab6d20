//! Display backend trait
//!
//! Defines the interface for different display types.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DisplayError::Communication => write!(f, "display communication error"),
            DisplayError::InvalidCoordinates => write!(f, "invalid display coordinates"),
            DisplayError::NotInitialized => write!(f, "display not initialized"),
        }
    }
}

impl core::error::Error for DisplayError {}

/// Text size in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextSize {
    /// One cell per character
    Normal,
    /// Each character covers 2x2 normal cells
    Large,
}

impl TextSize {
    /// Cells per character along each axis
    pub const fn scale(self) -> u8 {
        match self {
            TextSize::Normal => 1,
            TextSize::Large => 2,
        }
    }
}

/// Display backend trait
///
/// Provides a hardware-agnostic interface for rendering to displays.
/// Implementations handle the specifics of OLED, TFT, or other display types.
pub trait DisplayBackend {
    /// Clear the entire display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text with its top-left corner at the given cell
    ///
    /// - `row`: Row number in normal cells (0-based)
    /// - `col`: Column number in normal cells (0-based)
    /// - `text`: Text to display; characters past the right edge are dropped
    /// - `size`: Glyph size
    fn draw_text(&mut self, row: u8, col: u8, text: &str, size: TextSize)
        -> Result<(), DisplayError>;

    /// Flush buffered content to the display
    ///
    /// For displays with internal buffers, this sends the buffer to the hardware.
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Get the display dimensions
    ///
    /// Returns (columns, rows) in normal character cells
    fn dimensions(&self) -> (u8, u8);

    /// Check if the display is ready
    fn is_ready(&self) -> bool;
}
