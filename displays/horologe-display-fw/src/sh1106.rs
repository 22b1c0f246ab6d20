//! SH1106 OLED Display Driver
//!
//! Driver for 128x64 SH1106-based OLED displays via I2C. Text is rendered
//! with embedded-graphics mono fonts into a local frame buffer; `flush`
//! sends the whole buffer page by page.
//!
//! Normal text uses the 6x10 font, giving a 21 x 6 cell grid. Large text
//! uses the 10x20 font padded to 12 px so each glyph covers 2x2 cells.

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use horologe_display::{DisplayBackend, DisplayError, TextSize};

/// Display dimensions
const WIDTH: usize = 128;
const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// SH1106 RAM is 132 columns wide; the panel starts at column 2
const COLUMN_OFFSET: u8 = 2;

/// Normal character cell
const CELL_WIDTH: u8 = 6;
const CELL_HEIGHT: u8 = 10;

/// Text grid in normal cells
const COLS: u8 = (WIDTH / CELL_WIDTH as usize) as u8;
const ROWS: u8 = (HEIGHT / CELL_HEIGHT as usize) as u8;

/// 10x20 glyphs on a 12 px pitch, two normal cells wide
const LARGE_FONT: MonoFont<'static> = MonoFont {
    character_spacing: 2,
    ..FONT_10X20
};

/// SH1106 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Control byte prefixes
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// 1 bit per pixel, organized as 8-pixel-high pages like the controller RAM
pub struct FrameBuffer {
    pages: [[u8; WIDTH]; PAGES],
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
        }
    }

    pub fn clear(&mut self) {
        for page in self.pages.iter_mut() {
            page.fill(0);
        }
    }

    pub fn page(&self, page: usize) -> &[u8; WIDTH] {
        &self.pages[page]
    }

    fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        let mask = 1u8 << (y % 8);
        let byte = &mut self.pages[y / 8][x];
        if on {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x < 0 || coord.y < 0 {
                continue;
            }
            let (x, y) = (coord.x as usize, coord.y as usize);
            if x >= WIDTH || y >= HEIGHT {
                continue;
            }
            self.set_pixel(x, y, color.is_on());
        }
        Ok(())
    }
}

/// SH1106 OLED driver
pub struct Sh1106<I2C> {
    i2c: I2C,
    address: u8,
    buffer: FrameBuffer,
    ready: bool,
}

impl<I2C> Sh1106<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Create a new SH1106 driver; call [`Sh1106::init`] before drawing
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            buffer: FrameBuffer::new(),
            ready: false,
        }
    }

    /// Initialize the display
    pub fn init(&mut self) -> Result<(), I2C::Error> {
        self.ready = false;

        // Initialization sequence for SH1106
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_MUX_RATIO,
            0x3F, // 64 lines
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14,                  // Enable charge pump
            cmd::SET_SEG_REMAP,    // Flip horizontally
            cmd::SET_COM_SCAN_DEC, // Flip vertically
            cmd::SET_COM_PINS,
            0x12, // Alternative COM config
            cmd::SET_CONTRAST,
            0xCF, // High contrast
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::SET_NORMAL,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.command(c)?;
        }

        self.ready = true;
        Ok(())
    }

    /// Send a command to the display
    fn command(&mut self, cmd: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[CONTROL_COMMAND, cmd])
    }

    /// Send the frame buffer to the display
    fn write_frame(&mut self) -> Result<(), I2C::Error> {
        for page in 0..PAGES {
            self.command(cmd::SET_PAGE_ADDR | page as u8)?;
            self.command(cmd::SET_LOW_COLUMN | (COLUMN_OFFSET & 0x0F))?;
            self.command(cmd::SET_HIGH_COLUMN | (COLUMN_OFFSET >> 4))?;

            let mut data = [0u8; WIDTH + 1];
            data[0] = CONTROL_DATA;
            data[1..].copy_from_slice(self.buffer.page(page));
            self.i2c.write(self.address, &data)?;
        }

        Ok(())
    }
}

impl<I2C> DisplayBackend for Sh1106<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.buffer.clear();
        Ok(())
    }

    fn draw_text(
        &mut self,
        row: u8,
        col: u8,
        text: &str,
        size: TextSize,
    ) -> Result<(), DisplayError> {
        if row >= ROWS || col >= COLS {
            return Err(DisplayError::InvalidCoordinates);
        }

        let font = match size {
            TextSize::Normal => &FONT_6X10,
            TextSize::Large => &LARGE_FONT,
        };
        let origin = Point::new(
            i32::from(col) * i32::from(CELL_WIDTH),
            i32::from(row) * i32::from(CELL_HEIGHT),
        );

        // Drawing into the frame buffer cannot fail
        let _ = Text::with_baseline(
            text,
            origin,
            MonoTextStyle::new(font, BinaryColor::On),
            Baseline::Top,
        )
        .draw(&mut self.buffer);

        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.ready {
            return Err(DisplayError::NotInitialized);
        }
        // A failed transfer forces a re-init before the next redraw
        self.write_frame().map_err(|_| {
            self.ready = false;
            DisplayError::Communication
        })
    }

    fn dimensions(&self) -> (u8, u8) {
        (COLS, ROWS)
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}
