//! Configuration type definitions
//!
//! The firmware fills a [`ClockConfig`] at build time from `clock.toml`.
//! Every field has a default matching the stock board and sender.

use horologe_hal::uart::{UartConfig, DEFAULT_BAUDRATE};

/// Clock display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    /// Serial baud rate, must match the sender
    pub baudrate: u32,
    /// Delay between control loop iterations in microseconds
    ///
    /// Has to stay below one character time at `baudrate`, the UART
    /// only holds a single received byte.
    pub poll_interval_us: u32,
    /// Upper bound on bytes drained from the UART per iteration
    pub max_bytes_per_poll: u16,
    /// 7-bit I2C address of the display controller
    pub i2c_address: u8,
    /// I2C clock frequency in Hz
    pub i2c_frequency: u32,
}

impl ClockConfig {
    /// Stock configuration
    pub const DEFAULT: Self = Self {
        baudrate: DEFAULT_BAUDRATE,
        poll_interval_us: 200,
        max_bytes_per_poll: 32,
        i2c_address: 0x3C,
        i2c_frequency: 400_000,
    };

    /// Serial settings for this configuration (8N1)
    pub const fn uart(&self) -> UartConfig {
        UartConfig::with_baudrate(self.baudrate)
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_sender() {
        let config = ClockConfig::default();
        assert_eq!(config.baudrate, 9600);
        assert_eq!(config.uart(), UartConfig::default());
    }

    #[test]
    fn test_default_polls_faster_than_one_character() {
        let config = ClockConfig::default();
        // 10 bits per character with 8N1 framing
        let char_time_us = 10 * 1_000_000 / config.baudrate;
        assert!(config.poll_interval_us < char_time_us);
    }

    #[test]
    fn test_default_drains_a_full_line_within_a_few_polls() {
        let config = ClockConfig::default();
        assert!(config.max_bytes_per_poll > 0);
        assert!(
            (horologe_protocol::MAX_ENCODED_LEN as u16).div_ceil(config.max_bytes_per_poll) <= 3
        );
    }
}
