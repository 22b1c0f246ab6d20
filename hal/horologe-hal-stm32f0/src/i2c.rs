//! I2C bus support for STM32F0
//!
//! Configuration and error mapping for the SH1106 OLED link.

use embassy_stm32::i2c::{self, Error as I2cError};
use embassy_stm32::time::Hertz;

/// Build an embassy I2C configuration for the given bus frequency
pub fn i2c_config(frequency: u32) -> i2c::Config {
    let mut config = i2c::Config::default();
    config.frequency = Hertz(frequency);
    config
}

/// Error from I2C operations
///
/// Collapsed to what tells a wiring fault from a bus glitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// No device acknowledged, usually wrong address or wiring
    Nack,
    /// Clock stretched past the timeout
    Timeout,
    /// Bus error or lost arbitration
    Bus,
    /// Anything else reported by the peripheral
    Other,
}

impl From<I2cError> for I2cBusError {
    fn from(e: I2cError) -> Self {
        match e {
            I2cError::Nack => I2cBusError::Nack,
            I2cError::Timeout => I2cBusError::Timeout,
            I2cError::Bus | I2cError::Arbitration => I2cBusError::Bus,
            _ => I2cBusError::Other,
        }
    }
}
