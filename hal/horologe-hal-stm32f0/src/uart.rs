//! UART driver for STM32F0
//!
//! Wraps a blocking-mode embassy UART receiver as a polled
//! [`horologe_hal::UartRx`].

use embassy_stm32::mode::Blocking;
use embassy_stm32::usart::{self, Error as UsartError, UartRx};
use horologe_hal::{DataBits, Parity, StopBits, UartConfig};

/// Build an embassy USART configuration from the shared settings
pub fn usart_config(config: &UartConfig) -> usart::Config {
    let mut usart = usart::Config::default();
    usart.baudrate = config.baudrate;
    usart.data_bits = match config.data_bits {
        DataBits::Seven => usart::DataBits::DataBits7,
        DataBits::Eight => usart::DataBits::DataBits8,
    };
    usart.parity = match config.parity {
        Parity::None => usart::Parity::ParityNone,
        Parity::Even => usart::Parity::ParityEven,
        Parity::Odd => usart::Parity::ParityOdd,
    };
    usart.stop_bits = match config.stop_bits {
        StopBits::One => usart::StopBits::STOP1,
        StopBits::Two => usart::StopBits::STOP2,
    };
    usart
}

/// Error from UART operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartBusError {
    /// Framing error
    Framing,
    /// Noise error
    Noise,
    /// Overrun error
    Overrun,
    /// Parity error
    Parity,
    /// Other error
    Other,
}

impl From<UsartError> for UartBusError {
    fn from(e: UsartError) -> Self {
        match e {
            UsartError::Framing => UartBusError::Framing,
            UsartError::Noise => UartBusError::Noise,
            UsartError::Overrun => UartBusError::Overrun,
            UsartError::Parity => UartBusError::Parity,
            _ => UartBusError::Other,
        }
    }
}

/// Polled UART receiver
pub struct BlockingUartRx<'d> {
    rx: UartRx<'d, Blocking>,
}

impl<'d> BlockingUartRx<'d> {
    /// Wrap a blocking-mode embassy receiver
    pub fn new(rx: UartRx<'d, Blocking>) -> Self {
        Self { rx }
    }
}

impl horologe_hal::UartRx for BlockingUartRx<'_> {
    type Error = UartBusError;

    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        match self.rx.nb_read() {
            Ok(byte) => Ok(Some(byte)),
            Err(nb::Error::WouldBlock) => Ok(None),
            Err(nb::Error::Other(e)) => Err(e.into()),
        }
    }
}
