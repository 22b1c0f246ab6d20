//! STM32F0-specific HAL for the Horologe firmware
//!
//! This crate provides STM32F0 implementations of the `horologe-hal`
//! traits plus configuration converters and error types. Supported chips:
//!
//! - STM32F042F6
//! - STM32F042K6 (stock clock display board)
//!
//! # Features
//!
//! - `stm32f042f6`, `stm32f042k6` - Chip selection
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! The firmware builds peripherals with embassy-stm32 directly and wraps
//! them here so the board-agnostic control loop can drive them.

#![no_std]

pub mod i2c;
pub mod uart;

pub use i2c::{i2c_config, I2cBusError};
pub use uart::{usart_config, BlockingUartRx, UartBusError};
