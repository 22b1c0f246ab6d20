//! Horologe Hardware Abstraction Layer
//!
//! This crate defines the serial-link traits the clock display is written
//! against. Chip-specific crates implement them for real peripherals, the
//! host sender implements them for an OS serial port, and tests implement
//! them with in-memory mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  horologe-core / horologe-sender        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  horologe-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ horologe-hal- │       │  serialport   │
//! │   stm32f0     │       │  (host side)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication

#![no_std]
#![deny(unsafe_code)]

pub mod uart;

// Re-export key traits at crate root for convenience
pub use uart::{DataBits, Parity, StopBits, UartConfig, UartRx, UartTx};
