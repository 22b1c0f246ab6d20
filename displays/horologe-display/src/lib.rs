//! Display abstraction and clock face rendering for Horologe
//!
//! This crate provides:
//! - `DisplayBackend` trait for character-cell displays (OLED, TFT, etc.)
//! - `ClockFace`, the time/date/weekday record with its dirty flag
//! - `render`, the fixed clock face layout
//!
//! # Architecture
//!
//! The control loop owns a `ClockFace` and overwrites it whenever a valid
//! line arrives. When the face is dirty it is rendered through whatever
//! `DisplayBackend` the board provides. The layout only knows character
//! cells; pixel fonts and offsets stay in the backend.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod face;
pub mod layout;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError, TextSize};
pub use face::ClockFace;
pub use layout::{render, Layout, PLACEHOLDER_DATE, PLACEHOLDER_TIME};
