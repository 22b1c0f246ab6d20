//! Board-agnostic core logic for the clock display firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - The control loop context (poll serial, parse lines, redraw when dirty)
//! - Configuration type definitions and defaults

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod app;
pub mod config;

pub use app::{ClockApp, Event, Reject, StepError};
pub use config::ClockConfig;
