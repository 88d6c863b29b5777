//! RP2040-specific HAL for the pulse generator firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `monopulse-hal` traits:
//!
//! - GPIO wrappers with configurable polarity and tri-state display lines
//! - Dynamic pin allocation for config-driven setup
//! - Cascaded PWM slices as pulse divider and compare timer
//! - Register-level UART0 console access

#![no_std]

pub mod gpio;
pub mod pins;
pub mod timer;
pub mod uart;

pub use gpio::{DisplayLine, GpioInput, GpioOutput};
pub use pins::{split, FixedPeripherals, PinBank, PinError};
pub use timer::{EdgeCounter, PwmDivider};
pub use uart::{ConsoleRx, ConsoleTx};
