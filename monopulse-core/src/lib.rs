//! Board-agnostic core logic for the single pulse generator firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Pulse timing engine (cycle state machine, parameters, automatic table)
//! - Display buffer and multiplexer
//! - Serial receive ring and blocking transmit helpers
//! - Operator console input parsing
//! - Board configuration types and parser
//!
//! Hardware access goes through the traits of `monopulse-hal`; host tests
//! substitute small mock types.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod config;
pub mod display;
pub mod pulse;
pub mod serial;
