//! Monopulse Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs. The pulse engine, display multiplexer and serial
//! helpers in `monopulse-core` are written against these traits only, so
//! they run unchanged on the target and against mocks in host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  monopulse-firmware (tasks, IRQs)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  monopulse-core (engine, display, ring) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  monopulse-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ monopulse-hal-│
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::TristatePin`] - Digital I/O
//! - [`timer::DividerTimer`], [`timer::CompareTimer`] - Cascaded pulse timers
//! - [`uart::SerialTx`], [`uart::SerialRx`] - Register-level serial access

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod timer;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin, TristatePin};
pub use timer::{CompareTimer, DividerTimer};
pub use uart::{SerialRx, SerialTx, UartConfig};
