//! Serial console plumbing
//!
//! Reception is interrupt driven into a [`SerialRing`]; transmission is a
//! blocking per-byte spin on the transmitter's ready flag.

mod ring;
mod tx;

pub use ring::{SerialRing, RX_CAPACITY};
pub use tx::{write_bytes, Console};
