//! UART serial communication abstractions
//!
//! The operator console is a plain text stream. Transmission busy-waits per
//! byte on the transmit-ready flag; reception is interrupt driven, the
//! receive handler draining the hardware FIFO into a software ring.

/// UART transmitter with byte-level access
pub trait SerialTx {
    /// Check if the transmitter can accept another byte
    fn is_tx_ready(&self) -> bool;

    /// Write one byte to the transmit register
    ///
    /// Callers must check [`SerialTx::is_tx_ready`] first; writing while the
    /// transmitter is full drops the byte on most hardware.
    fn write_byte(&mut self, byte: u8);
}

/// UART receiver with byte-level access, used from the receive interrupt
pub trait SerialRx {
    /// Take the next received byte from the hardware, if any
    fn take_byte(&mut self) -> Option<u8>;
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 115200,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
