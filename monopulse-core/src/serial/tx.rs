//! Blocking console output

use core::fmt;

use monopulse_hal::SerialTx;

fn send<T: SerialTx>(tx: &mut T, byte: u8) {
    while !tx.is_tx_ready() {
        core::hint::spin_loop();
    }
    tx.write_byte(byte);
}

/// Send bytes, spinning on transmit-ready before each one
///
/// A line feed goes out as CR LF. A NUL byte ends the write early.
pub fn write_bytes<T: SerialTx>(tx: &mut T, bytes: &[u8]) {
    for &byte in bytes {
        match byte {
            0 => break,
            b'\n' => {
                send(tx, b'\r');
                send(tx, b'\n');
            }
            _ => send(tx, byte),
        }
    }
}

/// `core::fmt` adapter over a transmitter
pub struct Console<T> {
    tx: T,
}

impl<T: SerialTx> Console<T> {
    pub fn new(tx: T) -> Self {
        Self { tx }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        write_bytes(&mut self.tx, bytes);
    }

    pub fn into_inner(self) -> T {
        self.tx
    }
}

impl<T: SerialTx> fmt::Write for Console<T> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::fmt::Write;
    use heapless::Vec;

    /// Transmitter that is ready on every third poll
    #[derive(Default)]
    struct MockTx {
        sent: Vec<u8, 64>,
        polls: Cell<u32>,
    }

    impl SerialTx for MockTx {
        fn is_tx_ready(&self) -> bool {
            let n = self.polls.get() + 1;
            self.polls.set(n);
            n % 3 == 0
        }
        fn write_byte(&mut self, byte: u8) {
            self.sent.push(byte).unwrap();
        }
    }

    #[test]
    fn test_line_feed_becomes_crlf() {
        let mut tx = MockTx::default();
        write_bytes(&mut tx, b"ok\n");
        assert_eq!(&tx.sent[..], b"ok\r\n");
    }

    #[test]
    fn test_nul_terminates() {
        let mut tx = MockTx::default();
        write_bytes(&mut tx, b"ab\0cd");
        assert_eq!(&tx.sent[..], b"ab");
    }

    #[test]
    fn test_waits_for_ready() {
        let mut tx = MockTx::default();
        write_bytes(&mut tx, b"xyz");
        assert_eq!(&tx.sent[..], b"xyz");
        assert_eq!(tx.polls.get(), 9);
    }

    #[test]
    fn test_console_fmt() {
        let mut console = Console::new(MockTx::default());
        writeln!(console, "delay {}", 1200).unwrap();
        let tx = console.into_inner();
        assert_eq!(&tx.sent[..], b"delay 1200\r\n");
    }
}
