//! Console UART on UART0 (GPIO0 TX, GPIO1 RX)
//!
//! embassy-rp sets up pins, clocks and baud rate through a blocking UART.
//! Byte traffic then goes straight through the UART0 registers: transmit
//! spins on the FIFO-full flag, and the receive interrupt drains the RX
//! FIFO into the console ring.

use embassy_rp::interrupt::{self, InterruptExt, Priority};
use embassy_rp::pac;
use embassy_rp::peripherals::{PIN_0, PIN_1, UART0};
use embassy_rp::uart::{self, Blocking, Config, Uart, UartRx, UartTx};
use embassy_rp::Peri;
use monopulse_hal::uart::{DataBits, Parity, StopBits};
use monopulse_hal::{SerialRx, SerialTx, UartConfig};

/// Transmit half of the console
pub struct ConsoleTx {
    _tx: UartTx<'static, Blocking>,
}

/// Receive half of the console, used from `UART0_IRQ`
pub struct ConsoleRx {
    _rx: UartRx<'static, Blocking>,
}

/// Configure UART0 for the console
pub fn console(
    uart: Peri<'static, UART0>,
    tx: Peri<'static, PIN_0>,
    rx: Peri<'static, PIN_1>,
    uart_config: &UartConfig,
) -> (ConsoleTx, ConsoleRx) {
    let mut config = Config::default();
    config.baudrate = uart_config.baudrate;
    config.data_bits = match uart_config.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    config.parity = match uart_config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    config.stop_bits = match uart_config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };

    let (tx, rx) = Uart::new_blocking(uart, tx, rx, config).split();
    (ConsoleTx { _tx: tx }, ConsoleRx { _rx: rx })
}

impl ConsoleRx {
    /// Unmask the receive and receive-timeout interrupts
    pub fn enable_interrupt(&mut self, priority: Priority) {
        pac::UART0.uartimsc().modify(|w| {
            w.set_rxim(true);
            w.set_rtim(true);
        });
        interrupt::UART0_IRQ.set_priority(priority);
        interrupt::UART0_IRQ.unpend();
        // SAFETY: the firmware defines the UART0_IRQ handler
        unsafe { interrupt::UART0_IRQ.enable() };
    }
}

impl SerialRx for ConsoleRx {
    fn take_byte(&mut self) -> Option<u8> {
        if pac::UART0.uartfr().read().rxfe() {
            None
        } else {
            Some(pac::UART0.uartdr().read().data())
        }
    }
}

impl SerialTx for ConsoleTx {
    fn is_tx_ready(&self) -> bool {
        !pac::UART0.uartfr().read().txff()
    }

    fn write_byte(&mut self, byte: u8) {
        pac::UART0.uartdr().write(|w| w.set_data(byte));
    }
}
