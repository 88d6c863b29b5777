//! Dynamic pin allocation for config-driven hardware setup
//!
//! The board file assigns the trigger, pulse, indicator and display lines
//! by GPIO number. A handful of pins have a fixed function on this board
//! and are held back from the bank:
//!
//! | GPIO | Function                                   |
//! |------|--------------------------------------------|
//! | 0    | UART0 TX (console)                         |
//! | 1    | UART0 RX (console)                         |
//! | 6    | PWM3 A, divider tick output                |
//! | 9    | PWM4 B, tick counter input (jumper to 6)   |

use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals::{
    PIN_0, PIN_1, PIN_6, PIN_9, PWM_SLICE3, PWM_SLICE4, UART0, WATCHDOG,
};
use embassy_rp::{Peri, Peripherals};

use crate::gpio::GPIO_COUNT;

/// GPIO numbers with a fixed function
pub const RESERVED_PINS: [u8; 4] = [0, 1, 6, 9];

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
    /// Pin reserved for special function
    Reserved,
}

/// Check if a GPIO has a fixed function on this board
pub fn is_reserved(pin: u8) -> bool {
    RESERVED_PINS.contains(&pin)
}

/// Pin bank that holds the free GPIO pins and allows taking them by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
}

impl PinBank {
    /// Take a pin by number
    ///
    /// Returns the pin if available, or an error if:
    /// - Pin number is invalid (>= 30)
    /// - Pin has a fixed function
    /// - Pin was already taken
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        if pin_num as usize >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        if is_reserved(pin_num) {
            return Err(PinError::Reserved);
        }
        self.pins[pin_num as usize]
            .take()
            .ok_or(PinError::AlreadyTaken)
    }

    /// Check if a pin is available
    pub fn is_available(&self, pin_num: u8) -> bool {
        self.pins
            .get(pin_num as usize)
            .is_some_and(|p| p.is_some())
    }
}

/// Peripherals with a fixed role on this board
pub struct FixedPeripherals {
    pub uart0: Peri<'static, UART0>,
    pub uart_tx: Peri<'static, PIN_0>,
    pub uart_rx: Peri<'static, PIN_1>,
    pub divider_slice: Peri<'static, PWM_SLICE3>,
    pub divider_pin: Peri<'static, PIN_6>,
    pub counter_slice: Peri<'static, PWM_SLICE4>,
    pub counter_pin: Peri<'static, PIN_9>,
    pub watchdog: Peri<'static, WATCHDOG>,
}

/// Split embassy peripherals into the pin bank and the fixed-role set
pub fn split(p: Peripherals) -> (PinBank, FixedPeripherals) {
    let bank = PinBank {
        pins: [
            None,
            None,
            Some(p.PIN_2.into()),
            Some(p.PIN_3.into()),
            Some(p.PIN_4.into()),
            Some(p.PIN_5.into()),
            None,
            Some(p.PIN_7.into()),
            Some(p.PIN_8.into()),
            None,
            Some(p.PIN_10.into()),
            Some(p.PIN_11.into()),
            Some(p.PIN_12.into()),
            Some(p.PIN_13.into()),
            Some(p.PIN_14.into()),
            Some(p.PIN_15.into()),
            Some(p.PIN_16.into()),
            Some(p.PIN_17.into()),
            Some(p.PIN_18.into()),
            Some(p.PIN_19.into()),
            Some(p.PIN_20.into()),
            Some(p.PIN_21.into()),
            Some(p.PIN_22.into()),
            Some(p.PIN_23.into()),
            Some(p.PIN_24.into()),
            Some(p.PIN_25.into()),
            Some(p.PIN_26.into()),
            Some(p.PIN_27.into()),
            Some(p.PIN_28.into()),
            Some(p.PIN_29.into()),
        ],
    };

    let fixed = FixedPeripherals {
        uart0: p.UART0,
        uart_tx: p.PIN_0,
        uart_rx: p.PIN_1,
        divider_slice: p.PWM_SLICE3,
        divider_pin: p.PIN_6,
        counter_slice: p.PWM_SLICE4,
        counter_pin: p.PIN_9,
        watchdog: p.WATCHDOG,
    };

    (bank, fixed)
}
