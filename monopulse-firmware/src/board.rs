//! Board assembly from the pin bank

use heapless::Vec;

use monopulse_core::config::{PinConfig, PulserConfig};
use monopulse_core::display::{DIGITS, SEGMENTS};
use monopulse_hal_rp2040::{DisplayLine, GpioInput, GpioOutput, PinBank, PinError};

/// Configurable lines of the board
pub struct Board {
    pub trigger: GpioInput,
    pub output: GpioOutput,
    pub indicator: GpioOutput,
    pub segments: [DisplayLine; SEGMENTS],
    pub digits: [DisplayLine; DIGITS],
}

/// Take every configured line from the bank
pub fn take_board(bank: &mut PinBank, config: &PulserConfig) -> Result<Board, PinError> {
    let trigger = GpioInput::new(bank.take(config.trigger.pin.pin)?, config.trigger.pin);
    let output = GpioOutput::new(bank.take(config.pulse.output_pin.pin)?, config.pulse.output_pin);
    let indicator = GpioOutput::new(bank.take(config.indicator.pin.pin)?, config.indicator.pin);

    Ok(Board {
        trigger,
        output,
        indicator,
        segments: display_lines(bank, &config.display.segments)?,
        digits: display_lines(bank, &config.display.digits)?,
    })
}

fn display_lines<const N: usize>(
    bank: &mut PinBank,
    pins: &[PinConfig; N],
) -> Result<[DisplayLine; N], PinError> {
    let mut lines: Vec<DisplayLine, N> = Vec::new();
    for &pin in pins {
        let line = DisplayLine::new(bank.take(pin.pin)?, pin);
        if lines.push(line).is_err() {
            return Err(PinError::InvalidPin);
        }
    }
    lines.into_array().map_err(|_| PinError::InvalidPin)
}
