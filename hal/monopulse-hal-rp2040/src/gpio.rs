//! GPIO lines for the pulse generator
//!
//! Wraps embassy-rp pins in the `monopulse-hal` traits. Every wrapper works
//! in logical levels: `set_high` means "active" and the configured
//! inversion decides the electrical level.

use embassy_rp::gpio::{AnyPin, Flex, Input, Level, Output, Pull};
use embassy_rp::Peri;
use monopulse_core::config::PinConfig;
use monopulse_hal::{InputPin, OutputPin, TristatePin};

/// Maximum number of GPIO pins on RP2040
pub const GPIO_COUNT: usize = 30;

fn pull_for(config: PinConfig) -> Pull {
    if config.pull_up {
        Pull::Up
    } else {
        Pull::None
    }
}

/// Push-pull output (pulse output, indicator LED)
pub struct GpioOutput {
    pin: Output<'static>,
    inverted: bool,
}

impl GpioOutput {
    /// Configure a pin as output, starting inactive
    pub fn new(pin: Peri<'static, AnyPin>, config: PinConfig) -> Self {
        let idle = if config.inverted { Level::High } else { Level::Low };
        Self {
            pin: Output::new(pin, idle),
            inverted: config.inverted,
        }
    }
}

impl OutputPin for GpioOutput {
    fn set_high(&mut self) {
        self.pin.set_level(Level::from(!self.inverted));
    }

    fn set_low(&mut self) {
        self.pin.set_level(Level::from(self.inverted));
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high() != self.inverted
    }
}

/// Digital input (trigger line)
pub struct GpioInput {
    pin: Input<'static>,
    inverted: bool,
}

impl GpioInput {
    pub fn new(pin: Peri<'static, AnyPin>, config: PinConfig) -> Self {
        Self {
            pin: Input::new(pin, pull_for(config)),
            inverted: config.inverted,
        }
    }

    /// Wait for the line to become active
    ///
    /// Active-low lines fire on the falling edge, others on the rising edge.
    pub async fn wait_for_active_edge(&mut self) {
        if self.inverted {
            self.pin.wait_for_falling_edge().await
        } else {
            self.pin.wait_for_rising_edge().await
        }
    }
}

impl InputPin for GpioInput {
    fn is_high(&self) -> bool {
        self.pin.is_high() != self.inverted
    }
}

/// Display segment or digit line that can float
pub struct DisplayLine {
    pin: Flex<'static>,
    inverted: bool,
    active: bool,
    driven: bool,
}

impl DisplayLine {
    /// Configure a display line, initially released
    pub fn new(pin: Peri<'static, AnyPin>, config: PinConfig) -> Self {
        let mut pin = Flex::new(pin);
        pin.set_pull(Pull::None);
        pin.set_as_input();
        let mut line = Self {
            pin,
            inverted: config.inverted,
            active: false,
            driven: false,
        };
        line.set_low();
        line
    }

    fn apply(&mut self) {
        self.pin.set_level(Level::from(self.active != self.inverted));
    }
}

impl OutputPin for DisplayLine {
    fn set_high(&mut self) {
        self.active = true;
        self.apply();
    }

    fn set_low(&mut self) {
        self.active = false;
        self.apply();
    }

    fn is_set_high(&self) -> bool {
        self.active
    }
}

impl TristatePin for DisplayLine {
    fn release(&mut self) {
        self.pin.set_as_input();
        self.driven = false;
    }

    fn drive(&mut self) {
        self.apply();
        self.pin.set_as_output();
        self.driven = true;
    }

    fn is_driven(&self) -> bool {
        self.driven
    }
}
