//! Board configuration types
//!
//! Pin assignments and timing constants of one board. The defaults match
//! the reference wiring of an RP2040 Pico board.

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: false,
        }
    }

    /// Enable the pull-up on this pin
    pub const fn with_pullup(self) -> Self {
        Self {
            pull_up: true,
            ..self
        }
    }
}

/// Serial console settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    pub baudrate: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self { baudrate: 115_200 }
    }
}

/// Trigger input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TriggerConfig {
    /// Trigger line; active-low lines fire on the falling edge
    pub pin: PinConfig,
    /// Time the line must stay idle before the trigger is enabled
    pub debounce_ms: u32,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            pin: PinConfig::inverted(3).with_pullup(),
            debounce_ms: 20,
        }
    }
}

/// Pulse output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseConfig {
    pub output_pin: PinConfig,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            output_pin: PinConfig::new(2),
        }
    }
}

/// Status indicator LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorConfig {
    pub pin: PinConfig,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            pin: PinConfig::new(25),
        }
    }
}

/// Multiplexed display wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Time each digit stays lit
    pub refresh_us: u32,
    /// Segment lines a, b, c, d, e, f, g, dp
    pub segments: [PinConfig; 8],
    /// Digit select lines, index 0 = rightmost digit
    pub digits: [PinConfig; 5],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            refresh_us: 2000,
            segments: [
                PinConfig::new(10),
                PinConfig::new(11),
                PinConfig::new(12),
                PinConfig::new(13),
                PinConfig::new(14),
                PinConfig::new(15),
                PinConfig::new(16),
                PinConfig::new(17),
            ],
            digits: [
                PinConfig::inverted(18),
                PinConfig::inverted(19),
                PinConfig::inverted(20),
                PinConfig::inverted(21),
                PinConfig::inverted(22),
            ],
        }
    }
}

/// Complete board configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulserConfig {
    pub serial: SerialConfig,
    pub trigger: TriggerConfig,
    pub pulse: PulseConfig,
    pub indicator: IndicatorConfig,
    pub display: DisplayConfig,
}

impl PulserConfig {
    /// Every GPIO the configuration assigns, in a fixed order
    pub fn pins(&self) -> impl Iterator<Item = PinConfig> + '_ {
        [self.trigger.pin, self.pulse.output_pin, self.indicator.pin]
            .into_iter()
            .chain(self.display.segments)
            .chain(self.display.digits)
    }

    /// First pin number assigned twice, if any
    pub fn duplicate_pin(&self) -> Option<u8> {
        let mut seen = 0u32;
        for pin in self.pins() {
            let bit = 1u32 << (pin.pin & 31);
            if seen & bit != 0 {
                return Some(pin.pin);
            }
            seen |= bit;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_duplicates() {
        let config = PulserConfig::default();
        assert_eq!(config.duplicate_pin(), None);
        assert_eq!(config.pins().count(), 3 + 8 + 5);
    }

    #[test]
    fn test_duplicate_detected() {
        let mut config = PulserConfig::default();
        config.indicator.pin = PinConfig::new(12);
        assert_eq!(config.duplicate_pin(), Some(12));
    }

    #[test]
    fn test_pin_builders() {
        let pin = PinConfig::inverted(3).with_pullup();
        assert!(pin.inverted);
        assert!(pin.pull_up);
        assert_eq!(pin.pin, 3);
        assert!(!PinConfig::new(4).inverted);
    }
}
