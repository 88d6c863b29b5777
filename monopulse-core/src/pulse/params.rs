//! Pulse timing parameters
//!
//! All operator-facing values are in 0.1 ms units. Internally the delay and
//! width are stored as tick counts; above the 16-bit range the tick doubles
//! to 0.2 ms and the stored counts are halved.

/// Shortest accepted delay (500 ms)
pub const MIN_DELAY: u32 = 5000;

/// Longest accepted delay (9.9999 s)
pub const MAX_DELAY: u32 = 99_999;

/// Shortest accepted manual width (400 ms)
pub const MIN_WIDTH: u16 = 4000;

/// Longest accepted manual width (1 s)
pub const MAX_WIDTH: u16 = 10_000;

/// First delay that no longer fits the fine tick
pub const FINE_TICK_LIMIT: u32 = 65_536;

/// Divider tick selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Prescale {
    /// 0.1 ms tick
    Fine,
    /// 0.2 ms tick
    Coarse,
}

impl Prescale {
    /// Divider reload value for a 1 MHz base clock
    pub const fn reload(self) -> u8 {
        match self {
            Prescale::Fine => 99,
            Prescale::Coarse => 199,
        }
    }

    /// Tick length in microseconds
    pub const fn tick_us(self) -> u32 {
        self.reload() as u32 + 1
    }

    /// Factor converting stored ticks back to 0.1 ms units
    pub const fn scale(self) -> u32 {
        match self {
            Prescale::Fine => 1,
            Prescale::Coarse => 2,
        }
    }
}

/// Operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    /// Parameters come from the rotating table
    Auto = 0,
    /// Parameters are entered by the operator
    Manual = 1,
}

impl Mode {
    /// Decode a mode flag; any non-zero flag selects manual mode
    pub const fn from_flag(flag: u8) -> Self {
        if flag == 0 {
            Mode::Auto
        } else {
            Mode::Manual
        }
    }

    pub const fn flag(self) -> u8 {
        self as u8
    }
}

/// Delay and width of one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseParameters {
    /// Ticks from trigger to pulse start
    pub delay_ticks: u16,
    /// Ticks the output stays active
    pub width_ticks: u16,
    /// Tick selection
    pub prescale: Prescale,
}

impl Default for PulseParameters {
    fn default() -> Self {
        Self {
            delay_ticks: 5000,
            width_ticks: 5000,
            prescale: Prescale::Fine,
        }
    }
}

impl PulseParameters {
    /// Build parameters on the fine tick without clamping
    pub const fn fine(delay_ticks: u16, width_ticks: u16) -> Self {
        Self {
            delay_ticks,
            width_ticks,
            prescale: Prescale::Fine,
        }
    }

    /// Clamp operator input (0.1 ms units) into storable parameters
    ///
    /// Delays below [`FINE_TICK_LIMIT`] keep the fine tick and are raised to
    /// at least [`MIN_DELAY`]. Longer delays are capped at [`MAX_DELAY`] and
    /// switch to the coarse tick, halving both stored counts. The width is
    /// clamped to `[MIN_WIDTH, MAX_WIDTH]` before any halving.
    pub fn manual(delay: u32, width: u16) -> Self {
        let width = width.clamp(MIN_WIDTH, MAX_WIDTH);

        if delay < FINE_TICK_LIMIT {
            Self {
                delay_ticks: delay.max(MIN_DELAY) as u16,
                width_ticks: width,
                prescale: Prescale::Fine,
            }
        } else {
            Self {
                delay_ticks: (delay.min(MAX_DELAY) / 2) as u16,
                width_ticks: width / 2,
                prescale: Prescale::Coarse,
            }
        }
    }

    /// Delay in 0.1 ms units
    pub fn delay(&self) -> u32 {
        self.delay_ticks as u32 * self.prescale.scale()
    }

    /// Width in 0.1 ms units
    pub fn width(&self) -> u32 {
        self.width_ticks as u32 * self.prescale.scale()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fine_path_raises_short_delay() {
        let p = PulseParameters::manual(1200, 5000);
        assert_eq!(p.delay_ticks, 5000);
        assert_eq!(p.width_ticks, 5000);
        assert_eq!(p.prescale, Prescale::Fine);
    }

    #[test]
    fn test_fine_path_clamps_width() {
        assert_eq!(PulseParameters::manual(12000, 100).width_ticks, 4000);
        assert_eq!(PulseParameters::manual(12000, 20000).width_ticks, 10000);
        assert_eq!(PulseParameters::manual(65535, 7000).delay_ticks, 65535);
    }

    #[test]
    fn test_coarse_path_halves() {
        let p = PulseParameters::manual(70000, 6000);
        assert_eq!(p.delay_ticks, 35000);
        assert_eq!(p.width_ticks, 3000);
        assert_eq!(p.prescale, Prescale::Coarse);
        assert_eq!(p.delay(), 70000);
        assert_eq!(p.width(), 6000);
    }

    #[test]
    fn test_coarse_path_caps_delay() {
        let p = PulseParameters::manual(250_000, 100);
        assert_eq!(p.delay_ticks, 49999);
        assert_eq!(p.width_ticks, 2000);
        assert_eq!(p.delay(), 99998);
        assert_eq!(p.width(), 4000);
    }

    #[test]
    fn test_reload_values() {
        assert_eq!(Prescale::Fine.reload(), 99);
        assert_eq!(Prescale::Coarse.reload(), 199);
        assert_eq!(Prescale::Fine.tick_us(), 100);
        assert_eq!(Prescale::Coarse.tick_us(), 200);
    }

    #[test]
    fn test_mode_flag() {
        assert_eq!(Mode::from_flag(0), Mode::Auto);
        assert_eq!(Mode::from_flag(1), Mode::Manual);
        assert_eq!(Mode::from_flag(0x7f), Mode::Manual);
        assert_eq!(Mode::Manual.flag(), 1);
    }

    proptest! {
        #[test]
        fn prop_manual_always_in_range(delay in 0u32..1_000_000, width in any::<u16>()) {
            let p = PulseParameters::manual(delay, width);
            prop_assert!(p.delay() >= MIN_DELAY);
            prop_assert!(p.delay() <= MAX_DELAY);
            prop_assert!(p.width() >= MIN_WIDTH as u32);
            prop_assert!(p.width() <= MAX_WIDTH as u32);
        }

        #[test]
        fn prop_prescale_follows_delay(delay in 0u32..1_000_000, width in any::<u16>()) {
            let p = PulseParameters::manual(delay, width);
            let expected = if delay < FINE_TICK_LIMIT { Prescale::Fine } else { Prescale::Coarse };
            prop_assert_eq!(p.prescale, expected);
        }
    }
}
