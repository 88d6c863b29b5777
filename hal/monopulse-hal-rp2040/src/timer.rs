//! Cascaded pulse timers on two PWM slices
//!
//! ```text
//!   125 MHz ─► PWM3 (÷125, TOP = reload) ─► GPIO6 ══jumper══ GPIO9 ─► PWM4 B
//!              square wave, 1 tick/period              rising-edge counter
//!                                                      wrap IRQ = compare match
//! ```
//!
//! The counter slice counts divider edges and wraps after `TOP + 1` of
//! them, so loading `ticks` sets `TOP = ticks - 1`. The wrap flag of slice 4
//! raises `PWM_IRQ_WRAP`, which the firmware routes to the pulse engine.

use embassy_rp::gpio::Pull;
use embassy_rp::interrupt::{self, InterruptExt, Priority};
use embassy_rp::pac;
use embassy_rp::peripherals::{PIN_6, PIN_9, PWM_SLICE3, PWM_SLICE4};
use embassy_rp::pwm::{Config as PwmConfig, InputMode, Pwm};
use embassy_rp::Peri;
use fixed::types::extra::U4;
use fixed::FixedU16;
use monopulse_hal::{CompareTimer, DividerTimer};

/// PWM slice counting divider ticks
pub const COUNTER_SLICE: usize = 4;

/// System clock divider giving a 1 MHz divider base
const BASE_DIVIDER: u16 = 125;

/// Divider slice producing the pulse tick on GPIO6
pub struct PwmDivider {
    pwm: Pwm<'static>,
    config: PwmConfig,
}

impl PwmDivider {
    pub fn new(slice: Peri<'static, PWM_SLICE3>, pin: Peri<'static, PIN_6>) -> Self {
        let mut config = PwmConfig::default();
        config.divider = FixedU16::<U4>::from_num(BASE_DIVIDER);
        config.top = 99;
        config.compare_a = 50;
        config.enable = false;
        Self {
            pwm: Pwm::new_output_a(slice, pin, config.clone()),
            config,
        }
    }
}

impl DividerTimer for PwmDivider {
    fn start(&mut self, reload: u8) {
        self.config.top = reload as u16;
        self.config.compare_a = (reload as u16 + 1) / 2;
        self.config.enable = true;
        self.pwm.set_config(&self.config);
    }

    fn stop(&mut self) {
        self.config.enable = false;
        self.pwm.set_config(&self.config);
    }

    fn reset(&mut self) {
        self.pwm.set_counter(0);
    }

    fn is_running(&self) -> bool {
        self.config.enable
    }
}

/// Edge-counting slice acting as the compare-match timer
pub struct EdgeCounter {
    pwm: Pwm<'static>,
    config: PwmConfig,
}

impl EdgeCounter {
    pub fn new(slice: Peri<'static, PWM_SLICE4>, pin: Peri<'static, PIN_9>) -> Self {
        let mut config = PwmConfig::default();
        config.divider = FixedU16::<U4>::from_num(1);
        config.top = u16::MAX;
        config.enable = true;
        Self {
            pwm: Pwm::new_input(slice, pin, Pull::None, InputMode::RisingEdge, config.clone()),
            config,
        }
    }

    /// Route slice wraps to `PWM_IRQ_WRAP` at the given priority
    ///
    /// Per-slice masking stays with `enable_match_interrupt`.
    pub fn enable_interrupt(&mut self, priority: Priority) {
        interrupt::PWM_IRQ_WRAP.set_priority(priority);
        interrupt::PWM_IRQ_WRAP.unpend();
        // SAFETY: the firmware defines the PWM_IRQ_WRAP handler
        unsafe { interrupt::PWM_IRQ_WRAP.enable() };
    }
}

impl CompareTimer for EdgeCounter {
    fn load(&mut self, ticks: u16) {
        self.config.enable = false;
        self.pwm.set_config(&self.config);
        self.config.top = ticks.saturating_sub(1);
        self.config.enable = true;
        self.pwm.set_counter(0);
        acknowledge_match();
        self.pwm.set_config(&self.config);
    }

    fn reset(&mut self) {
        self.pwm.set_counter(0);
    }

    fn enable_match_interrupt(&mut self) {
        acknowledge_match();
        pac::PWM.inte().modify(|w| w.set_ch(COUNTER_SLICE, true));
    }

    fn disable_match_interrupt(&mut self) {
        pac::PWM.inte().modify(|w| w.set_ch(COUNTER_SLICE, false));
        acknowledge_match();
    }
}

/// Check if the counter slice has a pending match
pub fn match_pending() -> bool {
    pac::PWM.ints().read().ch(COUNTER_SLICE)
}

/// Clear the counter slice wrap flag
pub fn acknowledge_match() {
    pac::PWM.intr().write(|w| w.set_ch(COUNTER_SLICE, true));
}
