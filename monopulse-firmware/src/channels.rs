//! Shared state between tasks and interrupt handlers
//!
//! Signals carry the foreground/trigger handshake. The pulse engine, the
//! display buffer and the console ring are lock-free statics; the
//! hardware they drive sits behind critical-section mutexes because both
//! an interrupt handler and a task touch it.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use monopulse_core::display::Display;
use monopulse_core::pulse::{PulseChannel, PulseEngine};
use monopulse_core::serial::{SerialRing, RX_CAPACITY};
use monopulse_hal_rp2040::{ConsoleRx, EdgeCounter, GpioOutput, PwmDivider};

/// Pulse hardware as driven by the engine
pub type PulseHardware = PulseChannel<PwmDivider, EdgeCounter, GpioOutput>;

/// Cycle state machine and parameters
pub static ENGINE: PulseEngine = PulseEngine::new();

/// Segment codes shown by the refresh task
pub static DISPLAY: Display = Display::new();

/// Console bytes received by `UART0_IRQ`
pub static RX_RING: SerialRing<RX_CAPACITY> = SerialRing::new();

/// Pulse timers and output, shared by the trigger task and `PWM_IRQ_WRAP`
pub static PULSE_HW: Mutex<RefCell<Option<PulseHardware>>> = Mutex::new(RefCell::new(None));

/// Console receiver, drained by `UART0_IRQ`
pub static CONSOLE_RX: Mutex<RefCell<Option<ConsoleRx>>> = Mutex::new(RefCell::new(None));

/// Foreground allows the next trigger edge to start a cycle
pub static TRIGGER_ENABLE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Foreground withdraws a pending trigger enable
pub static TRIGGER_CANCEL: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// A trigger edge armed a cycle
pub static PULSE_STARTED: Signal<CriticalSectionRawMutex, ()> = Signal::new();
