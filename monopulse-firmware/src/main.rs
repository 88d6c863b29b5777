//! Monopulse - Single Pulse Generator Firmware
//!
//! Main firmware binary for RP2040-based pulse generators. A trigger edge
//! starts a cycle: after a configurable delay the output goes active for a
//! configurable width, then returns idle. The timing runs in hardware on
//! two cascaded PWM slices; a 5-digit multiplexed display and a serial
//! console form the operator interface.
//!
//! Execution contexts, highest priority first:
//!
//! | Context          | Priority | Work                                  |
//! |------------------|----------|---------------------------------------|
//! | `PWM_IRQ_WRAP`   | P0       | compare match, cycle state machine    |
//! | `SWI_IRQ_1`      | P1       | trigger and display refresh tasks     |
//! | `UART0_IRQ`      | P2       | console receive                       |
//! | thread mode      | -        | controller task, watchdog             |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::watchdog::Watchdog;
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use monopulse_core::display::Multiplexer;
use monopulse_core::pulse::PulseChannel;
use monopulse_hal::UartConfig;
use monopulse_hal_rp2040::uart::console;
use monopulse_hal_rp2040::{split, EdgeCounter, PwmDivider};

use crate::board::take_board;
use crate::channels::{CONSOLE_RX, PULSE_HW};
use crate::config::load_config;

mod board;
mod channels;
mod config;
mod irq;
mod tasks;

/// Watchdog period; the main loop feeds it four times per period
const WATCHDOG_TIMEOUT: Duration = Duration::from_secs(1);
const WATCHDOG_FEED: Duration = Duration::from_millis(250);

static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Monopulse firmware starting...");

    let p = embassy_rp::init(Default::default());
    let config = load_config();
    let (mut bank, fixed) = split(p);
    let board = unwrap!(take_board(&mut bank, &config));

    // Pulse timers: PWM3 divides the system clock, PWM4 counts its edges
    // through the GPIO6-GPIO9 jumper
    let divider = PwmDivider::new(fixed.divider_slice, fixed.divider_pin);
    let counter = EdgeCounter::new(fixed.counter_slice, fixed.counter_pin);
    let channel = PulseChannel::new(divider, counter, board.output);
    critical_section::with(|cs| {
        let mut hw = PULSE_HW.borrow_ref_mut(cs);
        let hw = hw.insert(channel);
        hw.compare.enable_interrupt(Priority::P0);
    });
    info!("Pulse timers ready");

    // Console on UART0
    let uart_config = UartConfig {
        baudrate: config.serial.baudrate,
        ..UartConfig::default()
    };
    let (tx, rx) = console(fixed.uart0, fixed.uart_tx, fixed.uart_rx, &uart_config);
    critical_section::with(|cs| {
        let mut slot = CONSOLE_RX.borrow_ref_mut(cs);
        let rx = slot.insert(rx);
        rx.enable_interrupt(Priority::P2);
    });
    info!("Console at {} baud", uart_config.baudrate);

    // Trigger and refresh run above the controller
    interrupt::SWI_IRQ_1.set_priority(Priority::P1);
    let high = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);

    let mux = Multiplexer::new(board.segments, board.digits);
    high.spawn(tasks::refresh_task(mux, config.display.refresh_us))
        .unwrap();
    high.spawn(tasks::trigger_task(board.trigger, config.trigger.debounce_ms))
        .unwrap();
    spawner
        .spawn(tasks::controller_task(tx, board.indicator))
        .unwrap();

    info!("All tasks spawned");

    let mut watchdog = Watchdog::new(fixed.watchdog);
    watchdog.start(WATCHDOG_TIMEOUT);

    loop {
        Timer::after(WATCHDOG_FEED).await;
        watchdog.feed();
        trace!("Watchdog fed");
    }
}
