//! Operator controller task
//!
//! Owns the console dialogue and sequences cycles:
//!
//! 1. Display self-test, then the mode menu (`A` automatic, `M` manual)
//! 2. Manual mode reads delay and width in 0.1 ms units
//! 3. The mode word is shown, the trigger is enabled, and the display
//!    alternates delay and width until a trigger edge arrives
//! 4. Dashes while the cycle runs, `donE` once it completes
//!
//! Automatic mode steps through the built-in table on every cycle; manual
//! mode repeats the entered values. Any key while waiting for a trigger
//! returns to the menu.

use core::fmt::Write;

use defmt::{debug, info, warn};
use embassy_futures::select::{select3, Either3};
use embassy_time::{Duration, Ticker, Timer};

use monopulse_core::command::{parse_mode_key, LineEditor, LineEvent, ERASE_SEQUENCE};
use monopulse_core::display::{ALL_SEGMENTS, AUTO, DASH, DONE, HAND};
use monopulse_core::pulse::{Mode, PulseParameters, MAX_DELAY, MAX_WIDTH, MIN_DELAY, MIN_WIDTH};
use monopulse_core::serial::Console;
use monopulse_hal::OutputPin;
use monopulse_hal_rp2040::{ConsoleTx, GpioOutput};

use crate::channels::{DISPLAY, ENGINE, PULSE_STARTED, RX_RING, TRIGGER_CANCEL, TRIGGER_ENABLE};

/// Delay/width alternation while waiting for a trigger
const ALTERNATE_PERIOD: Duration = Duration::from_millis(500);

/// How long status words stay on the display
const STATUS_HOLD: Duration = Duration::from_secs(1);

const SELF_TEST_FLASHES: usize = 3;

/// Test value shown after the flashes, exercises every digit and the point
const SELF_TEST_VALUE: u32 = 12_345;

type Operator = Console<ConsoleTx>;

enum TriggerWait {
    Started,
    Cancelled,
}

#[embassy_executor::task]
pub async fn controller_task(tx: ConsoleTx, mut indicator: GpioOutput) {
    info!("Controller task started");

    let mut console = Console::new(tx);

    self_test(&mut indicator).await;
    let _ = writeln!(
        console,
        "\nMonopulse single pulse generator\nDelay {}-{}, width {}-{} (0.1 ms)",
        MIN_DELAY, MAX_DELAY, MIN_WIDTH, MAX_WIDTH
    );

    loop {
        let mode = select_mode(&mut console).await;
        ENGINE.set_mode(mode);
        info!("Mode {}", mode);

        if mode == Mode::Manual {
            let delay = read_value(&mut console, "Delay").await;
            let width = read_value(&mut console, "Width").await;
            let width = u16::try_from(width).unwrap_or(u16::MAX);
            if !ENGINE.set_parameters_manual(delay, width) {
                warn!("Parameters not stored, cycle in flight");
            }
            report(&mut console, "Set", ENGINE.parameters());
        }

        run_cycles(&mut console, &mut indicator, mode).await;
    }
}

/// Flash all segments, then show a test value
async fn self_test(indicator: &mut GpioOutput) {
    DISPLAY.fill(ALL_SEGMENTS);
    for _ in 0..SELF_TEST_FLASHES {
        DISPLAY.power_on();
        indicator.set_high();
        Timer::after(STATUS_HOLD).await;
        DISPLAY.power_off();
        indicator.set_low();
        Timer::after(STATUS_HOLD).await;
    }

    DISPLAY.play(SELF_TEST_VALUE);
    DISPLAY.power_on();
    indicator.set_high();
    Timer::after(STATUS_HOLD).await;
    debug!("Self-test done");
}

async fn select_mode(console: &mut Operator) -> Mode {
    DISPLAY.fill(DASH);
    console.write_bytes(b"\nA: automatic table, M: manual entry\nMode? ");

    loop {
        let key = RX_RING.read_byte_async().await;
        if let Some(mode) = parse_mode_key(key) {
            console.write_bytes(&[key, b'\n']);
            return mode;
        }
    }
}

/// Read one decimal entry, mirroring it on the display as it is typed
async fn read_value(console: &mut Operator, label: &str) -> u32 {
    let _ = write!(console, "{} (0.1 ms): ", label);
    DISPLAY.play(0);

    let mut editor = LineEditor::new();
    loop {
        let byte = RX_RING.read_byte_async().await;
        match editor.feed(byte) {
            LineEvent::Echo(b) => console.write_bytes(&[b]),
            LineEvent::Erase => console.write_bytes(ERASE_SEQUENCE),
            LineEvent::Submit => {
                if let Some(value) = editor.value() {
                    console.write_bytes(b"\n");
                    return value;
                }
                continue;
            }
            LineEvent::Ignored => continue,
        }
        DISPLAY.play(editor.value().unwrap_or(0));
    }
}

/// Repeat cycles until the operator presses a key while armed
async fn run_cycles(console: &mut Operator, indicator: &mut GpioOutput, mode: Mode) {
    loop {
        if mode == Mode::Auto {
            ENGINE.set_parameters_auto();
        }
        let params = ENGINE.parameters();
        report(console, "Armed", params);

        DISPLAY.show(match mode {
            Mode::Auto => &AUTO,
            Mode::Manual => &HAND,
        });
        Timer::after(STATUS_HOLD).await;

        RX_RING.flush();
        PULSE_STARTED.reset();
        TRIGGER_CANCEL.reset();
        TRIGGER_ENABLE.signal(());

        if let TriggerWait::Cancelled = wait_for_trigger(indicator).await {
            TRIGGER_CANCEL.signal(());
            ENGINE.wait_complete().await;
            indicator.set_low();
            console.write_bytes(b"Stopped\n");
            return;
        }

        DISPLAY.fill(DASH);
        indicator.set_high();
        ENGINE.wait_complete().await;

        DISPLAY.show(&DONE);
        indicator.set_low();
        info!("Cycle complete: delay {} width {}", params.delay(), params.width());
        report(console, "Done", params);
        Timer::after(STATUS_HOLD).await;
    }
}

/// Alternate delay and width on the display until a trigger or a key
async fn wait_for_trigger(indicator: &mut GpioOutput) -> TriggerWait {
    let mut ticker = Ticker::every(ALTERNATE_PERIOD);
    let mut show_width = false;

    loop {
        DISPLAY.play(if show_width { ENGINE.width() } else { ENGINE.delay() });
        indicator.toggle();

        match select3(PULSE_STARTED.wait(), RX_RING.read_byte_async(), ticker.next()).await {
            Either3::First(()) => return TriggerWait::Started,
            Either3::Second(_) => return TriggerWait::Cancelled,
            Either3::Third(()) => show_width = !show_width,
        }
    }
}

fn report(console: &mut Operator, label: &str, params: PulseParameters) {
    let delay = params.delay();
    let width = params.width();
    let _ = writeln!(
        console,
        "{}: delay {}.{} ms, width {}.{} ms, {} us tick",
        label,
        delay / 10,
        delay % 10,
        width / 10,
        width % 10,
        params.prescale.tick_us()
    );
}
