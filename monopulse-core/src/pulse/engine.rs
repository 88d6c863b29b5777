//! Pulse timing engine
//!
//! The engine is shared between three contexts:
//!
//! | Context        | Writes                           | Reads              |
//! |----------------|----------------------------------|--------------------|
//! | foreground     | parameters, mode, table cursor   | state, busy        |
//! | trigger edge   | state, busy (set)                | parameters         |
//! | compare match  | state, busy (clear)              | parameters         |
//!
//! Parameters are only written inside a critical section and never while a
//! cycle is in flight, so both interrupt contexts always see a consistent
//! delay/width/prescale triple.

use core::cell::Cell;
use core::future::poll_fn;
use core::task::Poll;

use critical_section::Mutex;
use embassy_sync::waitqueue::AtomicWaker;
use monopulse_hal::{CompareTimer, DividerTimer, OutputPin};
use portable_atomic::{AtomicBool, AtomicU8, Ordering};

use super::params::{Mode, PulseParameters};
use super::state::{CompareAction, PulseState};
use super::table::{next_index, AUTO_TABLE, AUTO_TABLE_LEN};

/// Hardware driven by one pulse cycle
pub struct PulseChannel<D, C, P> {
    /// Divider producing the tick
    pub divider: D,
    /// Compare counter consuming ticks
    pub compare: C,
    /// Pulse output, active high
    pub output: P,
}

impl<D, C, P> PulseChannel<D, C, P>
where
    D: DividerTimer,
    C: CompareTimer,
    P: OutputPin,
{
    /// Take ownership of the hardware and put it in the idle condition
    pub fn new(divider: D, compare: C, output: P) -> Self {
        let mut channel = Self {
            divider,
            compare,
            output,
        };
        channel.idle();
        channel
    }

    fn idle(&mut self) {
        self.output.set_low();
        self.divider.stop();
        self.divider.reset();
        self.compare.disable_match_interrupt();
        self.compare.reset();
    }
}

/// Shared pulse state and parameters
pub struct PulseEngine {
    state: AtomicU8,
    busy: AtomicBool,
    mode: AtomicU8,
    table_index: AtomicU8,
    params: Mutex<Cell<PulseParameters>>,
    complete: AtomicWaker,
}

impl Default for PulseEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PulseEngine {
    /// Power-on engine: automatic mode, no cycle in flight, 500 ms/500 ms
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(PulseState::Complete.as_u8()),
            busy: AtomicBool::new(false),
            mode: AtomicU8::new(Mode::Auto.flag()),
            table_index: AtomicU8::new(0),
            params: Mutex::new(Cell::new(PulseParameters::fine(5000, 5000))),
            complete: AtomicWaker::new(),
        }
    }

    /// Start a cycle on a trigger edge
    ///
    /// Ignored (returns `false`) while a cycle is in flight. Otherwise the
    /// output is forced inactive, the counters are cleared, the compare
    /// target is loaded with the delay and the divider starts.
    pub fn arm<D, C, P>(&self, channel: &mut PulseChannel<D, C, P>) -> bool
    where
        D: DividerTimer,
        C: CompareTimer,
        P: OutputPin,
    {
        let params = critical_section::with(|cs| {
            if self.busy.load(Ordering::Acquire) {
                return None;
            }
            self.busy.store(true, Ordering::Release);
            Some(self.params.borrow(cs).get())
        });

        let Some(params) = params else {
            return false;
        };

        channel.idle();
        channel.compare.load(params.delay_ticks);
        self.state.store(PulseState::Delay.as_u8(), Ordering::Release);
        channel.compare.enable_match_interrupt();
        channel.divider.start(params.prescale.reload());
        true
    }

    /// Advance the cycle on a compare match
    ///
    /// Returns the state after the step.
    pub fn on_compare_match<D, C, P>(&self, channel: &mut PulseChannel<D, C, P>) -> PulseState
    where
        D: DividerTimer,
        C: CompareTimer,
        P: OutputPin,
    {
        let (next, action) = self.state().on_compare_match();

        match action {
            CompareAction::BeginWidth => {
                let width = critical_section::with(|cs| self.params.borrow(cs).get().width_ticks);
                self.state.store(next.as_u8(), Ordering::Release);
                channel.compare.load(width);
                channel.output.set_high();
            }
            CompareAction::EndPulse | CompareAction::ForceIdle => {
                channel.idle();
                self.state.store(next.as_u8(), Ordering::Release);
                self.busy.store(false, Ordering::Release);
                self.complete.wake();
            }
        }

        next
    }

    /// Store operator parameters (0.1 ms units), clamped
    ///
    /// Only effective in manual mode and while no cycle is in flight.
    /// Returns whether the parameters were stored.
    pub fn set_parameters_manual(&self, delay: u32, width: u16) -> bool {
        if self.mode() != Mode::Manual {
            return false;
        }
        let params = PulseParameters::manual(delay, width);
        critical_section::with(|cs| {
            if self.is_busy() {
                return false;
            }
            self.params.borrow(cs).set(params);
            true
        })
    }

    /// Load the next automatic-mode table entry
    ///
    /// Only effective in automatic mode and while no cycle is in flight.
    /// Returns whether an entry was loaded.
    pub fn set_parameters_auto(&self) -> bool {
        if self.mode() != Mode::Auto {
            return false;
        }
        critical_section::with(|cs| {
            if self.is_busy() {
                return false;
            }
            let index = self.table_index.load(Ordering::Relaxed) as usize % AUTO_TABLE_LEN;
            self.params.borrow(cs).set(AUTO_TABLE[index]);
            self.table_index.store(next_index(index as u8), Ordering::Relaxed);
            true
        })
    }

    /// Snapshot of the stored parameters
    pub fn parameters(&self) -> PulseParameters {
        critical_section::with(|cs| self.params.borrow(cs).get())
    }

    /// Configured delay in 0.1 ms units
    pub fn delay(&self) -> u32 {
        self.parameters().delay()
    }

    /// Configured width in 0.1 ms units
    pub fn width(&self) -> u32 {
        self.parameters().width()
    }

    pub fn state(&self) -> PulseState {
        PulseState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Check if a cycle is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn set_mode(&self, mode: Mode) {
        self.mode.store(mode.flag(), Ordering::Release);
    }

    pub fn mode(&self) -> Mode {
        Mode::from_flag(self.mode.load(Ordering::Acquire))
    }

    /// Index of the table entry the next automatic cycle will use
    pub fn table_index(&self) -> usize {
        self.table_index.load(Ordering::Relaxed) as usize
    }

    /// Wait until no cycle is in flight
    pub async fn wait_complete(&self) {
        poll_fn(|cx| {
            self.complete.register(cx.waker());
            if self.is_busy() {
                Poll::Pending
            } else {
                Poll::Ready(())
            }
        })
        .await
    }

    /// Spin until no cycle is in flight
    pub fn wait_complete_blocking(&self) {
        while self.is_busy() {
            core::hint::spin_loop();
        }
    }
}
