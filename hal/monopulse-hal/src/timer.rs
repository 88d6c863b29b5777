//! Cascaded pulse timer abstractions
//!
//! The pulse engine uses two hardware timers in cascade:
//!
//! ```text
//!   sys clock ──► DividerTimer ──tick──► CompareTimer ──match IRQ──► engine
//!                 (reload 99/199)        (target = delay or width)
//! ```
//!
//! The divider emits one tick every `reload + 1` base-clock periods
//! (a 1 MHz base gives 0.1 ms or 0.2 ms ticks). The compare timer counts
//! ticks and raises its match interrupt when the loaded target is reached.

/// Divider timer producing the pulse sub-tick
pub trait DividerTimer {
    /// Start emitting ticks, one every `reload + 1` base-clock periods
    fn start(&mut self, reload: u8);

    /// Stop emitting ticks
    fn stop(&mut self);

    /// Reset the divider phase so the next tick is a full period away
    fn reset(&mut self);

    /// Check if the divider is running
    fn is_running(&self) -> bool;
}

/// Compare-match timer counting divider ticks
pub trait CompareTimer {
    /// Load the number of ticks until the next match
    ///
    /// Counting restarts from zero; the match fires after exactly `ticks`
    /// further divider ticks.
    fn load(&mut self, ticks: u16);

    /// Clear the tick count without changing the target
    fn reset(&mut self);

    /// Enable the match interrupt
    fn enable_match_interrupt(&mut self);

    /// Disable the match interrupt
    fn disable_match_interrupt(&mut self);
}
