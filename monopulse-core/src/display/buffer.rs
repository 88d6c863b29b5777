//! Shared display buffer
//!
//! Written by the foreground, read by the refresh context. Every slot is a
//! single byte, so the refresh context sees either the old or the new code
//! of a digit, never a mix. A whole-pattern update may be observed one
//! frame late, which is invisible at the refresh rate.

use core::future::poll_fn;
use core::task::Poll;

use embassy_sync::waitqueue::AtomicWaker;
use portable_atomic::{AtomicBool, AtomicU8, Ordering};

use super::segment::{Pattern, DECIMAL_POINT, DIGIT_CODES};

/// Number of digits
pub const DIGITS: usize = 5;

/// Largest value [`Display::play`] accepts, exclusive
pub const PLAY_LIMIT: u32 = 100_000;

/// Display buffer and power flag
pub struct Display {
    slots: [AtomicU8; DIGITS],
    powered: AtomicBool,
    power_changed: AtomicWaker,
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

impl Display {
    /// Blank display, powered off
    pub const fn new() -> Self {
        const BLANK_SLOT: AtomicU8 = AtomicU8::new(0);
        Self {
            slots: [BLANK_SLOT; DIGITS],
            powered: AtomicBool::new(false),
            power_changed: AtomicWaker::new(),
        }
    }

    /// Start refreshing
    pub fn power_on(&self) {
        self.powered.store(true, Ordering::Release);
        self.power_changed.wake();
    }

    /// Stop refreshing; the refresh context releases every line
    pub fn power_off(&self) {
        self.powered.store(false, Ordering::Release);
        self.power_changed.wake();
    }

    pub fn is_powered(&self) -> bool {
        self.powered.load(Ordering::Acquire)
    }

    /// Wait until the display is powered on
    pub async fn wait_powered(&self) {
        poll_fn(|cx| {
            self.power_changed.register(cx.waker());
            if self.is_powered() {
                Poll::Ready(())
            } else {
                Poll::Pending
            }
        })
        .await
    }

    /// Show a value as five zero-padded digits, 0.1 ms resolution
    ///
    /// The decimal point on the leftmost digit is always lit. Values of
    /// [`PLAY_LIMIT`] and above leave the buffer unchanged.
    pub fn play(&self, value: u32) {
        if value >= PLAY_LIMIT {
            return;
        }

        let mut rest = value;
        for (index, slot) in self.slots.iter().enumerate() {
            let mut code = DIGIT_CODES[(rest % 10) as usize];
            if index == DIGITS - 1 {
                code |= DECIMAL_POINT;
            }
            slot.store(code, Ordering::Relaxed);
            rest /= 10;
        }
    }

    /// Set every slot to the same code
    pub fn fill(&self, code: u8) {
        for slot in &self.slots {
            slot.store(code, Ordering::Relaxed);
        }
    }

    /// Set one slot; out-of-range indices are ignored
    pub fn fill_at(&self, code: u8, index: usize) {
        if let Some(slot) = self.slots.get(index) {
            slot.store(code, Ordering::Relaxed);
        }
    }

    /// Show a full pattern
    pub fn show(&self, pattern: &Pattern) {
        for (slot, &code) in self.slots.iter().zip(pattern) {
            slot.store(code, Ordering::Relaxed);
        }
    }

    /// Code of one slot; blank when out of range
    pub fn slot(&self, index: usize) -> u8 {
        self.slots
            .get(index)
            .map(|s| s.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    pub fn snapshot(&self) -> Pattern {
        let mut pattern = [0; DIGITS];
        for (code, slot) in pattern.iter_mut().zip(&self.slots) {
            *code = slot.load(Ordering::Relaxed);
        }
        pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{decode_digit, ALL_SEGMENTS, DASH, DONE};
    use proptest::prelude::*;

    fn decode(pattern: &Pattern) -> u32 {
        pattern
            .iter()
            .rev()
            .fold(0, |acc, &code| acc * 10 + decode_digit(code).unwrap() as u32)
    }

    #[test]
    fn test_play_pads_and_marks_point() {
        let display = Display::new();
        display.play(12);
        assert_eq!(
            display.snapshot(),
            [0x5b, 0x06, 0x3f, 0x3f, 0x3f | DECIMAL_POINT]
        );
    }

    #[test]
    fn test_play_max_value() {
        let display = Display::new();
        display.play(99_999);
        assert_eq!(decode(&display.snapshot()), 99_999);
    }

    #[test]
    fn test_play_out_of_range_is_noop() {
        let display = Display::new();
        display.fill(DASH);
        display.play(100_000);
        assert_eq!(display.snapshot(), [DASH; DIGITS]);
        display.play(u32::MAX);
        assert_eq!(display.snapshot(), [DASH; DIGITS]);
    }

    #[test]
    fn test_fill_at_ignores_bad_index() {
        let display = Display::new();
        display.fill(ALL_SEGMENTS);
        display.fill_at(DASH, 2);
        display.fill_at(DASH, 5);
        assert_eq!(
            display.snapshot(),
            [ALL_SEGMENTS, ALL_SEGMENTS, DASH, ALL_SEGMENTS, ALL_SEGMENTS]
        );
        assert_eq!(display.slot(9), 0);
    }

    #[test]
    fn test_show_pattern() {
        let display = Display::new();
        display.show(&DONE);
        assert_eq!(display.snapshot(), DONE);
    }

    #[test]
    fn test_power_flag() {
        let display = Display::new();
        assert!(!display.is_powered());
        display.power_on();
        assert!(display.is_powered());
        embassy_futures::block_on(display.wait_powered());
        display.power_off();
        assert!(!display.is_powered());
    }

    proptest! {
        #[test]
        fn prop_play_roundtrip(value in 0u32..100_000) {
            let display = Display::new();
            display.play(value);
            let pattern = display.snapshot();
            prop_assert_eq!(decode(&pattern), value);
            prop_assert_eq!(pattern[4] & DECIMAL_POINT, DECIMAL_POINT);
            for code in &pattern[..4] {
                prop_assert_eq!(code & DECIMAL_POINT, 0);
            }
        }
    }
}
