//! Display multiplexer
//!
//! Owned by the refresh context. Each refresh step lights the next digit:
//!
//! ```text
//!   digit[n] off ──► n = (n + 1) % 5 ──► segments = buffer[n] ──► digit[n] on
//! ```
//!
//! Lines are driven in logical levels: `set_high` lights a segment or
//! selects a digit. Active-low wiring is handled by the pin implementation.

use monopulse_hal::TristatePin;

use super::buffer::{Display, DIGITS};

/// Segment lines a-g and the decimal point
pub const SEGMENTS: usize = 8;

/// Refresh-context side of the display
pub struct Multiplexer<S, D> {
    segments: [S; SEGMENTS],
    digits: [D; DIGITS],
    cursor: usize,
    released: bool,
}

impl<S: TristatePin, D: TristatePin> Multiplexer<S, D> {
    /// Take the display lines; they start released
    pub fn new(segments: [S; SEGMENTS], digits: [D; DIGITS]) -> Self {
        let mut mux = Self {
            segments,
            digits,
            cursor: 0,
            released: false,
        };
        mux.release();
        mux
    }

    /// Index of the digit currently lit
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Run one refresh step
    ///
    /// While the display is powered off every line is held at high
    /// impedance and the cursor does not move.
    pub fn refresh(&mut self, display: &Display) {
        if !display.is_powered() {
            if !self.released {
                self.release();
            }
            return;
        }
        if self.released {
            self.drive();
        }

        self.digits[self.cursor].set_low();
        self.cursor = (self.cursor + 1) % DIGITS;

        let code = display.slot(self.cursor);
        for (bit, segment) in self.segments.iter_mut().enumerate() {
            segment.set_state(code & (1 << bit) != 0);
        }

        self.digits[self.cursor].set_high();
    }

    fn release(&mut self) {
        for line in self.digits.iter_mut() {
            line.set_low();
            line.release();
        }
        for line in self.segments.iter_mut() {
            line.set_low();
            line.release();
        }
        self.released = true;
    }

    fn drive(&mut self) {
        for line in self.segments.iter_mut() {
            line.drive();
        }
        for line in self.digits.iter_mut() {
            line.drive();
        }
        self.released = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{DASH, DECIMAL_POINT};
    use monopulse_hal::OutputPin;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Line {
        Segment(usize),
        Digit(usize),
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Op {
        High(Line),
        Low(Line),
        Release(Line),
        Drive(Line),
    }

    type Log = Rc<RefCell<Vec<Op>>>;

    struct MockLine {
        line: Line,
        high: bool,
        driven: bool,
        log: Log,
    }

    impl MockLine {
        fn new(line: Line, log: &Log) -> Self {
            Self {
                line,
                high: false,
                driven: true,
                log: log.clone(),
            }
        }
    }

    impl OutputPin for MockLine {
        fn set_high(&mut self) {
            self.high = true;
            self.log.borrow_mut().push(Op::High(self.line));
        }
        fn set_low(&mut self) {
            self.high = false;
            self.log.borrow_mut().push(Op::Low(self.line));
        }
        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    impl TristatePin for MockLine {
        fn release(&mut self) {
            self.driven = false;
            self.log.borrow_mut().push(Op::Release(self.line));
        }
        fn drive(&mut self) {
            self.driven = true;
            self.log.borrow_mut().push(Op::Drive(self.line));
        }
        fn is_driven(&self) -> bool {
            self.driven
        }
    }

    fn mux(log: &Log) -> Multiplexer<MockLine, MockLine> {
        Multiplexer::new(
            core::array::from_fn(|i| MockLine::new(Line::Segment(i), log)),
            core::array::from_fn(|i| MockLine::new(Line::Digit(i), log)),
        )
    }

    fn lit_digits(m: &Multiplexer<MockLine, MockLine>) -> Vec<usize> {
        m.digits
            .iter()
            .enumerate()
            .filter(|(_, d)| d.high)
            .map(|(i, _)| i)
            .collect()
    }

    fn segment_code(m: &Multiplexer<MockLine, MockLine>) -> u8 {
        m.segments
            .iter()
            .enumerate()
            .fold(0, |acc, (bit, s)| acc | ((s.high as u8) << bit))
    }

    #[test]
    fn test_starts_released() {
        let log = Log::default();
        let m = mux(&log);
        assert!(m.is_released());
        assert!(m.segments.iter().all(|s| !s.driven));
        assert!(m.digits.iter().all(|d| !d.driven));
    }

    #[test]
    fn test_step_order() {
        let log = Log::default();
        let display = Display::new();
        display.play(12345);
        display.power_on();
        let mut m = mux(&log);
        m.refresh(&display);
        log.borrow_mut().clear();

        m.refresh(&display);
        let ops = log.borrow();
        assert_eq!(ops.first(), Some(&Op::Low(Line::Digit(1))));
        assert_eq!(ops.last(), Some(&Op::High(Line::Digit(2))));
        assert_eq!(ops.len(), 1 + SEGMENTS + 1);
        assert!(ops[1..=SEGMENTS]
            .iter()
            .all(|op| matches!(op, Op::High(Line::Segment(_)) | Op::Low(Line::Segment(_)))));
    }

    #[test]
    fn test_cycles_all_digits_one_at_a_time() {
        let log = Log::default();
        let display = Display::new();
        display.play(12345);
        display.power_on();
        let mut m = mux(&log);

        for step in 1..=10 {
            m.refresh(&display);
            let cursor = step % DIGITS;
            assert_eq!(m.cursor(), cursor);
            assert_eq!(lit_digits(&m), [cursor]);
            assert_eq!(segment_code(&m), display.slot(cursor));
        }
    }

    #[test]
    fn test_decimal_point_line() {
        let log = Log::default();
        let display = Display::new();
        display.play(0);
        display.power_on();
        let mut m = mux(&log);
        for _ in 0..4 {
            m.refresh(&display);
        }
        assert_eq!(m.cursor(), 4);
        assert!(m.segments[7].high);
        assert_eq!(segment_code(&m) & DECIMAL_POINT, DECIMAL_POINT);
    }

    #[test]
    fn test_power_off_releases_lines() {
        let log = Log::default();
        let display = Display::new();
        display.fill(DASH);
        display.power_on();
        let mut m = mux(&log);
        m.refresh(&display);
        assert!(!m.is_released());

        display.power_off();
        m.refresh(&display);
        let cursor = m.cursor();
        assert!(m.is_released());
        assert!(m.segments.iter().all(|s| !s.driven && !s.high));
        assert!(m.digits.iter().all(|d| !d.driven && !d.high));

        log.borrow_mut().clear();
        m.refresh(&display);
        assert!(log.borrow().is_empty());
        assert_eq!(m.cursor(), cursor);

        display.power_on();
        m.refresh(&display);
        assert!(!m.is_released());
        assert!(m.digits.iter().all(|d| d.driven));
        assert_eq!(lit_digits(&m), [(cursor + 1) % DIGITS]);
    }
}
