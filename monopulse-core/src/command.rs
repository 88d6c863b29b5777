//! Operator console input
//!
//! The console takes single-key menu choices and short decimal entries.
//! Entries are edited in place with echo and backspace and parsed with
//! [`parse_decimal`].

use heapless::Vec;

use crate::pulse::Mode;

/// Most digits accepted in one numeric entry
pub const MAX_DIGITS: usize = 5;

const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7f;

/// Parse up to [`MAX_DIGITS`] leading ASCII digits
///
/// Leading spaces are skipped; parsing stops at the first non-digit.
/// Returns `None` when no digit is present.
pub fn parse_decimal(input: &[u8]) -> Option<u32> {
    let start = input.iter().position(|&b| b != b' ')?;
    let digits = input[start..]
        .iter()
        .take(MAX_DIGITS)
        .take_while(|b| b.is_ascii_digit());

    let mut value = 0u32;
    let mut count = 0;
    for &b in digits {
        value = value * 10 + (b - b'0') as u32;
        count += 1;
    }

    (count > 0).then_some(value)
}

/// Menu key to mode
pub fn parse_mode_key(key: u8) -> Option<Mode> {
    match key.to_ascii_uppercase() {
        b'A' => Some(Mode::Auto),
        b'M' => Some(Mode::Manual),
        _ => None,
    }
}

/// Result of feeding one byte to a [`LineEditor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineEvent {
    /// Byte accepted; echo it
    Echo(u8),
    /// Last byte removed; erase it on the terminal
    Erase,
    /// Line finished
    Submit,
    /// Byte rejected
    Ignored,
}

/// Single-line numeric entry
#[derive(Debug, Default)]
pub struct LineEditor {
    line: Vec<u8, MAX_DIGITS>,
}

impl LineEditor {
    pub const fn new() -> Self {
        Self { line: Vec::new() }
    }

    pub fn feed(&mut self, byte: u8) -> LineEvent {
        match byte {
            b'\r' | b'\n' => LineEvent::Submit,
            BACKSPACE | DELETE => match self.line.pop() {
                Some(_) => LineEvent::Erase,
                None => LineEvent::Ignored,
            },
            b'0'..=b'9' => match self.line.push(byte) {
                Ok(()) => LineEvent::Echo(byte),
                Err(_) => LineEvent::Ignored,
            },
            _ => LineEvent::Ignored,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.line
    }

    /// Parsed value of the current line
    pub fn value(&self) -> Option<u32> {
        parse_decimal(&self.line)
    }

    pub fn clear(&mut self) {
        self.line.clear();
    }
}

/// Terminal sequence erasing the character left of the cursor
pub const ERASE_SEQUENCE: &[u8] = b"\x08 \x08";

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal(b"12000"), Some(12000));
        assert_eq!(parse_decimal(b"  42\r"), Some(42));
        assert_eq!(parse_decimal(b"7x9"), Some(7));
        assert_eq!(parse_decimal(b"0"), Some(0));
    }

    #[test]
    fn test_parse_decimal_limits_digits() {
        assert_eq!(parse_decimal(b"1234567"), Some(12345));
    }

    #[test]
    fn test_parse_decimal_no_digits() {
        assert_eq!(parse_decimal(b""), None);
        assert_eq!(parse_decimal(b"   "), None);
        assert_eq!(parse_decimal(b"abc"), None);
    }

    #[test]
    fn test_mode_keys() {
        assert_eq!(parse_mode_key(b'a'), Some(Mode::Auto));
        assert_eq!(parse_mode_key(b'M'), Some(Mode::Manual));
        assert_eq!(parse_mode_key(b'x'), None);
    }

    #[test]
    fn test_line_editing() {
        let mut editor = LineEditor::new();
        assert_eq!(editor.feed(b'1'), LineEvent::Echo(b'1'));
        assert_eq!(editor.feed(b'q'), LineEvent::Ignored);
        assert_eq!(editor.feed(b'9'), LineEvent::Echo(b'9'));
        assert_eq!(editor.feed(BACKSPACE), LineEvent::Erase);
        assert_eq!(editor.feed(b'2'), LineEvent::Echo(b'2'));
        assert_eq!(editor.feed(b'\r'), LineEvent::Submit);
        assert_eq!(editor.value(), Some(12));

        editor.clear();
        assert_eq!(editor.feed(DELETE), LineEvent::Ignored);
        assert_eq!(editor.value(), None);
    }

    #[test]
    fn test_line_full() {
        let mut editor = LineEditor::new();
        for b in b"99999" {
            assert_eq!(editor.feed(*b), LineEvent::Echo(*b));
        }
        assert_eq!(editor.feed(b'1'), LineEvent::Ignored);
        assert_eq!(editor.as_bytes(), b"99999");
        assert_eq!(editor.value(), Some(99999));
    }

    proptest! {
        #[test]
        fn prop_parse_matches_std(value in 0u32..100_000) {
            let mut buf = heapless::String::<8>::new();
            core::fmt::write(&mut buf, format_args!("{}", value)).unwrap();
            prop_assert_eq!(parse_decimal(buf.as_bytes()), Some(value));
        }
    }
}
