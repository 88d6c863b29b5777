//! Seven-segment codes
//!
//! Bit layout of a segment code:
//!
//! ```text
//!    bit:  7   6   5   4   3   2   1   0
//!    seg:  dp  g   f   e   d   c   b   a
//! ```

/// Codes for the decimal digits 0-9
pub const DIGIT_CODES: [u8; 10] = [0x3f, 0x06, 0x5b, 0x4f, 0x66, 0x6d, 0x7d, 0x07, 0x7f, 0x6f];

pub const DECIMAL_POINT: u8 = 0x80;
pub const DASH: u8 = 0x40;
pub const ALL_SEGMENTS: u8 = 0xff;
pub const BLANK: u8 = 0x00;

const LETTER_A: u8 = 0x77;
const LETTER_D: u8 = 0x5e;
const LETTER_E: u8 = 0x79;
const LETTER_H: u8 = 0x76;
const LETTER_N: u8 = 0x54;
const LETTER_O: u8 = 0x5c;
const LETTER_T: u8 = 0x78;
const LETTER_U: u8 = 0x3e;

/// A full display pattern, index 0 = rightmost digit
pub type Pattern = [u8; 5];

/// "AUto", shown while automatic mode waits for a trigger
pub const AUTO: Pattern = [LETTER_O, LETTER_T, LETTER_U, LETTER_A, BLANK];

/// "HAnd", shown while manual mode waits for a trigger
pub const HAND: Pattern = [LETTER_D, LETTER_N, LETTER_A, LETTER_H, BLANK];

/// "donE", shown after a cycle completes
pub const DONE: Pattern = [LETTER_E, LETTER_N, LETTER_O, LETTER_D, BLANK];

/// Segment code for a decimal digit; `None` above 9
pub fn encode_digit(digit: u8) -> Option<u8> {
    DIGIT_CODES.get(digit as usize).copied()
}

/// Digit shown by a segment code, ignoring the decimal point
pub fn decode_digit(code: u8) -> Option<u8> {
    let code = code & !DECIMAL_POINT;
    DIGIT_CODES
        .iter()
        .position(|&c| c == code)
        .map(|d| d as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_codes_roundtrip() {
        for d in 0..10 {
            let code = encode_digit(d).unwrap();
            assert_eq!(decode_digit(code), Some(d));
            assert_eq!(decode_digit(code | DECIMAL_POINT), Some(d));
        }
        assert_eq!(encode_digit(10), None);
    }

    #[test]
    fn test_non_digit_codes() {
        assert_eq!(decode_digit(DASH), None);
        assert_eq!(decode_digit(BLANK), None);
        assert_eq!(decode_digit(LETTER_A), None);
    }

    #[test]
    fn test_codes_are_unique() {
        for (i, a) in DIGIT_CODES.iter().enumerate() {
            for b in &DIGIT_CODES[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
