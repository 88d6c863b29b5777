//! Five-digit multiplexed seven-segment display
//!
//! [`Display`] is the shared buffer written by the foreground;
//! [`Multiplexer`] owns the segment and digit lines and redraws one digit
//! per refresh step.

mod buffer;
mod multiplexer;
mod segment;

pub use buffer::{Display, DIGITS, PLAY_LIMIT};
pub use multiplexer::{Multiplexer, SEGMENTS};
pub use segment::{
    decode_digit, encode_digit, Pattern, ALL_SEGMENTS, AUTO, BLANK, DASH, DECIMAL_POINT,
    DIGIT_CODES, DONE, HAND,
};
