//! Board configuration
//!
//! Board-agnostic configuration structures, filled from the embedded board
//! file by a small `no_std` parser.

pub mod board;
pub mod parse;

pub use board::*;
pub use parse::{parse_config, ParseError, MAX_GPIO};
