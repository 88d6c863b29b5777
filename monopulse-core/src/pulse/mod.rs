//! Pulse timing engine
//!
//! A trigger edge arms the engine; a divider timer then produces a fixed
//! sub-tick which a compare-match timer counts. Each compare match advances
//! the cycle:
//!
//! ```text
//!   trigger ──► Delay ──match──► Width ──match──► Complete
//!               output low       output high      output low, divider stopped
//! ```

mod engine;
mod params;
mod state;
mod table;

pub use engine::{PulseChannel, PulseEngine};
pub use params::{
    Mode, Prescale, PulseParameters, FINE_TICK_LIMIT, MAX_DELAY, MAX_WIDTH, MIN_DELAY, MIN_WIDTH,
};
pub use state::{CompareAction, PulseState};
pub use table::{next_index, AUTO_TABLE, AUTO_TABLE_LEN};
