//! Automatic-mode timing table

use super::params::PulseParameters;

/// Number of entries in [`AUTO_TABLE`]
pub const AUTO_TABLE_LEN: usize = 20;

/// Delay/width pairs (0.1 ms units, fine tick) cycled in automatic mode
///
/// The first twelve entries sweep the delay at a fixed 600 ms width, the
/// rest sweep the width at the minimum delay.
pub const AUTO_TABLE: [PulseParameters; AUTO_TABLE_LEN] = [
    PulseParameters::fine(5000, 6000),
    PulseParameters::fine(10000, 6000),
    PulseParameters::fine(15000, 6000),
    PulseParameters::fine(20000, 6000),
    PulseParameters::fine(25000, 6000),
    PulseParameters::fine(30000, 6000),
    PulseParameters::fine(35000, 6000),
    PulseParameters::fine(40000, 6000),
    PulseParameters::fine(45000, 6000),
    PulseParameters::fine(50000, 6000),
    PulseParameters::fine(55000, 6000),
    PulseParameters::fine(60000, 6000),
    PulseParameters::fine(5000, 4000),
    PulseParameters::fine(5000, 5000),
    PulseParameters::fine(5000, 6000),
    PulseParameters::fine(5000, 7000),
    PulseParameters::fine(5000, 8000),
    PulseParameters::fine(5000, 9000),
    PulseParameters::fine(5000, 10000),
    PulseParameters::fine(5000, 11000),
];

/// Index following `index`, wrapping after the last entry
pub const fn next_index(index: u8) -> u8 {
    if index as usize + 1 >= AUTO_TABLE_LEN {
        0
    } else {
        index + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pulse::Prescale;

    #[test]
    fn test_table_uses_fine_tick() {
        assert!(AUTO_TABLE.iter().all(|p| p.prescale == Prescale::Fine));
    }

    #[test]
    fn test_next_index_wraps() {
        assert_eq!(next_index(0), 1);
        assert_eq!(next_index(18), 19);
        assert_eq!(next_index(19), 0);
    }
}
