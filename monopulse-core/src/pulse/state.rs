//! Pulse cycle state machine
//!
//! One cycle runs `Complete → Delay → Width → Complete`. The edge context
//! starts the cycle; every compare match advances it by exactly one step.

/// Pulse cycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PulseState {
    /// Counting the trigger-to-pulse delay, output inactive
    Delay = 0,
    /// Counting the pulse width, output active
    Width = 1,
    /// No cycle in flight
    Complete = 2,
}

/// Hardware action requested by a compare-match step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompareAction {
    /// Reload the compare target with the width and drive the output active
    BeginWidth,
    /// Drive the output inactive, stop the divider and clear the counters
    EndPulse,
    /// Match without a cycle in flight; force the idle condition again
    ForceIdle,
}

impl PulseState {
    /// Decode a stored state byte
    ///
    /// Unknown values decode as `Complete` so a corrupted byte can only ever
    /// stop a cycle, never start one.
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => PulseState::Delay,
            1 => PulseState::Width,
            _ => PulseState::Complete,
        }
    }

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Check if a cycle is in flight
    pub fn is_active(&self) -> bool {
        !matches!(self, PulseState::Complete)
    }

    /// Advance on a compare match
    ///
    /// Returns the next state together with the hardware action the
    /// compare-match context must perform.
    pub fn on_compare_match(self) -> (Self, CompareAction) {
        match self {
            PulseState::Delay => (PulseState::Width, CompareAction::BeginWidth),
            PulseState::Width => (PulseState::Complete, CompareAction::EndPulse),
            PulseState::Complete => (PulseState::Complete, CompareAction::ForceIdle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_order() {
        let (s, a) = PulseState::Delay.on_compare_match();
        assert_eq!(s, PulseState::Width);
        assert_eq!(a, CompareAction::BeginWidth);

        let (s, a) = s.on_compare_match();
        assert_eq!(s, PulseState::Complete);
        assert_eq!(a, CompareAction::EndPulse);
    }

    #[test]
    fn test_spurious_match_stays_complete() {
        let (s, a) = PulseState::Complete.on_compare_match();
        assert_eq!(s, PulseState::Complete);
        assert_eq!(a, CompareAction::ForceIdle);
    }

    #[test]
    fn test_byte_encoding() {
        for state in [PulseState::Delay, PulseState::Width, PulseState::Complete] {
            assert_eq!(PulseState::from_u8(state.as_u8()), state);
        }
        assert_eq!(PulseState::from_u8(0xaa), PulseState::Complete);
    }

    #[test]
    fn test_is_active() {
        assert!(PulseState::Delay.is_active());
        assert!(PulseState::Width.is_active());
        assert!(!PulseState::Complete.is_active());
    }
}
