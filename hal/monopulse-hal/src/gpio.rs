//! GPIO pin abstractions
//!
//! Provides traits for the digital lines the generator uses: the trigger
//! input, the pulse and indicator outputs, and the display segment/digit
//! lines which must also be able to float.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Toggle the pin state
    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Output line that can be released to high impedance
///
/// Display lines are floated while the display is powered off so that a
/// half-driven digit never ghosts. The output level set while released is
/// retained and appears on the pin once it is driven again.
pub trait TristatePin: OutputPin {
    /// Stop driving the line (high impedance)
    fn release(&mut self);

    /// Drive the line with the last set level
    fn drive(&mut self);

    /// Check if the line is currently driven
    fn is_driven(&self) -> bool;
}
