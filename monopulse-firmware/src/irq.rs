//! Interrupt handlers
//!
//! `PWM_IRQ_WRAP` advances the pulse cycle on every compare match and
//! `UART0_IRQ` moves received console bytes into the ring. Both run to
//! completion inside a critical section.

use embassy_rp::interrupt;

use monopulse_hal::SerialRx;
use monopulse_hal_rp2040::timer::{acknowledge_match, match_pending};

use crate::channels::{CONSOLE_RX, ENGINE, PULSE_HW, RX_RING};

#[interrupt]
fn PWM_IRQ_WRAP() {
    if !match_pending() {
        return;
    }
    acknowledge_match();

    critical_section::with(|cs| {
        if let Some(hw) = PULSE_HW.borrow_ref_mut(cs).as_mut() {
            ENGINE.on_compare_match(hw);
        }
    });
}

#[interrupt]
fn UART0_IRQ() {
    critical_section::with(|cs| {
        if let Some(rx) = CONSOLE_RX.borrow_ref_mut(cs).as_mut() {
            // Reading the data register clears the request
            while let Some(byte) = rx.take_byte() {
                RX_RING.push(byte);
            }
        }
    });
}
