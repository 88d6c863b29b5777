//! Trigger task
//!
//! Each enable from the controller allows exactly one trigger edge to arm
//! a cycle. The line must first stay idle for the debounce time, so a
//! trigger still held from the last cycle does not re-fire.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Timer};

use monopulse_hal::InputPin;
use monopulse_hal_rp2040::GpioInput;

use crate::channels::{ENGINE, PULSE_HW, PULSE_STARTED, TRIGGER_CANCEL, TRIGGER_ENABLE};

#[embassy_executor::task]
pub async fn trigger_task(mut trigger: GpioInput, debounce_ms: u32) {
    info!("Trigger task started");

    let debounce = Duration::from_millis(debounce_ms as u64);

    loop {
        TRIGGER_ENABLE.wait().await;

        let edge = async {
            wait_idle(&trigger, debounce).await;
            trigger.wait_for_active_edge().await;
        };

        match select(edge, TRIGGER_CANCEL.wait()).await {
            Either::First(()) => {
                if arm() {
                    debug!("Cycle armed");
                    PULSE_STARTED.signal(());
                } else {
                    warn!("Trigger ignored, cycle in flight");
                }
            }
            Either::Second(()) => debug!("Trigger enable withdrawn"),
        }
    }
}

/// Wait until the line has been inactive for a full debounce period
async fn wait_idle(trigger: &GpioInput, debounce: Duration) {
    loop {
        while trigger.is_high() {
            Timer::after(debounce).await;
        }
        Timer::after(debounce).await;
        if trigger.is_low() {
            return;
        }
    }
}

fn arm() -> bool {
    critical_section::with(|cs| match PULSE_HW.borrow_ref_mut(cs).as_mut() {
        Some(hw) => ENGINE.arm(hw),
        None => false,
    })
}
