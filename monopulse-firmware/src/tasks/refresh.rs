//! Display refresh task
//!
//! Redraws one digit per tick. While the display is powered off the lines
//! are released once and the task sleeps until power returns.

use defmt::*;
use embassy_time::{Duration, Ticker};

use monopulse_core::display::Multiplexer;
use monopulse_hal_rp2040::DisplayLine;

use crate::channels::DISPLAY;

#[embassy_executor::task]
pub async fn refresh_task(mut mux: Multiplexer<DisplayLine, DisplayLine>, refresh_us: u32) {
    info!("Refresh task started ({}us per digit)", refresh_us);

    let period = Duration::from_micros(refresh_us as u64);
    let mut ticker = Ticker::every(period);

    loop {
        mux.refresh(&DISPLAY);

        if !DISPLAY.is_powered() {
            trace!("Display off");
            DISPLAY.wait_powered().await;
            ticker.reset();
            continue;
        }

        ticker.next().await;
    }
}
