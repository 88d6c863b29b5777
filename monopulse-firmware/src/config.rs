//! Board configuration loading
//!
//! The board file is compiled into the image. build.rs has already
//! validated it, so the fallbacks here only guard against a parser and
//! build script that disagree.

use defmt::*;

use monopulse_core::config::{parse_config, PulserConfig};
use monopulse_hal_rp2040::pins::is_reserved;

/// Embedded board file
/// Edit pulser.toml and rebuild to rewire the board
const EMBEDDED_CONFIG: &str = include_str!("../pulser.toml");

/// Parse the embedded board file, falling back to the reference wiring
pub fn load_config() -> PulserConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded board configuration from pulser.toml");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            warn!("Using default board configuration");
            return PulserConfig::default();
        }
    };

    if let Some(pin) = config.pins().find(|p| is_reserved(p.pin)) {
        error!("GPIO{} has a fixed function on this board", pin.pin);
        warn!("Using default board configuration");
        return PulserConfig::default();
    }

    config
}
