//! Build script for monopulse-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates pulser.toml at compile time

use std::collections::BTreeMap;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// GPIOs with a fixed function on the board (console UART, tick loop)
const RESERVED_PINS: [u8; 4] = [0, 1, 6, 9];

/// Highest GPIO number on RP2040
const MAX_GPIO: u8 = 29;

const DISPLAY_LINES: [&str; 13] = [
    "seg_a", "seg_b", "seg_c", "seg_d", "seg_e", "seg_f", "seg_g", "seg_dp", "digit0", "digit1",
    "digit2", "digit3", "digit4",
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate pulser.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=pulser.toml");

    let config_path = Path::new("pulser.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: pulser.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds the board wiring from pulser.toml.          ║\n\
            ║  Please create one in the monopulse-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read pulser.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in pulser.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    let mut pins = BTreeMap::new();

    validate_sections(&config, &mut errors);
    validate_serial(&config, &mut errors);
    validate_trigger(&config, &mut errors, &mut pins);
    validate_single_pin(&config, "pulse", "output_pin", &mut errors, &mut pins);
    validate_single_pin(&config, "indicator", "pin", &mut errors, &mut pins);
    validate_display(&config, &mut errors, &mut pins);

    if !errors.is_empty() {
        report("Invalid board configuration", &errors);
    }

    println!("cargo:warning=pulser.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn report(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Only the known sections may appear
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };
    for name in table.keys() {
        if !["serial", "trigger", "pulse", "indicator", "display"].contains(&name.as_str()) {
            errors.push(format!("Unknown section [{}]", name));
        }
    }
}

fn validate_serial(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(serial) = config.get("serial") else {
        return;
    };
    match serial.get("baudrate") {
        Some(toml::Value::Integer(baud)) if *baud <= 0 || *baud > 921_600 => {
            errors.push("[serial] baudrate must be 1-921600".to_string());
        }
        Some(toml::Value::Integer(_)) | None => {}
        Some(_) => errors.push("[serial] baudrate must be an integer".to_string()),
    }
}

fn validate_trigger(
    config: &toml::Value,
    errors: &mut Vec<String>,
    pins: &mut BTreeMap<u8, String>,
) {
    validate_single_pin(config, "trigger", "pin", errors, pins);

    if let Some(value) = config.get("trigger").and_then(|t| t.get("debounce_ms")) {
        match value {
            toml::Value::Integer(ms) if *ms < 0 || *ms > 1000 => {
                errors.push("[trigger] debounce_ms must be 0-1000".to_string());
            }
            toml::Value::Integer(_) => {}
            _ => errors.push("[trigger] debounce_ms must be an integer".to_string()),
        }
    }
}

fn validate_single_pin(
    config: &toml::Value,
    section: &str,
    key: &str,
    errors: &mut Vec<String>,
    pins: &mut BTreeMap<u8, String>,
) {
    if let Some(value) = config.get(section).and_then(|s| s.get(key)) {
        check_pin(value, &format!("[{}] {}", section, key), errors, pins);
    }
}

fn validate_display(
    config: &toml::Value,
    errors: &mut Vec<String>,
    pins: &mut BTreeMap<u8, String>,
) {
    let Some(display) = config.get("display").and_then(|d| d.as_table()) else {
        return;
    };

    for (key, value) in display {
        if key == "refresh_us" {
            match value {
                toml::Value::Integer(us) if *us < 100 || *us > 100_000 => {
                    errors.push("[display] refresh_us must be 100-100000".to_string());
                }
                toml::Value::Integer(_) => {}
                _ => errors.push("[display] refresh_us must be an integer".to_string()),
            }
        } else if DISPLAY_LINES.contains(&key.as_str()) {
            check_pin(value, &format!("[display] {}", key), errors, pins);
        } else {
            errors.push(format!("[display] unknown key '{}'", key));
        }
    }
}

/// Check a `"!^gpioN"` pin string and record its GPIO
fn check_pin(
    value: &toml::Value,
    field: &str,
    errors: &mut Vec<String>,
    pins: &mut BTreeMap<u8, String>,
) {
    let Some(text) = value.as_str() else {
        errors.push(format!("{} must be a pin string", field));
        return;
    };

    let name = text.trim_start_matches(['!', '^']);
    let Some(pin) = name
        .strip_prefix("gpio")
        .and_then(|n| n.parse::<u8>().ok())
        .filter(|n| *n <= MAX_GPIO)
    else {
        errors.push(format!("{} '{}' is not gpio0-gpio{}", field, text, MAX_GPIO));
        return;
    };

    if RESERVED_PINS.contains(&pin) {
        errors.push(format!("{} uses gpio{}, which has a fixed function", field, pin));
    }

    if let Some(owner) = pins.insert(pin, field.to_string()) {
        errors.push(format!("gpio{} assigned to both {} and {}", pin, owner, field));
    }
}
