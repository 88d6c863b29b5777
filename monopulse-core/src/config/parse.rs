//! Board configuration parser
//!
//! Minimal line-based parser for the subset of TOML the board file uses.
//!
//! Supported features:
//! - `[section]` headers
//! - `key = value` pairs (integer or quoted string)
//! - Comments (`# ...`), full-line or trailing
//! - Pin strings like `"gpio11"`, `"!gpio12"` (active low), `"^gpio4"`
//!   (pull-up); modifiers may be combined
//!
//! Keys that are not set keep their default value.

use super::board::{PinConfig, PulserConfig};

/// Highest GPIO number of the RP2040
pub const MAX_GPIO: u8 = 29;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
    /// Key not valid in its section
    UnknownKey,
    /// Line is neither a header nor a key/value pair
    MissingValue,
    /// Same GPIO assigned twice
    DuplicatePin(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Serial,
    Trigger,
    Pulse,
    Indicator,
    Display,
}

/// Parse a board file on top of the default configuration
pub fn parse_config(input: &str) -> Result<PulserConfig, ParseError> {
    let mut config = PulserConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::MissingValue)?;
        apply_value(&mut config, section, key, value)?;
    }

    if let Some(pin) = config.duplicate_pin() {
        return Err(ParseError::DuplicatePin(pin));
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "serial" => Ok(Section::Serial),
        "trigger" => Ok(Section::Trigger),
        "pulse" => Ok(Section::Pulse),
        "indicator" => Ok(Section::Indicator),
        "display" => Ok(Section::Display),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_value(
    config: &mut PulserConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Serial, "baudrate") => config.serial.baudrate = parse_int(value)?,
        (Section::Trigger, "pin") => config.trigger.pin = parse_pin(value)?,
        (Section::Trigger, "debounce_ms") => config.trigger.debounce_ms = parse_int(value)?,
        (Section::Pulse, "output_pin") => config.pulse.output_pin = parse_pin(value)?,
        (Section::Indicator, "pin") => config.indicator.pin = parse_pin(value)?,
        (Section::Display, "refresh_us") => config.display.refresh_us = parse_int(value)?,
        (Section::Display, key) => {
            let slot = display_line(config, key).ok_or(ParseError::UnknownKey)?;
            *slot = parse_pin(value)?;
        }
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Map `seg_a..seg_g`, `seg_dp` and `digit0..digit4` to their slot
fn display_line<'a>(config: &'a mut PulserConfig, key: &str) -> Option<&'a mut PinConfig> {
    let display = &mut config.display;
    if let Some(segment) = key.strip_prefix("seg_") {
        let index = match segment {
            "a" => 0,
            "b" => 1,
            "c" => 2,
            "d" => 3,
            "e" => 4,
            "f" => 5,
            "g" => 6,
            "dp" => 7,
            _ => return None,
        };
        return display.segments.get_mut(index);
    }
    let index: usize = key.strip_prefix("digit")?.parse().ok()?;
    display.digits.get_mut(index)
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Parse an integer value, `_` separators allowed
fn parse_int(value: &str) -> Result<u32, ParseError> {
    let mut result: u32 = 0;
    let mut digits = 0;
    for c in value.chars() {
        match c {
            '_' if digits > 0 => continue,
            '0'..='9' => {
                result = result
                    .checked_mul(10)
                    .and_then(|r| r.checked_add(c as u32 - '0' as u32))
                    .ok_or(ParseError::InvalidValue)?;
                digits += 1;
            }
            _ => return Err(ParseError::InvalidValue),
        }
    }
    if digits == 0 {
        return Err(ParseError::InvalidValue);
    }
    Ok(result)
}

/// Parse a pin string like "gpio11", "!gpio12", "^gpio4"
fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let mut s = parse_string(value);
    let mut inverted = false;
    let mut pull_up = false;

    // Check for modifiers
    loop {
        if let Some(rest) = s.strip_prefix('!') {
            inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let number = s.strip_prefix("gpio").ok_or(ParseError::InvalidPin)?;
    let pin: u8 = number.parse().map_err(|_| ParseError::InvalidPin)?;
    if pin > MAX_GPIO {
        return Err(ParseError::InvalidPin);
    }

    Ok(PinConfig {
        pin,
        inverted,
        pull_up,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOARD: &str = r#"
# Reference board
[serial]
baudrate = 57_600

[trigger]
pin = "!^gpio4"     # falling edge, pulled up
debounce_ms = 30

[pulse]
output_pin = "gpio5"

[indicator]
pin = "gpio25"

[display]
refresh_us = 1500
seg_a = "gpio10"
seg_dp = "gpio17"
digit0 = "!gpio18"
digit4 = "!gpio22"
"#;

    #[test]
    fn test_parse_board() {
        let config = parse_config(BOARD).unwrap();
        assert_eq!(config.serial.baudrate, 57600);
        assert_eq!(
            config.trigger.pin,
            PinConfig {
                pin: 4,
                inverted: true,
                pull_up: true
            }
        );
        assert_eq!(config.trigger.debounce_ms, 30);
        assert_eq!(config.pulse.output_pin, PinConfig::new(5));
        assert_eq!(config.display.refresh_us, 1500);
        assert_eq!(config.display.segments[7], PinConfig::new(17));
        assert_eq!(config.display.digits[4], PinConfig::inverted(22));
    }

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(parse_config("").unwrap(), PulserConfig::default());
        assert_eq!(
            parse_config("# nothing\n\n").unwrap(),
            PulserConfig::default()
        );
    }

    #[test]
    fn test_unknown_section() {
        assert_eq!(
            parse_config("[stepper]\n"),
            Err(ParseError::InvalidSection)
        );
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(
            parse_config("[pulse]\nwidth = 4\n"),
            Err(ParseError::UnknownKey)
        );
        assert_eq!(
            parse_config("[display]\nseg_x = \"gpio3\"\n"),
            Err(ParseError::UnknownKey)
        );
        assert_eq!(
            parse_config("[display]\ndigit5 = \"gpio3\"\n"),
            Err(ParseError::UnknownKey)
        );
        assert_eq!(parse_config("baudrate = 9600\n"), Err(ParseError::UnknownKey));
    }

    #[test]
    fn test_bad_values() {
        assert_eq!(
            parse_config("[serial]\nbaudrate = fast\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[serial]\nbaudrate = 99999999999\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[serial]\nbaudrate\n"),
            Err(ParseError::MissingValue)
        );
    }

    #[test]
    fn test_bad_pins() {
        assert_eq!(
            parse_config("[pulse]\noutput_pin = \"pin5\"\n"),
            Err(ParseError::InvalidPin)
        );
        assert_eq!(
            parse_config("[pulse]\noutput_pin = \"gpio30\"\n"),
            Err(ParseError::InvalidPin)
        );
    }

    #[test]
    fn test_duplicate_pin() {
        assert_eq!(
            parse_config("[indicator]\npin = \"gpio2\"\n"),
            Err(ParseError::DuplicatePin(2))
        );
    }

    #[test]
    fn test_hash_inside_string_kept() {
        assert_eq!(parse_key_value("a = \"x#y\""), Some(("a", "\"x#y\"")));
        assert_eq!(parse_key_value("a = 1 # one"), Some(("a", "1")));
    }
}
