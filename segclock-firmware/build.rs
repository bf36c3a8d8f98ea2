//! Build script for segclock-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates clock.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// GPIO pins owned by the sync UART
const RESERVED_PINS: [i64; 2] = [0, 1];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate clock.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=clock.toml");

    let config_path = Path::new("clock.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: clock.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds clock.toml as its board configuration.      ║\n\
            ║  Please create one in the segclock-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read clock.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in clock.toml                        ║\n\
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
    validate_sections(&config, &mut errors);
    validate_pins(&config, &mut errors);
    validate_ranges(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in clock.toml                      ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=clock.toml validated successfully");
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

/// Only the sections the firmware understands may appear
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        errors.push("top level must be a table".to_string());
        return;
    };

    for (name, value) in table {
        if !["display", "chime", "sync", "face"].contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }

    if config.get("display").is_none() {
        errors.push("Missing [display] section - the chain pins are required".to_string());
    }
}

/// Parse "gpioN" / "!gpioN" into a pin number
fn pin_number(value: &str) -> Option<i64> {
    let s = value.strip_prefix('!').unwrap_or(value);
    let n: i64 = s.strip_prefix("gpio")?.parse().ok()?;
    (0..30).contains(&n).then_some(n)
}

fn validate_pins(config: &toml::Value, errors: &mut Vec<String>) {
    let pin_keys = [
        ("display", "data_pin"),
        ("display", "clock_pin"),
        ("display", "latch_pin"),
        ("chime", "pin"),
    ];

    let mut used: Vec<(i64, String)> = Vec::new();
    for (section, key) in pin_keys {
        let Some(value) = config.get(section).and_then(|s| s.get(key)) else {
            continue;
        };
        let Some(text) = value.as_str() else {
            errors.push(format!("[{}] {} must be a string", section, key));
            continue;
        };
        let Some(pin) = pin_number(text) else {
            errors.push(format!("[{}] {} = '{}' is not gpio0-gpio29", section, key, text));
            continue;
        };
        if RESERVED_PINS.contains(&pin) {
            errors.push(format!("[{}] {} uses gpio{} (sync UART)", section, key, pin));
        }
        if let Some((_, other)) = used.iter().find(|(p, _)| *p == pin) {
            errors.push(format!("[{}] {} gpio{} already used by {}", section, key, pin, other));
        }
        used.push((pin, format!("{}.{}", section, key)));
    }
}

fn validate_ranges(config: &toml::Value, errors: &mut Vec<String>) {
    let ranges: [(&str, &str, i64, i64); 10] = [
        ("display", "bit_delay_us", 0, 1_000),
        ("chime", "pulses", 0, 255),
        ("chime", "on_ms", 0, 65_535),
        ("chime", "off_ms", 0, 65_535),
        ("sync", "baudrate", 1, 4_000_000),
        ("sync", "interval_s", 1, (u32::MAX / 1000) as i64),
        ("sync", "retry_s", 1, (u32::MAX / 1000) as i64),
        ("sync", "timeout_ms", 1, 60_000),
        ("sync", "utc_offset_s", -86_399, 86_399),
        ("face", "refresh_ms", 1, 999),
    ];

    for (section, key, min, max) in ranges {
        let Some(value) = config.get(section).and_then(|s| s.get(key)) else {
            continue;
        };
        match value.as_integer() {
            Some(n) if (min..=max).contains(&n) => {}
            Some(_) => errors.push(format!("[{}] {} must be {}-{}", section, key, min, max)),
            None => errors.push(format!("[{}] {} must be an integer", section, key)),
        }
    }

    if let Some(chime) = config.get("chime") {
        let enabled = chime.get("enabled").and_then(|v| v.as_bool()).unwrap_or(true);
        let pulses = chime.get("pulses").and_then(|v| v.as_integer());
        if enabled && pulses == Some(0) {
            errors.push("[chime] pulses must be at least 1 when enabled".to_string());
        }
    }

    for (section, key) in [
        ("chime", "enabled"),
        ("chime", "on_boot"),
        ("face", "separator_dots"),
    ] {
        if let Some(value) = config.get(section).and_then(|s| s.get(key)) {
            if !value.is_bool() {
                errors.push(format!("[{}] {} must be true or false", section, key));
            }
        }
    }
}
