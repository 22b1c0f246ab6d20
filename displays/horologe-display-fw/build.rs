//! Build script for horologe-display-fw
//!
//! - Passes the cortex-m-rt and defmt linker scripts
//! - Validates clock.toml and generates the `CONFIG` constant from it

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

fn main() {
    setup_linker();
    generate_config();
}

/// Linker arguments for the firmware binary
///
/// memory.x comes from embassy-stm32's `memory-x` feature.
fn setup_linker() {
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    println!("cargo:rerun-if-changed=build.rs");
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClockToml {
    #[serde(default)]
    serial: SerialSection,
    #[serde(default, rename = "loop")]
    control: LoopSection,
    #[serde(default)]
    display: DisplaySection,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SerialSection {
    baudrate: u32,
}

impl Default for SerialSection {
    fn default() -> Self {
        Self { baudrate: 9600 }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LoopSection {
    poll_interval_us: u32,
    max_bytes_per_poll: u16,
}

impl Default for LoopSection {
    fn default() -> Self {
        Self {
            poll_interval_us: 200,
            max_bytes_per_poll: 32,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DisplaySection {
    i2c_address: u8,
    i2c_frequency: u32,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            i2c_address: 0x3C,
            i2c_frequency: 400_000,
        }
    }
}

/// Validate clock.toml and write `$OUT_DIR/config.rs`
fn generate_config() {
    // Re-run if clock.toml changes
    println!("cargo:rerun-if-changed=clock.toml");

    let config_path = Path::new("clock.toml");

    // Missing file means stock settings
    let config: ClockToml = if config_path.exists() {
        let content = match fs::read_to_string(config_path) {
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

        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                let error_msg = e.to_string();
                panic!(
                    "\n\
                    ╔══════════════════════════════════════════════════════════════════╗\n\
                    ║  ERROR: Invalid clock.toml                                       ║\n\
                    ╠══════════════════════════════════════════════════════════════════╣\n\
                    {}\n\
                    ╚══════════════════════════════════════════════════════════════════╝\n",
                    format_error_lines(&error_msg)
                );
            }
        }
    } else {
        println!("cargo:warning=clock.toml not found, using stock configuration");
        ClockToml {
            serial: SerialSection::default(),
            control: LoopSection::default(),
            display: DisplaySection::default(),
        }
    };

    validate(&config);

    let generated = format!(
        "/// Configuration generated from clock.toml\n\
         const CONFIG: ClockConfig = ClockConfig {{\n    \
             baudrate: {},\n    \
             poll_interval_us: {},\n    \
             max_bytes_per_poll: {},\n    \
             i2c_address: {:#04x},\n    \
             i2c_frequency: {},\n\
         }};\n",
        config.serial.baudrate,
        config.control.poll_interval_us,
        config.control.max_bytes_per_poll,
        config.display.i2c_address,
        config.display.i2c_frequency,
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    fs::write(out_dir.join("config.rs"), generated).expect("failed to write config.rs");
}

/// Range checks that TOML types alone cannot express
fn validate(config: &ClockToml) {
    let mut errors = Vec::new();

    let baud = config.serial.baudrate;
    if !(1200..=115_200).contains(&baud) {
        errors.push(format!("serial.baudrate {} outside 1200..=115200", baud));
    } else {
        // 10 bits per character with 8N1 framing
        let char_time_us = 10 * 1_000_000 / baud;
        if config.control.poll_interval_us >= char_time_us {
            errors.push(format!(
                "loop.poll_interval_us {} must be below {} at {} baud",
                config.control.poll_interval_us, char_time_us, baud
            ));
        }
    }

    if config.control.max_bytes_per_poll == 0 {
        errors.push("loop.max_bytes_per_poll must be at least 1".to_string());
    }

    if config.display.i2c_address > 0x7F {
        errors.push(format!(
            "display.i2c_address {:#04x} is not a 7-bit address",
            config.display.i2c_address
        ));
    }

    if !(10_000..=400_000).contains(&config.display.i2c_frequency) {
        errors.push(format!(
            "display.i2c_frequency {} outside 10000..=400000",
            config.display.i2c_frequency
        ));
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid values in clock.toml                             ║\n\
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
            // Cut on a char boundary; TOML errors quote the user's text
            let shown = match line.char_indices().nth(61) {
                Some((cut, _)) if line.chars().count() > 64 => format!("{}...", &line[..cut]),
                _ => line.to_string(),
            };
            format!("║  {:<64} ║", shown)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
