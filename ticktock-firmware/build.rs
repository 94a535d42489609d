//! Build script for ticktock-firmware
//!
//! - Passes the cortex-m-rt and defmt linker scripts
//! - Validates board.toml and compiles it into the firmware

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use ticktock_core::config::{BoardConfig, ConfigError};

fn main() {
    setup_linker();
    generate_board_config();
}

/// memory.x comes from embassy-stm32's `memory-x` feature
fn setup_linker() {
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse and validate board.toml, then write `OUT_DIR/board.rs`
fn generate_board_config() {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ERROR: ticktock-firmware/board.toml not found.\n\
            It must set loop_period_ms, a [serial] table (baud_rate,\n\
            peripheral_clock_hz = 72000000, print_timeout_ms) and a\n\
            [display] table (brightness, 0-7).\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: BoardConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid board.toml                                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    if let Err(e) = config.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml failed validation                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(describe(e))
        );
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    fs::write(out_dir.join("board.rs"), render(&config)).expect("failed to write board.rs");
}

fn describe(e: ConfigError) -> &'static str {
    match e {
        ConfigError::ZeroLoopPeriod => "loop_period_ms must be greater than 0",
        ConfigError::ZeroBaudRate => "serial.baud_rate must be greater than 0",
        ConfigError::BaudRateTooHigh => {
            "serial.baud_rate too high: peripheral_clock_hz must be at least 16 x baud_rate"
        }
        ConfigError::BaudRateTooLow => {
            "serial.baud_rate too low: divisor mantissa does not fit 12 bits"
        }
        ConfigError::BrightnessOutOfRange => "display.brightness must be 0-7",
    }
}

fn render(config: &BoardConfig) -> String {
    format!(
        "/// Board configuration from board.toml\n\
         pub const BOARD: BoardConfig = BoardConfig {{\n    \
             loop_period_ms: {},\n    \
             serial: SerialConfig {{\n        \
                 baud_rate: {},\n        \
                 peripheral_clock_hz: {},\n        \
                 print_timeout_ms: {},\n    \
             }},\n    \
             display: DisplayConfig {{\n        \
                 brightness: {},\n    \
             }},\n\
         }};\n",
        config.loop_period_ms,
        config.serial.baud_rate,
        config.serial.peripheral_clock_hz,
        config.serial.print_timeout_ms,
        config.display.brightness,
    )
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
