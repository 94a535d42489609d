//! Compile-time board configuration
//!
//! `build.rs` validates `board.toml` and renders it as a `const`, so a
//! bad configuration fails the build instead of the boot.

use ticktock_core::config::{BoardConfig, DisplayConfig, SerialConfig};

include!(concat!(env!("OUT_DIR"), "/board.rs"));
