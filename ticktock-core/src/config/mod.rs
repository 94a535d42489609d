//! Configuration types
//!
//! Board configuration is fixed at build time: the firmware's build script
//! deserializes `board.toml` into these types, validates it and bakes it
//! into the binary as a constant.

pub mod board;
pub mod divisor;

pub use board::*;
pub use divisor::BaudDivisor;
