//! Board-agnostic core logic for the ticktock firmware
//!
//! This crate contains everything that does not touch a register:
//!
//! - Monotonic millisecond tick counter and the clock handle built on it
//! - Cooperative round-robin task scheduler
//! - Interrupt handler chains and interrupt-to-foreground event flags
//! - Wall clock (time of day) bookkeeping
//! - Board configuration types and validation

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod interrupt;
pub mod scheduler;
pub mod time;
