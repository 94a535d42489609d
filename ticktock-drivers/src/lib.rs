//! Hardware driver implementations
//!
//! Drivers built on the `ticktock-hal` register traits and the
//! `ticktock-core` clock:
//!
//! - Serial link: baud rate divisor, blocking timeout-bounded transmit,
//!   formatted output
//! - Segment display: bit-banged two-wire driver for a 4-digit 7-segment
//!   display (TM1637 command set)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod display;
pub mod serial;
