//! ticktock Hardware Abstraction Layer
//!
//! Register-level seams between the board-agnostic crates and a concrete
//! chip. Only the handful of operations the drivers actually poll are
//! exposed here; pin-mode setup, clock-tree programming and interrupt
//! priorities stay in the chip HAL.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  ticktock-firmware (tasks, main loop)   │
//! └─────────────────────────────────────────┘
//!          │                       │
//!          ▼                       ▼
//! ┌──────────────────┐   ┌──────────────────┐
//! │ ticktock-drivers │──▶│  ticktock-core   │
//! └──────────────────┘   └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────────────────────────────┐
//! │  ticktock-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ticktock-hal-stm32f1                   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`uart::UsartRegisters`] - Polled USART transmit registers
//! - [`timer::PeriodicTimer`] - Periodic tick interrupt source

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod timer;
pub mod uart;

pub use gpio::{InputPin, OutputPin};
pub use timer::PeriodicTimer;
pub use uart::{LineFault, UsartRegisters, UsartStatus};
