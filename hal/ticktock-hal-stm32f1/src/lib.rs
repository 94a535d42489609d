//! STM32F1-specific HAL for the ticktock firmware
//!
//! Implements the `ticktock-hal` traits for STM32F1 chips on top of
//! `embassy-stm32` in blocking mode:
//!
//! - STM32F103C8 (blue pill)
//!
//! # Features
//!
//! - `stm32f103c8` - Enable support for STM32F103C8T6
//! - `stm32f103cb` - Enable support for STM32F103CBT6
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! embassy-stm32 configures clocks and pins; the serial status polling,
//! the EXTI line and the SysTick period are programmed directly through
//! the PAC and `cortex-m`, because the drivers poll hardware flags in
//! their own timing loops.

#![no_std]

pub mod exti;
pub mod gpio;
pub mod rcc;
pub mod systick;
pub mod uart;

pub use gpio::{Input, Output};
pub use rcc::SYSCLK_HZ;
pub use systick::SysTickTimer;
pub use uart::Usart1;
