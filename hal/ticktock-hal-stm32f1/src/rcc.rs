//! Clock tree
//!
//! HSE 8 MHz -> PLL x9 -> 72 MHz SYSCLK. AHB /1, APB1 /2 (36 MHz),
//! APB2 /1 (72 MHz, USART1).
//!
//! embassy-stm32 waits for HSE and PLL lock without a timeout, so a
//! missing crystal hangs here instead of running on the wrong clock.

use embassy_stm32::rcc::{
    AHBPrescaler, APBPrescaler, Hse, HseMode, Pll, PllMul, PllPreDiv, PllSource, Sysclk,
};
use embassy_stm32::time::Hertz;
use embassy_stm32::Config;

/// External crystal frequency
pub const HSE_HZ: u32 = 8_000_000;

/// Core and AHB clock after PLL
pub const SYSCLK_HZ: u32 = 72_000_000;

/// USART1 kernel clock (APB2)
pub const APB2_HZ: u32 = SYSCLK_HZ;

/// embassy-stm32 configuration for the 72 MHz clock tree
pub fn clock_config() -> Config {
    let mut config = Config::default();
    config.rcc.hse = Some(Hse {
        freq: Hertz(HSE_HZ),
        mode: HseMode::Oscillator,
    });
    config.rcc.pll = Some(Pll {
        src: PllSource::HSE,
        prediv: PllPreDiv::DIV1,
        mul: PllMul::MUL9,
    });
    config.rcc.sys = Sysclk::PLL1_P;
    config.rcc.ahb_pre = AHBPrescaler::DIV1;
    config.rcc.apb1_pre = APBPrescaler::DIV2;
    config.rcc.apb2_pre = APBPrescaler::DIV1;
    config
}
