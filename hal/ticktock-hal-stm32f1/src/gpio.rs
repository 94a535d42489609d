//! GPIO pins for STM32F1
//!
//! Thin wrappers that put embassy-stm32 pins behind the `ticktock-hal`
//! pin traits.

use embassy_stm32::gpio;
use embassy_stm32::pac;
use ticktock_hal::{InputPin, OutputPin};

/// Push-pull output
pub struct Output<'d>(gpio::Output<'d>);

impl<'d> Output<'d> {
    pub fn new(pin: gpio::Output<'d>) -> Self {
        Self(pin)
    }
}

impl OutputPin for Output<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn toggle(&mut self) {
        self.0.toggle();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Digital input
pub struct Input<'d>(gpio::Input<'d>);

impl<'d> Input<'d> {
    pub fn new(pin: gpio::Input<'d>) -> Self {
        Self(pin)
    }
}

impl InputPin for Input<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// SWJ_CFG value: JTAG off, SW-DP on
const SWJ_SWD_ONLY: u8 = 0b010;

/// Free PA15, PB3 and PB4 for GPIO use, keeping SWD for the debugger
pub fn release_jtag_pins() {
    pac::RCC.apb2enr().modify(|w| w.set_afioen(true));
    pac::AFIO.mapr().modify(|w| w.set_swj_cfg(SWJ_SWD_ONLY));
}
