//! USART1 transmit registers for STM32F1
//!
//! embassy-stm32 brings the peripheral up (clock, TX pin, 8N1 frame).
//! After that the status, data and baud registers are accessed directly
//! so the serial link can poll the flags itself.

use embassy_stm32::mode::Blocking;
use embassy_stm32::pac;
use embassy_stm32::pac::usart::regs::Brr;
use embassy_stm32::usart::UartTx;
use ticktock_hal::{UsartRegisters, UsartStatus};

/// Exclusive handle on USART1's transmit side
pub struct Usart1<'d> {
    // Held for ownership of the peripheral and its TX pin
    _tx: UartTx<'d, Blocking>,
}

impl<'d> Usart1<'d> {
    pub fn new(tx: UartTx<'d, Blocking>) -> Self {
        Self { _tx: tx }
    }
}

impl UsartRegisters for Usart1<'_> {
    fn status(&self) -> UsartStatus {
        let sr = pac::USART1.sr().read();
        UsartStatus {
            parity_error: sr.pe(),
            framing_error: sr.fe(),
            noise: sr.ne(),
            overrun: sr.ore(),
            tx_empty: sr.txe(),
            tx_complete: sr.tc(),
        }
    }

    fn write_data(&mut self, byte: u8) {
        pac::USART1.dr().write(|w| w.set_dr(byte.into()));
    }

    fn set_baud_divisor(&mut self, mantissa: u16, fraction: u8) {
        let value = (u32::from(mantissa) << 4) | u32::from(fraction & 0x0F);
        pac::USART1.cr1().modify(|w| w.set_ue(false));
        pac::USART1.brr().write_value(Brr(value));
        pac::USART1.cr1().modify(|w| w.set_ue(true));
    }
}
