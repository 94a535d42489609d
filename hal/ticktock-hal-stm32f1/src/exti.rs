//! EXTI line 0 (rising edge) for a push button on PA0
//!
//! Only the line routing and edge selection live here; the firmware
//! owns the `EXTI0` handler and must clear the pending bit in it.

use embassy_stm32::interrupt::{self, InterruptExt, Priority};
use embassy_stm32::pac;

const LINE: usize = 0;
/// AFIO EXTICR port code for GPIOA
const PORT_A: u8 = 0;

/// Route PA0 to EXTI0, trigger on the rising edge and unmask the IRQ
pub fn enable_pa0_rising(priority: Priority) {
    pac::RCC.apb2enr().modify(|w| w.set_afioen(true));
    pac::AFIO.exticr(LINE / 4).modify(|w| w.set_exti(LINE % 4, PORT_A));
    pac::EXTI.rtsr(0).modify(|w| w.set_line(LINE, true));
    pac::EXTI.ftsr(0).modify(|w| w.set_line(LINE, false));
    clear_pending();
    pac::EXTI.imr(0).modify(|w| w.set_line(LINE, true));

    interrupt::EXTI0.set_priority(priority);
    // SAFETY: the EXTI0 handler is defined by the firmware and only
    // touches atomics and the EXTI pending register
    unsafe { interrupt::EXTI0.enable() };
}

/// Acknowledge the EXTI0 request
pub fn clear_pending() {
    pac::EXTI.pr(0).write(|w| w.set_line(LINE, true));
}
